mod email;
mod id;
mod name;
mod patch;

pub use self::{email::*, id::*, name::*, patch::*};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Member {
    id: MemberId,
    name: MemberName,
    email: MemberEmail,
}

impl Member {
    pub fn new(id: MemberId, name: MemberName, email: MemberEmail) -> Self {
        Self { id, name, email }
    }

    /// Overwrites only the fields present in `patch`.
    /// Email uniqueness is the caller's responsibility.
    pub fn apply(&mut self, patch: MemberPatch) {
        let DestructMemberPatch { name, email } = patch.into_destruct();
        self.substitute(|member| {
            if let Some(name) = name {
                *member.name = name;
            }
            if let Some(email) = email {
                *member.email = email;
            }
        });
    }
}
