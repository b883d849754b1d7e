use uuid::Uuid;

use kernel::prelude::entity::{DestructMember, Member};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MemberDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<Member> for MemberDto {
    fn from(value: Member) -> Self {
        let DestructMember { id, name, email } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

pub struct GetMemberDto {
    pub id: Uuid,
}

pub struct RegisterMemberDto {
    pub name: String,
    pub email: String,
}

/// Absent fields are left untouched.
pub struct UpdateMemberDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
}
