use destructure::Destructure;
use vodca::References;

use crate::entity::{MemberEmail, MemberName};

/// The closed set of member fields that may change after registration.
#[derive(Debug, Clone, Default, Eq, PartialEq, References, Destructure)]
pub struct MemberPatch {
    name: Option<MemberName>,
    email: Option<MemberEmail>,
}

impl MemberPatch {
    pub fn new(name: Option<MemberName>, email: Option<MemberEmail>) -> Self {
        Self { name, email }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}
