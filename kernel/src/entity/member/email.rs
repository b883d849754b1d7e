use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Unique across all members. Compared exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct MemberEmail(String);

impl MemberEmail {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }
}
