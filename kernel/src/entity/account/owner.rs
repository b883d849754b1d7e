use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Unique across all accounts.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct AccountOwner(String);

impl AccountOwner {
    pub fn new(owner: impl Into<String>) -> Self {
        Self(owner.into())
    }
}
