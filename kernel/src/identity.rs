use crate::entity::{AccountNumber, LoanId, MemberId};

/// Produces candidate identifiers. Collisions are unlikely but possible;
/// callers re-check the store before using a value.
pub trait IdentityGenerator: 'static + Sync + Send {
    fn member_id(&self) -> MemberId;
    fn loan_id(&self) -> LoanId;
    fn account_number(&self) -> AccountNumber;
}

pub trait DependOnIdentityGenerator: 'static + Sync + Send {
    type IdentityGenerator: IdentityGenerator;
    fn identity_generator(&self) -> &Self::IdentityGenerator;
}
