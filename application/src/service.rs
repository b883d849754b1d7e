use error_stack::Report;

use kernel::KernelError;

pub use self::{account::*, book::*, loan::*, member::*};

mod account;
mod book;
mod loan;
mod member;

/// Attempts at drawing an unused identifier before giving up.
pub(crate) const IDENTITY_ATTEMPTS: usize = 8;

pub(crate) fn not_found(what: impl std::fmt::Display) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("{what} not found"))
}

pub(crate) fn identity_exhausted(what: &'static str) -> Report<KernelError> {
    Report::new(KernelError::Internal).attach_printable(format!(
        "No unused {what} after {IDENTITY_ATTEMPTS} attempts"
    ))
}
