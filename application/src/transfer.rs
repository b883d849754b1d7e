mod account;
mod book;
mod loan;
mod member;

pub use self::{account::*, book::*, loan::*, member::*};

/// Case-insensitive containment; an empty keyword matches every record.
pub struct SearchDto {
    pub keyword: String,
}
