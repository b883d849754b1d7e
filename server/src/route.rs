mod account;
mod book;
mod loan;
mod member;

pub use self::{account::*, book::*, loan::*, member::*};
