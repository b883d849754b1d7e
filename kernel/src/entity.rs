mod account;
mod book;
mod common;
mod loan;
mod member;

pub use self::{account::*, book::*, common::*, loan::*, member::*};
