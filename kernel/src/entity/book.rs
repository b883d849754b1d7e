mod author;
mod availability;
mod isbn;
mod title;

pub use self::{author::*, availability::*, isbn::*, title::*};
use crate::KernelError;
use destructure::Destructure;
use error_stack::Report;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    isbn: BookIsbn,
    title: BookTitle,
    author: BookAuthor,
    availability: BookAvailability,
}

impl Book {
    pub fn new(
        isbn: BookIsbn,
        title: BookTitle,
        author: BookAuthor,
        availability: BookAvailability,
    ) -> Self {
        Self {
            isbn,
            title,
            author,
            availability,
        }
    }

    pub fn register(isbn: BookIsbn, title: BookTitle, author: BookAuthor) -> Self {
        Self::new(isbn, title, author, BookAvailability::new(true))
    }

    pub fn is_available(&self) -> bool {
        *self.availability.as_ref()
    }

    pub fn lend(&mut self) -> error_stack::Result<(), KernelError> {
        if !self.is_available() {
            return Err(Report::new(KernelError::Unavailable)
                .attach_printable(format!("Book {} is already on loan", self.isbn.as_ref())));
        }
        self.availability = BookAvailability::new(false);
        Ok(())
    }

    pub fn give_back(&mut self) -> error_stack::Result<(), KernelError> {
        if self.is_available() {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Book {} is not on loan", self.isbn.as_ref())));
        }
        self.availability = BookAvailability::new(true);
        Ok(())
    }
}
