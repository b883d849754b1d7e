use error_stack::Report;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookIsbn};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_isbn(
        &self,
        con: &mut InMemoryTransaction,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con
            .tables()
            .books
            .iter()
            .find(|book| book.isbn() == isbn)
            .cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.tables().books.clone())
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let books = &mut con.tables_mut().books;
        if books.iter().any(|row| row.isbn() == book.isbn()) {
            return Err(Report::new(KernelError::DuplicateKey)
                .attach_printable(format!("books.isbn = {}", book.isbn().as_ref())));
        }
        books.push(book.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let row = con
            .tables_mut()
            .books
            .iter_mut()
            .find(|row| row.isbn() == book.isbn())
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("books.isbn = {}", book.isbn().as_ref()))
            })?;
        *row = book.clone();
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        isbn: &BookIsbn,
    ) -> error_stack::Result<(), KernelError> {
        let books = &mut con.tables_mut().books;
        let before = books.len();
        books.retain(|row| row.isbn() != isbn);
        if books.len() == before {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("books.isbn = {}", isbn.as_ref())));
        }
        Ok(())
    }
}
