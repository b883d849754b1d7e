use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery, DependOnLoanQuery, LoanQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookAuthor, BookIsbn, BookTitle};
use kernel::KernelError;

use crate::search::Keyword;
use crate::service::not_found;
use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, GetBookDto, SearchDto};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn find_book(&self, dto: GetBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let isbn = BookIsbn::new(dto.isbn);
        let book = self
            .book_query()
            .find_by_isbn(&mut connection, &isbn)
            .await?
            .ok_or_else(|| not_found(format!("Book {}", isbn.as_ref())))?;
        connection.commit().await?;

        Ok(BookDto::from(book))
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    async fn add_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let isbn = BookIsbn::new(dto.isbn);
        if self
            .book_query()
            .find_by_isbn(&mut connection, &isbn)
            .await?
            .is_some()
        {
            return Err(Report::new(KernelError::DuplicateKey)
                .attach_printable(format!("Book {} already registered", isbn.as_ref())));
        }

        let book = Book::register(isbn, BookTitle::new(dto.title), BookAuthor::new(dto.author));
        self.book_modifier().create(&mut connection, &book).await?;
        connection.commit().await?;

        tracing::info!(isbn = %book.isbn().as_ref(), "book registered");
        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier + DependOnLoanQuery
{
    /// Books with any loan history stay on record.
    async fn remove_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let isbn = BookIsbn::new(dto.isbn);
        self.book_query()
            .find_by_isbn(&mut connection, &isbn)
            .await?
            .ok_or_else(|| not_found(format!("Book {}", isbn.as_ref())))?;

        let loans = self.loan_query().find_by_isbn(&mut connection, &isbn).await?;
        if !loans.is_empty() {
            return Err(Report::new(KernelError::Unavailable).attach_printable(format!(
                "Book {} is referenced by {} loan(s)",
                isbn.as_ref(),
                loans.len()
            )));
        }

        self.book_modifier().delete(&mut connection, &isbn).await?;
        connection.commit().await?;

        tracing::info!(isbn = %isbn.as_ref(), "book removed");
        Ok(())
    }
}

impl<T> DeleteBookService for T where
    T: DependOnBookQuery + DependOnBookModifier + DependOnLoanQuery
{
}

#[async_trait::async_trait]
pub trait SearchBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn search_books(&self, dto: SearchDto) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        connection.commit().await?;

        Ok(Keyword::new(dto.keyword)
            .filter(books)
            .into_iter()
            .map(BookDto::from)
            .collect())
    }
}

impl<T> SearchBookService for T where T: DependOnBookQuery {}
