use sqlx::PgConnection;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookAuthor, BookAvailability, BookIsbn, BookTitle};
use kernel::KernelError;

use crate::database::postgres::{ensure_affected, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_isbn(
        &self,
        con: &mut PostgresTransaction,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_isbn(con, isbn).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con, book).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        isbn: &BookIsbn,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con, isbn).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    isbn: String,
    title: String,
    author: String,
    is_available: bool,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookIsbn::new(value.isbn),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            BookAvailability::new(value.is_available),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    /// Locks the row until the surrounding transaction ends.
    async fn find_by_isbn(
        con: &mut PgConnection,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT isbn, title, author, is_available
            FROM books
            WHERE isbn = $1
            FOR UPDATE
            "#,
        )
        .bind(isbn.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT isbn, title, author, is_available
            FROM books
            ORDER BY seq
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO books (isbn, title, author, is_available)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(book.isbn().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.is_available())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author = $3, is_available = $4
            WHERE isbn = $1
            "#,
        )
        .bind(book.isbn().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.is_available())
        .execute(con)
        .await
        .convert_error()?;
        ensure_affected(result, "books")
    }

    async fn delete(con: &mut PgConnection, isbn: &BookIsbn) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            DELETE FROM books
            WHERE isbn = $1
            "#,
        )
        .bind(isbn.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        ensure_affected(result, "books")
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{Book, BookAuthor, BookIsbn, BookTitle};
    use kernel::KernelError;

    use crate::database::postgres::{PostgresBookRepository, PostgresDatabase};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let isbn = BookIsbn::new(uuid::Uuid::new_v4().to_string());

        let mut book = Book::register(
            isbn.clone(),
            BookTitle::new("Dune"),
            BookAuthor::new("Herbert"),
        );
        PostgresBookRepository.create(&mut con, &book).await?;

        let found = PostgresBookRepository.find_by_isbn(&mut con, &isbn).await?;
        assert_eq!(found, Some(book.clone()));

        book.lend()?;
        PostgresBookRepository.update(&mut con, &book).await?;
        let found = PostgresBookRepository.find_by_isbn(&mut con, &isbn).await?;
        assert_eq!(found, Some(book));

        PostgresBookRepository.delete(&mut con, &isbn).await?;
        let found = PostgresBookRepository.find_by_isbn(&mut con, &isbn).await?;
        assert!(found.is_none());

        con.roll_back().await?;
        Ok(())
    }
}
