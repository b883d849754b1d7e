use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::LoanQuery;
use kernel::interface::update::LoanModifier;
use kernel::prelude::entity::{BookIsbn, DueDate, Loan, LoanId, LoanedAt, MemberId, ReturnedAt};
use kernel::KernelError;

use crate::database::postgres::{ensure_affected, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresLoanRepository;

#[async_trait::async_trait]
impl LoanQuery for PostgresLoanRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &LoanId,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        PgLoanInternal::find_by_id(con, id).await
    }

    async fn find_open_by_isbn(
        &self,
        con: &mut PostgresTransaction,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        PgLoanInternal::find_open_by_isbn(con, isbn).await
    }

    async fn find_by_isbn(
        &self,
        con: &mut PostgresTransaction,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        PgLoanInternal::find_by_isbn(con, isbn).await
    }

    async fn find_open_by_member(
        &self,
        con: &mut PostgresTransaction,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        PgLoanInternal::find_open_by_member(con, member_id).await
    }
}

#[async_trait::async_trait]
impl LoanModifier for PostgresLoanRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        PgLoanInternal::create(con, loan).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        PgLoanInternal::update(con, loan).await
    }
}

#[derive(sqlx::FromRow)]
struct LoanRow {
    id: Uuid,
    member_id: Uuid,
    book_isbn: String,
    loaned_at: OffsetDateTime,
    due_date: OffsetDateTime,
    returned_at: Option<OffsetDateTime>,
}

impl From<LoanRow> for Loan {
    fn from(value: LoanRow) -> Self {
        Loan::new(
            LoanId::new(value.id),
            MemberId::new(value.member_id),
            BookIsbn::new(value.book_isbn),
            LoanedAt::new(value.loaned_at),
            DueDate::new(value.due_date),
            value.returned_at.map(ReturnedAt::new),
        )
    }
}

pub(in crate::database) struct PgLoanInternal;

impl PgLoanInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &LoanId,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        let row = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, member_id, book_isbn, loaned_at, due_date, returned_at
            FROM loans
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Loan::from))
    }

    async fn find_open_by_isbn(
        con: &mut PgConnection,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        let row = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, member_id, book_isbn, loaned_at, due_date, returned_at
            FROM loans
            WHERE book_isbn = $1 AND returned_at IS NULL
            FOR UPDATE
            "#,
        )
        .bind(isbn.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Loan::from))
    }

    async fn find_by_isbn(
        con: &mut PgConnection,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, member_id, book_isbn, loaned_at, due_date, returned_at
            FROM loans
            WHERE book_isbn = $1
            ORDER BY loaned_at
            "#,
        )
        .bind(isbn.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Loan::from).collect())
    }

    async fn find_open_by_member(
        con: &mut PgConnection,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, member_id, book_isbn, loaned_at, due_date, returned_at
            FROM loans
            WHERE member_id = $1 AND returned_at IS NULL
            ORDER BY loaned_at
            "#,
        )
        .bind(member_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Loan::from).collect())
    }

    async fn create(con: &mut PgConnection, loan: &Loan) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO loans (id, member_id, book_isbn, loaned_at, due_date, returned_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(loan.id().as_ref())
        .bind(loan.member_id().as_ref())
        .bind(loan.book_isbn().as_ref())
        .bind(*loan.loaned_at().as_ref())
        .bind(*loan.due_date().as_ref())
        .bind(loan.returned_at().as_ref().map(|at| *at.as_ref()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, loan: &Loan) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE loans
            SET due_date = $2, returned_at = $3
            WHERE id = $1
            "#,
        )
        .bind(loan.id().as_ref())
        .bind(*loan.due_date().as_ref())
        .bind(loan.returned_at().as_ref().map(|at| *at.as_ref()))
        .execute(con)
        .await
        .convert_error()?;
        ensure_affected(result, "loans")
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::LoanQuery;
    use kernel::interface::update::{BookModifier, LoanModifier, MemberModifier};
    use kernel::prelude::entity::{
        Book, BookAuthor, BookIsbn, BookTitle, DueDate, Loan, LoanId, LoanedAt, Member,
        MemberEmail, MemberId, MemberName, ReturnedAt,
    };
    use kernel::KernelError;

    use crate::database::postgres::{
        PostgresBookRepository, PostgresDatabase, PostgresLoanRepository,
        PostgresMemberRepository,
    };

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let isbn = BookIsbn::new(Uuid::new_v4().to_string());
        let book = Book::register(isbn.clone(), BookTitle::new("title"), BookAuthor::new("author"));
        PostgresBookRepository.create(&mut con, &book).await?;

        let member_id = MemberId::new(Uuid::new_v4());
        let member = Member::new(
            member_id.clone(),
            MemberName::new("name"),
            MemberEmail::new(format!("{}@example.com", member_id.as_ref())),
        );
        PostgresMemberRepository.create(&mut con, &member).await?;

        // Postgres stores microseconds.
        let now = OffsetDateTime::now_utc().replace_nanosecond(0).unwrap();
        let mut loan = Loan::open(
            LoanId::new(Uuid::new_v4()),
            member_id.clone(),
            isbn.clone(),
            LoanedAt::new(now),
            DueDate::new(now + Duration::days(14)),
        );
        PostgresLoanRepository.create(&mut con, &loan).await?;

        let found = PostgresLoanRepository
            .find_open_by_isbn(&mut con, &isbn)
            .await?;
        assert_eq!(found, Some(loan.clone()));

        let second = Loan::open(
            LoanId::new(Uuid::new_v4()),
            member_id.clone(),
            isbn.clone(),
            LoanedAt::new(now),
            DueDate::new(now + Duration::days(14)),
        );
        let error = PostgresLoanRepository
            .create(&mut con, &second)
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Unavailable);
        con.roll_back().await?;

        let mut con = db.transact().await?;
        PostgresBookRepository.create(&mut con, &book).await?;
        PostgresMemberRepository.create(&mut con, &member).await?;
        PostgresLoanRepository.create(&mut con, &loan).await?;
        loan.close(ReturnedAt::new(now + Duration::days(1)))?;
        PostgresLoanRepository.update(&mut con, &loan).await?;

        let open = PostgresLoanRepository
            .find_open_by_member(&mut con, &member_id)
            .await?;
        assert!(open.is_empty());
        let all = PostgresLoanRepository.find_by_isbn(&mut con, &isbn).await?;
        assert_eq!(all, vec![loan]);

        con.roll_back().await?;
        Ok(())
    }
}
