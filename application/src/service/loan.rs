use error_stack::Report;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::identity::{DependOnIdentityGenerator, IdentityGenerator};
use kernel::interface::query::{
    BookQuery, DependOnBookQuery, DependOnLoanQuery, DependOnMemberQuery, LoanQuery, MemberQuery,
};
use kernel::interface::update::{BookModifier, DependOnBookModifier, DependOnLoanModifier, LoanModifier};
use kernel::prelude::entity::{BookIsbn, Loan, LoanedAt, MemberId, ReturnedAt};
use kernel::prelude::policy::DependOnLedgerPolicy;
use kernel::KernelError;

use crate::service::{identity_exhausted, not_found, IDENTITY_ATTEMPTS};
use crate::transfer::{CreateLoanDto, GetMemberLoansDto, LoanDto, ReturnBookDto, ReturnedLoanDto};

#[async_trait::async_trait]
pub trait CreateLoanService:
    'static
    + Sync
    + Send
    + DependOnMemberQuery
    + DependOnBookQuery
    + DependOnBookModifier
    + DependOnLoanQuery
    + DependOnLoanModifier
    + DependOnIdentityGenerator
    + DependOnClock
    + DependOnLedgerPolicy
{
    /// Marks the book unavailable and opens a loan due after the configured duration.
    async fn loan_book(&self, dto: CreateLoanDto) -> error_stack::Result<LoanDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let member_id = MemberId::new(dto.member_id);
        let isbn = BookIsbn::new(dto.isbn);
        self.member_query()
            .find_by_id(&mut connection, &member_id)
            .await?
            .ok_or_else(|| not_found(format!("Member {}", member_id.as_ref())))?;
        let mut book = self
            .book_query()
            .find_by_isbn(&mut connection, &isbn)
            .await?
            .ok_or_else(|| not_found(format!("Book {}", isbn.as_ref())))?;

        if let Some(open) = self
            .loan_query()
            .find_open_by_isbn(&mut connection, &isbn)
            .await?
        {
            return Err(Report::new(KernelError::Unavailable).attach_printable(format!(
                "Book {} is on loan {}",
                isbn.as_ref(),
                open.id().as_ref()
            )));
        }
        book.lend()?;

        let mut id = None;
        for _ in 0..IDENTITY_ATTEMPTS {
            let candidate = self.identity_generator().loan_id();
            let taken = self
                .loan_query()
                .find_by_id(&mut connection, &candidate)
                .await?
                .is_some();
            if !taken {
                id = Some(candidate);
                break;
            }
            tracing::warn!(id = %candidate.as_ref(), "loan id collision");
        }
        let id = id.ok_or_else(|| identity_exhausted("loan id"))?;

        let loaned_at = LoanedAt::new(self.clock().now());
        let due_date = self.ledger_policy().due_date(&loaned_at);
        let loan = Loan::open(id, member_id, isbn, loaned_at, due_date);

        self.book_modifier().update(&mut connection, &book).await?;
        self.loan_modifier().create(&mut connection, &loan).await?;
        connection.commit().await?;

        tracing::info!(
            loan = %loan.id().as_ref(),
            isbn = %loan.book_isbn().as_ref(),
            member = %loan.member_id().as_ref(),
            "book loaned"
        );
        Ok(LoanDto::from(loan))
    }
}

impl<T> CreateLoanService for T where
    T: DependOnMemberQuery
        + DependOnBookQuery
        + DependOnBookModifier
        + DependOnLoanQuery
        + DependOnLoanModifier
        + DependOnIdentityGenerator
        + DependOnClock
        + DependOnLedgerPolicy
{
}

#[async_trait::async_trait]
pub trait ReturnBookService:
    'static
    + Sync
    + Send
    + DependOnBookQuery
    + DependOnBookModifier
    + DependOnLoanQuery
    + DependOnLoanModifier
    + DependOnClock
    + DependOnLedgerPolicy
{
    /// Closes the open loan on the book and reports the fine owed for it.
    async fn return_book(
        &self,
        dto: ReturnBookDto,
    ) -> error_stack::Result<ReturnedLoanDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let isbn = BookIsbn::new(dto.isbn);
        let mut book = self
            .book_query()
            .find_by_isbn(&mut connection, &isbn)
            .await?
            .ok_or_else(|| not_found(format!("Book {}", isbn.as_ref())))?;
        let mut loan = self
            .loan_query()
            .find_open_by_isbn(&mut connection, &isbn)
            .await?
            .ok_or_else(|| not_found(format!("Open loan for book {}", isbn.as_ref())))?;

        let now = self.clock().now();
        loan.close(ReturnedAt::new(now))?;
        book.give_back()?;

        self.loan_modifier().update(&mut connection, &loan).await?;
        self.book_modifier().update(&mut connection, &book).await?;
        connection.commit().await?;

        let fine = self.ledger_policy().fines().fine(loan.due_date(), &now);
        tracing::info!(
            loan = %loan.id().as_ref(),
            isbn = %isbn.as_ref(),
            fine = %fine.as_ref(),
            "book returned"
        );
        Ok(ReturnedLoanDto {
            loan: LoanDto::from(loan),
            fine: fine.into(),
        })
    }
}

impl<T> ReturnBookService for T where
    T: DependOnBookQuery
        + DependOnBookModifier
        + DependOnLoanQuery
        + DependOnLoanModifier
        + DependOnClock
        + DependOnLedgerPolicy
{
}

#[async_trait::async_trait]
pub trait GetLoanService: 'static + Sync + Send + DependOnLoanQuery {
    /// Unknown members simply have no loans.
    async fn member_loans(
        &self,
        dto: GetMemberLoansDto,
    ) -> error_stack::Result<Vec<LoanDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let member_id = MemberId::new(dto.member_id);
        let loans = self
            .loan_query()
            .find_open_by_member(&mut connection, &member_id)
            .await?;
        connection.commit().await?;

        Ok(loans.into_iter().map(LoanDto::from).collect())
    }
}

impl<T> GetLoanService for T where T: DependOnLoanQuery {}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::datetime;
    use time::Duration;
    use uuid::Uuid;

    use kernel::KernelError;

    use crate::service::{
        CreateBookService, CreateLoanService, GetBookService, GetLoanService,
        RegisterMemberService, ReturnBookService,
    };
    use crate::test::TestModule;
    use crate::transfer::{
        CreateBookDto, CreateLoanDto, GetBookDto, GetMemberLoansDto, MemberDto,
        RegisterMemberDto, ReturnBookDto,
    };

    async fn setup(module: &TestModule) -> error_stack::Result<MemberDto, KernelError> {
        module
            .add_book(CreateBookDto {
                isbn: "ISBN1".into(),
                title: "Dune".into(),
                author: "Herbert".into(),
            })
            .await?;
        module
            .register_member(RegisterMemberDto {
                name: "Paul".into(),
                email: "paul@arrakis.example".into(),
            })
            .await
    }

    fn isbn1() -> GetBookDto {
        GetBookDto {
            isbn: "ISBN1".into(),
        }
    }

    #[tokio::test]
    async fn loan_and_return_on_time() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let member = setup(&module).await?;

        let loan = module
            .loan_book(CreateLoanDto {
                member_id: member.id,
                isbn: "ISBN1".into(),
            })
            .await?;
        assert_eq!(loan.due_date - loan.loaned_at, Duration::days(14));
        assert_eq!(loan.returned_at, None);
        assert!(!module.find_book(isbn1()).await?.is_available);

        let loans = module
            .member_loans(GetMemberLoansDto {
                member_id: member.id,
            })
            .await?;
        assert_eq!(loans, vec![loan.clone()]);

        let returned = module
            .return_book(ReturnBookDto {
                isbn: "ISBN1".into(),
            })
            .await?;
        assert_eq!(returned.fine, dec!(0));
        assert_eq!(returned.loan.id, loan.id);
        assert!(returned.loan.returned_at.is_some());
        assert!(module.find_book(isbn1()).await?.is_available);

        let loans = module
            .member_loans(GetMemberLoansDto {
                member_id: member.id,
            })
            .await?;
        assert!(loans.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn loaning_unavailable_book_changes_nothing() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let paul = setup(&module).await?;
        let chani = module
            .register_member(RegisterMemberDto {
                name: "Chani".into(),
                email: "chani@sietch.example".into(),
            })
            .await?;
        let first = module
            .loan_book(CreateLoanDto {
                member_id: paul.id,
                isbn: "ISBN1".into(),
            })
            .await?;

        let error = module
            .loan_book(CreateLoanDto {
                member_id: chani.id,
                isbn: "ISBN1".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Unavailable);

        let loans = module
            .member_loans(GetMemberLoansDto { member_id: chani.id })
            .await?;
        assert!(loans.is_empty());
        let loans = module
            .member_loans(GetMemberLoansDto { member_id: paul.id })
            .await?;
        assert_eq!(loans, vec![first]);
        assert!(!module.find_book(isbn1()).await?.is_available);
        Ok(())
    }

    #[tokio::test]
    async fn loan_requires_member_and_book() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let member = setup(&module).await?;

        let error = module
            .loan_book(CreateLoanDto {
                member_id: Uuid::new_v4(),
                isbn: "ISBN1".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NotFound);

        let error = module
            .loan_book(CreateLoanDto {
                member_id: member.id,
                isbn: "ISBN404".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NotFound);
        assert!(module.find_book(isbn1()).await?.is_available);
        Ok(())
    }

    #[tokio::test]
    async fn return_without_open_loan() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        setup(&module).await?;

        let error = module
            .return_book(ReturnBookDto {
                isbn: "ISBN1".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NotFound);
        assert!(module.find_book(isbn1()).await?.is_available);

        let error = module
            .return_book(ReturnBookDto {
                isbn: "ISBN404".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn late_return_is_fined_per_whole_day() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let member = setup(&module).await?;
        module.clock.set(datetime!(2024-01-01 10:00 UTC));

        let loan = module
            .loan_book(CreateLoanDto {
                member_id: member.id,
                isbn: "ISBN1".into(),
            })
            .await?;
        assert_eq!(loan.due_date, datetime!(2024-01-15 10:00 UTC));

        // Ten days and a few hours late.
        module.clock.set(datetime!(2024-01-25 16:00 UTC));
        let returned = module
            .return_book(ReturnBookDto {
                isbn: "ISBN1".into(),
            })
            .await?;
        assert_eq!(returned.fine, dec!(5.0));
        assert_eq!(returned.loan.returned_at, Some(datetime!(2024-01-25 16:00 UTC)));
        Ok(())
    }

    #[tokio::test]
    async fn availability_tracks_open_loans() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let member = setup(&module).await?;

        for _ in 0..3 {
            module
                .loan_book(CreateLoanDto {
                    member_id: member.id,
                    isbn: "ISBN1".into(),
                })
                .await?;
            let open = module
                .member_loans(GetMemberLoansDto {
                    member_id: member.id,
                })
                .await?;
            assert_eq!(open.len(), 1);
            assert!(!module.find_book(isbn1()).await?.is_available);

            module
                .return_book(ReturnBookDto {
                    isbn: "ISBN1".into(),
                })
                .await?;
            let open = module
                .member_loans(GetMemberLoansDto {
                    member_id: member.id,
                })
                .await?;
            assert!(open.is_empty());
            assert!(module.find_book(isbn1()).await?.is_available);
        }
        Ok(())
    }

    #[tokio::test]
    async fn unknown_member_has_no_loans() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let loans = module
            .member_loans(GetMemberLoansDto {
                member_id: Uuid::new_v4(),
            })
            .await?;
        assert!(loans.is_empty());
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_loans_open_exactly_one() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let first = setup(&module).await?;
        let mut members = vec![first];
        for n in 1..8 {
            let member = module
                .register_member(RegisterMemberDto {
                    name: format!("Fremen {n}"),
                    email: format!("fremen{n}@sietch.example"),
                })
                .await?;
            members.push(member);
        }

        let tasks = members
            .iter()
            .map(|member| {
                let module = module.clone();
                let dto = CreateLoanDto {
                    member_id: member.id,
                    isbn: "ISBN1".into(),
                };
                tokio::spawn(async move { module.loan_book(dto).await })
            })
            .collect::<Vec<_>>();

        let mut succeeded = 0;
        for task in tasks {
            match task.await.expect("loan task panicked") {
                Ok(_) => succeeded += 1,
                Err(error) => assert_eq!(error.current_context(), &KernelError::Unavailable),
            }
        }
        assert_eq!(succeeded, 1);
        assert!(!module.find_book(isbn1()).await?.is_available);

        let mut open = 0;
        for member in &members {
            open += module
                .member_loans(GetMemberLoansDto {
                    member_id: member.id,
                })
                .await?
                .len();
        }
        assert_eq!(open, 1);
        Ok(())
    }
}
