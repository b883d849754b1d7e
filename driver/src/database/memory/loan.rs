use error_stack::Report;

use kernel::interface::query::LoanQuery;
use kernel::interface::update::LoanModifier;
use kernel::prelude::entity::{BookIsbn, Loan, LoanId, MemberId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryLoanRepository;

/// Mirrors the partial unique index `loans (book_isbn) WHERE returned_at IS NULL`.
fn another_open_loan(loans: &[Loan], loan: &Loan) -> bool {
    loan.is_open()
        && loans
            .iter()
            .any(|row| row.is_open() && row.book_isbn() == loan.book_isbn() && row.id() != loan.id())
}

#[async_trait::async_trait]
impl LoanQuery for InMemoryLoanRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &LoanId,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        Ok(con.tables().loans.iter().find(|loan| loan.id() == id).cloned())
    }

    async fn find_open_by_isbn(
        &self,
        con: &mut InMemoryTransaction,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        Ok(con
            .tables()
            .loans
            .iter()
            .find(|loan| loan.is_open() && loan.book_isbn() == isbn)
            .cloned())
    }

    async fn find_by_isbn(
        &self,
        con: &mut InMemoryTransaction,
        isbn: &BookIsbn,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        Ok(con
            .tables()
            .loans
            .iter()
            .filter(|loan| loan.book_isbn() == isbn)
            .cloned()
            .collect())
    }

    async fn find_open_by_member(
        &self,
        con: &mut InMemoryTransaction,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        Ok(con
            .tables()
            .loans
            .iter()
            .filter(|loan| loan.is_open() && loan.member_id() == member_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl LoanModifier for InMemoryLoanRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        let loans = &mut con.tables_mut().loans;
        if loans.iter().any(|row| row.id() == loan.id()) {
            return Err(Report::new(KernelError::DuplicateKey)
                .attach_printable(format!("loans.id = {}", loan.id().as_ref())));
        }
        if another_open_loan(loans, loan) {
            return Err(Report::new(KernelError::Unavailable).attach_printable(format!(
                "Open loan already exists for {}",
                loan.book_isbn().as_ref()
            )));
        }
        loans.push(loan.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        let loans = &mut con.tables_mut().loans;
        if another_open_loan(loans, loan) {
            return Err(Report::new(KernelError::Unavailable).attach_printable(format!(
                "Open loan already exists for {}",
                loan.book_isbn().as_ref()
            )));
        }
        let row = loans
            .iter_mut()
            .find(|row| row.id() == loan.id())
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("loans.id = {}", loan.id().as_ref()))
            })?;
        *row = loan.clone();
        Ok(())
    }
}
