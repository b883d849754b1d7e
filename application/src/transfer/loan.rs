use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructLoan, Loan};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LoanDto {
    pub id: Uuid,
    pub member_id: Uuid,
    pub book_isbn: String,
    pub loaned_at: OffsetDateTime,
    pub due_date: OffsetDateTime,
    pub returned_at: Option<OffsetDateTime>,
}

impl From<Loan> for LoanDto {
    fn from(value: Loan) -> Self {
        let DestructLoan {
            id,
            member_id,
            book_isbn,
            loaned_at,
            due_date,
            returned_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            member_id: member_id.into(),
            book_isbn: book_isbn.into(),
            loaned_at: loaned_at.into(),
            due_date: due_date.into(),
            returned_at: returned_at.map(Into::into),
        }
    }
}

pub struct CreateLoanDto {
    pub member_id: Uuid,
    pub isbn: String,
}

pub struct ReturnBookDto {
    pub isbn: String,
}

/// The closed loan and the fine owed for it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReturnedLoanDto {
    pub loan: LoanDto,
    pub fine: Decimal,
}

pub struct GetMemberLoansDto {
    pub member_id: Uuid,
}
