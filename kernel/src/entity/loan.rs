mod due_date;
mod id;
mod loaned_at;
mod returned_at;

pub use self::{due_date::*, id::*, loaned_at::*, returned_at::*};
use crate::entity::{BookIsbn, MemberId};
use crate::KernelError;
use destructure::Destructure;
use error_stack::Report;
use vodca::References;

/// A loan is open until `returned_at` is set. Loans are never deleted.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Loan {
    id: LoanId,
    member_id: MemberId,
    book_isbn: BookIsbn,
    loaned_at: LoanedAt,
    due_date: DueDate,
    returned_at: Option<ReturnedAt>,
}

impl Loan {
    pub fn new(
        id: LoanId,
        member_id: MemberId,
        book_isbn: BookIsbn,
        loaned_at: LoanedAt,
        due_date: DueDate,
        returned_at: Option<ReturnedAt>,
    ) -> Self {
        Self {
            id,
            member_id,
            book_isbn,
            loaned_at,
            due_date,
            returned_at,
        }
    }

    pub fn open(
        id: LoanId,
        member_id: MemberId,
        book_isbn: BookIsbn,
        loaned_at: LoanedAt,
        due_date: DueDate,
    ) -> Self {
        Self::new(id, member_id, book_isbn, loaned_at, due_date, None)
    }

    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }

    pub fn close(&mut self, at: ReturnedAt) -> error_stack::Result<(), KernelError> {
        if !self.is_open() {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Loan {} is already closed", self.id.as_ref())));
        }
        self.returned_at = Some(at);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use crate::entity::{BookIsbn, DueDate, Loan, LoanId, LoanedAt, MemberId, ReturnedAt};
    use crate::KernelError;

    #[test]
    fn close_only_once() {
        let mut loan = Loan::open(
            LoanId::new(Uuid::new_v4()),
            MemberId::new(Uuid::new_v4()),
            BookIsbn::new("ISBN1"),
            LoanedAt::new(datetime!(2024-01-01 0:00 UTC)),
            DueDate::new(datetime!(2024-01-15 0:00 UTC)),
        );
        assert!(loan.is_open());

        loan.close(ReturnedAt::new(datetime!(2024-01-10 0:00 UTC)))
            .unwrap();
        assert!(!loan.is_open());

        let error = loan
            .close(ReturnedAt::new(datetime!(2024-01-11 0:00 UTC)))
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NotFound);
        assert_eq!(
            loan.returned_at(),
            &Some(ReturnedAt::new(datetime!(2024-01-10 0:00 UTC)))
        );
    }
}
