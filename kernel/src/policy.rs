mod fine;

pub use self::fine::*;
use crate::entity::{DueDate, LoanedAt, Money};
use rust_decimal::Decimal;
use time::Duration;
use vodca::References;

pub const DEFAULT_LOAN_DAYS: i64 = 14;

/// Half a currency unit per overdue day.
pub fn default_fine_per_day() -> Money {
    Money::new(Decimal::new(5, 1))
}

/// Lending rules that are configuration rather than engine logic.
#[derive(Debug, Clone, References)]
pub struct LedgerPolicy {
    loan_duration: Duration,
    fines: FineCalculator,
}

impl LedgerPolicy {
    pub fn new(loan_duration: Duration, fine_per_day: Money) -> Self {
        Self {
            loan_duration,
            fines: FineCalculator::new(fine_per_day),
        }
    }

    pub fn due_date(&self, loaned_at: &LoanedAt) -> DueDate {
        DueDate::new(*loaned_at.as_ref() + self.loan_duration)
    }
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self::new(Duration::days(DEFAULT_LOAN_DAYS), default_fine_per_day())
    }
}

pub trait DependOnLedgerPolicy: 'static + Sync + Send {
    fn ledger_policy(&self) -> &LedgerPolicy;
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use crate::entity::{DueDate, LoanedAt};
    use crate::policy::LedgerPolicy;

    #[test]
    fn due_in_fourteen_days_by_default() {
        let policy = LedgerPolicy::default();
        let due = policy.due_date(&LoanedAt::new(datetime!(2024-01-01 9:30 UTC)));
        assert_eq!(due, DueDate::new(datetime!(2024-01-15 9:30 UTC)));
    }
}
