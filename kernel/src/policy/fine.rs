use time::OffsetDateTime;

use crate::entity::{DueDate, Money};

/// Late fee for a loan, per whole overdue day.
#[derive(Debug, Clone)]
pub struct FineCalculator {
    per_day: Money,
}

impl FineCalculator {
    pub fn new(per_day: Money) -> Self {
        Self { per_day }
    }

    pub fn per_day(&self) -> &Money {
        &self.per_day
    }

    /// Only whole elapsed days past `due_date` are charged.
    pub fn fine(&self, due_date: &DueDate, now: &OffsetDateTime) -> Money {
        let due_date = due_date.as_ref();
        if now <= due_date {
            return Money::zero();
        }
        let days_overdue = (*now - *due_date).whole_days();
        self.per_day.saturating_times(days_overdue)
    }
}
