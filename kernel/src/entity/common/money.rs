use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Exact currency amount. Shared by balances, deposits and fines.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    Fromln,
    AsRefln,
)]
pub struct Money(Decimal);

impl Money {
    pub fn new(amount: impl Into<Decimal>) -> Self {
        Self(amount.into())
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(&self, other: &Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_times(&self, times: i64) -> Money {
        Self(self.0.saturating_mul(Decimal::from(times)))
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;

    use super::Money;

    #[test]
    fn sign() {
        assert!(Money::new(dec!(0.01)).is_positive());
        assert!(!Money::zero().is_positive());
        assert!(!Money::zero().is_negative());
        assert!(Money::new(dec!(-3)).is_negative());
    }

    #[test]
    fn arithmetic() {
        let ten = Money::new(dec!(10));
        let three = Money::new(dec!(3.25));
        assert_eq!(ten.checked_add(&three), Some(Money::new(dec!(13.25))));
        assert_eq!(ten.checked_sub(&three), Some(Money::new(dec!(6.75))));
        assert_eq!(Money::new(dec!(0.5)).saturating_times(10), Money::new(dec!(5)));
    }
}
