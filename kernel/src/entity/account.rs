mod number;
mod owner;
mod pin;

pub use self::{number::*, owner::*, pin::*};
use crate::entity::Money;
use crate::KernelError;
use destructure::Destructure;
use error_stack::Report;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Account {
    number: AccountNumber,
    owner: AccountOwner,
    balance: Money,
    pin: PinDigest,
}

impl Account {
    pub fn new(number: AccountNumber, owner: AccountOwner, balance: Money, pin: PinDigest) -> Self {
        Self {
            number,
            owner,
            balance,
            pin,
        }
    }

    pub fn open(
        number: AccountNumber,
        owner: AccountOwner,
        initial_balance: Money,
        pin: PinDigest,
    ) -> error_stack::Result<Self, KernelError> {
        if initial_balance.is_negative() {
            return Err(Report::new(KernelError::InvalidAmount)
                .attach_printable("Initial balance must not be negative"));
        }
        Ok(Self::new(number, owner, initial_balance, pin))
    }

    pub fn deposit(&mut self, amount: &Money) -> error_stack::Result<(), KernelError> {
        ensure_positive(amount)?;
        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            Report::new(KernelError::InvalidAmount).attach_printable("Balance overflow")
        })?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: &Money) -> error_stack::Result<(), KernelError> {
        ensure_positive(amount)?;
        if amount > &self.balance {
            return Err(Report::new(KernelError::InsufficientFunds).attach_printable(format!(
                "Account {} holds {}, requested {}",
                self.number.as_ref(),
                self.balance.as_ref(),
                amount.as_ref()
            )));
        }
        self.balance = self.balance.checked_sub(amount).ok_or_else(|| {
            Report::new(KernelError::InsufficientFunds).attach_printable("Balance underflow")
        })?;
        Ok(())
    }
}

/// Deposits and withdrawals only move strictly positive amounts.
pub fn ensure_positive(amount: &Money) -> error_stack::Result<(), KernelError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(Report::new(KernelError::InvalidAmount)
            .attach_printable(format!("{} is not a positive amount", amount.as_ref())))
    }
}
