use rust_decimal::Decimal;

use kernel::prelude::entity::{Account, DestructAccount};

/// The PIN digest never leaves the ledger.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AccountDto {
    pub number: String,
    pub owner: String,
    pub balance: Decimal,
}

impl From<Account> for AccountDto {
    fn from(value: Account) -> Self {
        let DestructAccount {
            number,
            owner,
            balance,
            pin: _,
        } = value.into_destruct();
        Self {
            number: number.into(),
            owner: owner.into(),
            balance: balance.into(),
        }
    }
}

pub struct GetAccountDto {
    pub number: String,
}

pub struct CreateAccountDto {
    pub owner: String,
    pub initial_balance: Decimal,
    pub pin: String,
}

pub struct AmountDto {
    pub number: String,
    pub amount: Decimal,
}

pub struct VerifyPinDto {
    pub number: String,
    pub pin: String,
}

pub struct DeleteAccountDto {
    pub number: String,
}
