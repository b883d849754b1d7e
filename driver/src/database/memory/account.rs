use error_stack::Report;

use kernel::interface::query::AccountQuery;
use kernel::interface::update::AccountModifier;
use kernel::prelude::entity::{Account, AccountNumber, AccountOwner};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryAccountRepository;

fn not_found(number: &AccountNumber) -> Report<KernelError> {
    Report::new(KernelError::NotFound)
        .attach_printable(format!("accounts.number = {}", number.as_ref()))
}

#[async_trait::async_trait]
impl AccountQuery for InMemoryAccountRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_number(
        &self,
        con: &mut InMemoryTransaction,
        number: &AccountNumber,
    ) -> error_stack::Result<Option<Account>, KernelError> {
        Ok(con
            .tables()
            .accounts
            .iter()
            .find(|account| account.number() == number)
            .cloned())
    }

    async fn find_by_owner(
        &self,
        con: &mut InMemoryTransaction,
        owner: &AccountOwner,
    ) -> error_stack::Result<Option<Account>, KernelError> {
        Ok(con
            .tables()
            .accounts
            .iter()
            .find(|account| account.owner() == owner)
            .cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Account>, KernelError> {
        Ok(con.tables().accounts.clone())
    }
}

#[async_trait::async_trait]
impl AccountModifier for InMemoryAccountRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        account: &Account,
    ) -> error_stack::Result<(), KernelError> {
        let accounts = &mut con.tables_mut().accounts;
        if accounts.iter().any(|row| row.number() == account.number()) {
            return Err(Report::new(KernelError::DuplicateKey)
                .attach_printable(format!("accounts.number = {}", account.number().as_ref())));
        }
        if accounts.iter().any(|row| row.owner() == account.owner()) {
            return Err(Report::new(KernelError::DuplicateKey)
                .attach_printable(format!("accounts.owner = {}", account.owner().as_ref())));
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        account: &Account,
    ) -> error_stack::Result<(), KernelError> {
        let row = con
            .tables_mut()
            .accounts
            .iter_mut()
            .find(|row| row.number() == account.number())
            .ok_or_else(|| not_found(account.number()))?;
        *row = account.clone();
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        number: &AccountNumber,
    ) -> error_stack::Result<(), KernelError> {
        let accounts = &mut con.tables_mut().accounts;
        let before = accounts.len();
        accounts.retain(|row| row.number() != number);
        if accounts.len() == before {
            return Err(not_found(number));
        }
        Ok(())
    }
}
