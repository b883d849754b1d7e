use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Account, AccountNumber, AccountOwner};
use crate::KernelError;

#[async_trait::async_trait]
pub trait AccountQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_number(
        &self,
        con: &mut Self::Transaction,
        number: &AccountNumber,
    ) -> error_stack::Result<Option<Account>, KernelError>;
    async fn find_by_owner(
        &self,
        con: &mut Self::Transaction,
        owner: &AccountOwner,
    ) -> error_stack::Result<Option<Account>, KernelError>;
    /// Every account, oldest first.
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Account>, KernelError>;
}

pub trait DependOnAccountQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type AccountQuery: AccountQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn account_query(&self) -> &Self::AccountQuery;
}
