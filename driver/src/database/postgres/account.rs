use rust_decimal::Decimal;
use sqlx::PgConnection;

use kernel::interface::query::AccountQuery;
use kernel::interface::update::AccountModifier;
use kernel::prelude::entity::{Account, AccountNumber, AccountOwner, Money, PinDigest};
use kernel::KernelError;

use crate::database::postgres::{ensure_affected, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresAccountRepository;

#[async_trait::async_trait]
impl AccountQuery for PostgresAccountRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_number(
        &self,
        con: &mut PostgresTransaction,
        number: &AccountNumber,
    ) -> error_stack::Result<Option<Account>, KernelError> {
        PgAccountInternal::find_by_number(con, number).await
    }

    async fn find_by_owner(
        &self,
        con: &mut PostgresTransaction,
        owner: &AccountOwner,
    ) -> error_stack::Result<Option<Account>, KernelError> {
        PgAccountInternal::find_by_owner(con, owner).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Account>, KernelError> {
        PgAccountInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl AccountModifier for PostgresAccountRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        account: &Account,
    ) -> error_stack::Result<(), KernelError> {
        PgAccountInternal::create(con, account).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        account: &Account,
    ) -> error_stack::Result<(), KernelError> {
        PgAccountInternal::update(con, account).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        number: &AccountNumber,
    ) -> error_stack::Result<(), KernelError> {
        PgAccountInternal::delete(con, number).await
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    number: String,
    owner: String,
    balance: Decimal,
    pin_digest: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account::new(
            AccountNumber::new(row.number),
            AccountOwner::new(row.owner),
            Money::new(row.balance),
            PinDigest::new(row.pin_digest),
        )
    }
}

pub(in crate::database) struct PgAccountInternal;

impl PgAccountInternal {
    /// Concurrent withdrawals queue up behind this row lock.
    async fn find_by_number(
        con: &mut PgConnection,
        number: &AccountNumber,
    ) -> error_stack::Result<Option<Account>, KernelError> {
        let row = sqlx::query_as::<_, AccountRow>(
            // language=postgresql
            r#"
            SELECT number, owner, balance, pin_digest
            FROM accounts
            WHERE number = $1
            FOR UPDATE
            "#,
        )
        .bind(number.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Account::from))
    }

    async fn find_by_owner(
        con: &mut PgConnection,
        owner: &AccountOwner,
    ) -> error_stack::Result<Option<Account>, KernelError> {
        let row = sqlx::query_as::<_, AccountRow>(
            // language=postgresql
            r#"
            SELECT number, owner, balance, pin_digest
            FROM accounts
            WHERE owner = $1
            "#,
        )
        .bind(owner.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Account::from))
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Account>, KernelError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            // language=postgresql
            r#"
            SELECT number, owner, balance, pin_digest
            FROM accounts
            ORDER BY seq
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn create(con: &mut PgConnection, account: &Account) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO accounts (number, owner, balance, pin_digest)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(account.number().as_ref())
        .bind(account.owner().as_ref())
        .bind(*account.balance().as_ref())
        .bind(account.pin().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, account: &Account) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE accounts
            SET owner = $2, balance = $3, pin_digest = $4
            WHERE number = $1
            "#,
        )
        .bind(account.number().as_ref())
        .bind(account.owner().as_ref())
        .bind(*account.balance().as_ref())
        .bind(account.pin().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        ensure_affected(result, "accounts")
    }

    async fn delete(
        con: &mut PgConnection,
        number: &AccountNumber,
    ) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM accounts
            WHERE number = $1
            "#,
        )
        .bind(number.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        ensure_affected(result, "accounts")
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::AccountQuery;
    use kernel::interface::update::AccountModifier;
    use kernel::prelude::entity::{Account, AccountNumber, AccountOwner, Money, PinDigest};
    use kernel::KernelError;

    use crate::database::postgres::{PostgresAccountRepository, PostgresDatabase};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let number = AccountNumber::new(Uuid::new_v4().simple().to_string());
        let owner = AccountOwner::new(Uuid::new_v4().to_string());
        let mut account = Account::open(
            number.clone(),
            owner.clone(),
            Money::new(dec!(100.25)),
            PinDigest::new("digest"),
        )?;
        PostgresAccountRepository.create(&mut con, &account).await?;

        let found = PostgresAccountRepository
            .find_by_owner(&mut con, &owner)
            .await?;
        assert_eq!(found, Some(account.clone()));

        account.withdraw(&Money::new(dec!(0.25)))?;
        PostgresAccountRepository.update(&mut con, &account).await?;
        let found = PostgresAccountRepository
            .find_by_number(&mut con, &number)
            .await?;
        assert_eq!(found, Some(account));

        PostgresAccountRepository.delete(&mut con, &number).await?;
        let error = PostgresAccountRepository
            .delete(&mut con, &number)
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NotFound);

        con.roll_back().await?;
        Ok(())
    }
}
