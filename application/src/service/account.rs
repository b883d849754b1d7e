use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::identity::{DependOnIdentityGenerator, IdentityGenerator};
use kernel::interface::query::{AccountQuery, DependOnAccountQuery};
use kernel::interface::security::{DependOnPinHasher, PinHasher};
use kernel::interface::update::{AccountModifier, DependOnAccountModifier};
use kernel::prelude::entity::{ensure_positive, Account, AccountNumber, AccountOwner, Money, Pin};
use kernel::KernelError;

use crate::search::Keyword;
use crate::service::{identity_exhausted, not_found, IDENTITY_ATTEMPTS};
use crate::transfer::{
    AccountDto, AmountDto, CreateAccountDto, DeleteAccountDto, GetAccountDto, SearchDto,
    VerifyPinDto,
};

#[async_trait::async_trait]
pub trait CreateAccountService:
    'static
    + Sync
    + Send
    + DependOnAccountQuery
    + DependOnAccountModifier
    + DependOnIdentityGenerator
    + DependOnPinHasher
{
    async fn create_account(
        &self,
        dto: CreateAccountDto,
    ) -> error_stack::Result<AccountDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let owner = AccountOwner::new(dto.owner);
        if self
            .account_query()
            .find_by_owner(&mut connection, &owner)
            .await?
            .is_some()
        {
            return Err(Report::new(KernelError::DuplicateKey)
                .attach_printable(format!("Owner {} already holds an account", owner.as_ref())));
        }
        let digest = self.pin_hasher().hash(&Pin::new(dto.pin))?;

        let mut number = None;
        for _ in 0..IDENTITY_ATTEMPTS {
            let candidate = self.identity_generator().account_number();
            let taken = self
                .account_query()
                .find_by_number(&mut connection, &candidate)
                .await?
                .is_some();
            if !taken {
                number = Some(candidate);
                break;
            }
            tracing::warn!(number = %candidate.as_ref(), "account number collision");
        }
        let number = number.ok_or_else(|| identity_exhausted("account number"))?;

        let account = Account::open(number, owner, Money::new(dto.initial_balance), digest)?;
        self.account_modifier().create(&mut connection, &account).await?;
        connection.commit().await?;

        tracing::info!(number = %account.number().as_ref(), "account opened");
        Ok(AccountDto::from(account))
    }
}

impl<T> CreateAccountService for T where
    T: DependOnAccountQuery + DependOnAccountModifier + DependOnIdentityGenerator + DependOnPinHasher
{
}

#[async_trait::async_trait]
pub trait GetAccountService: 'static + Sync + Send + DependOnAccountQuery {
    async fn get_balance(&self, dto: GetAccountDto) -> error_stack::Result<AccountDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let number = AccountNumber::new(dto.number);
        let account = self
            .account_query()
            .find_by_number(&mut connection, &number)
            .await?
            .ok_or_else(|| not_found(format!("Account {}", number.as_ref())))?;
        connection.commit().await?;

        Ok(AccountDto::from(account))
    }
}

impl<T> GetAccountService for T where T: DependOnAccountQuery {}

#[async_trait::async_trait]
pub trait UpdateBalanceService:
    'static + Sync + Send + DependOnAccountQuery + DependOnAccountModifier
{
    async fn deposit(&self, dto: AmountDto) -> error_stack::Result<AccountDto, KernelError> {
        let amount = Money::new(dto.amount);
        ensure_positive(&amount)?;
        let mut connection = self.database_connection().transact().await?;

        let number = AccountNumber::new(dto.number);
        let mut account = self
            .account_query()
            .find_by_number(&mut connection, &number)
            .await?
            .ok_or_else(|| not_found(format!("Account {}", number.as_ref())))?;
        account.deposit(&amount)?;
        self.account_modifier().update(&mut connection, &account).await?;
        connection.commit().await?;

        tracing::info!(number = %number.as_ref(), amount = %amount.as_ref(), "deposit");
        Ok(AccountDto::from(account))
    }

    /// Fails with `InsufficientFunds` rather than leave a negative balance.
    async fn withdraw(&self, dto: AmountDto) -> error_stack::Result<AccountDto, KernelError> {
        let amount = Money::new(dto.amount);
        ensure_positive(&amount)?;
        let mut connection = self.database_connection().transact().await?;

        let number = AccountNumber::new(dto.number);
        let mut account = self
            .account_query()
            .find_by_number(&mut connection, &number)
            .await?
            .ok_or_else(|| not_found(format!("Account {}", number.as_ref())))?;
        account.withdraw(&amount)?;
        self.account_modifier().update(&mut connection, &account).await?;
        connection.commit().await?;

        tracing::info!(number = %number.as_ref(), amount = %amount.as_ref(), "withdrawal");
        Ok(AccountDto::from(account))
    }
}

impl<T> UpdateBalanceService for T where T: DependOnAccountQuery + DependOnAccountModifier {}

#[async_trait::async_trait]
pub trait VerifyPinService: 'static + Sync + Send + DependOnAccountQuery + DependOnPinHasher {
    async fn verify_pin(&self, dto: VerifyPinDto) -> error_stack::Result<bool, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let number = AccountNumber::new(dto.number);
        let account = self
            .account_query()
            .find_by_number(&mut connection, &number)
            .await?
            .ok_or_else(|| not_found(format!("Account {}", number.as_ref())))?;
        connection.commit().await?;

        let verified = self.pin_hasher().verify(account.pin(), &Pin::new(dto.pin));
        if !verified {
            tracing::warn!(number = %number.as_ref(), "pin mismatch");
        }
        Ok(verified)
    }
}

impl<T> VerifyPinService for T where T: DependOnAccountQuery + DependOnPinHasher {}

#[async_trait::async_trait]
pub trait DeleteAccountService:
    'static + Sync + Send + DependOnAccountQuery + DependOnAccountModifier
{
    async fn close_account(&self, dto: DeleteAccountDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let number = AccountNumber::new(dto.number);
        self.account_query()
            .find_by_number(&mut connection, &number)
            .await?
            .ok_or_else(|| not_found(format!("Account {}", number.as_ref())))?;
        self.account_modifier().delete(&mut connection, &number).await?;
        connection.commit().await?;

        tracing::info!(number = %number.as_ref(), "account closed");
        Ok(())
    }
}

impl<T> DeleteAccountService for T where T: DependOnAccountQuery + DependOnAccountModifier {}

#[async_trait::async_trait]
pub trait SearchAccountService: 'static + Sync + Send + DependOnAccountQuery {
    async fn search_accounts(
        &self,
        dto: SearchDto,
    ) -> error_stack::Result<Vec<AccountDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let accounts = self.account_query().find_all(&mut connection).await?;
        connection.commit().await?;

        Ok(Keyword::new(dto.keyword)
            .filter(accounts)
            .into_iter()
            .map(AccountDto::from)
            .collect())
    }
}

impl<T> SearchAccountService for T where T: DependOnAccountQuery {}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use kernel::KernelError;

    use crate::service::{
        CreateAccountService, DeleteAccountService, GetAccountService, SearchAccountService,
        UpdateBalanceService, VerifyPinService,
    };
    use crate::test::TestModule;
    use crate::transfer::{
        AccountDto, AmountDto, CreateAccountDto, DeleteAccountDto, GetAccountDto, SearchDto,
        VerifyPinDto,
    };

    async fn open(
        module: &TestModule,
        owner: &str,
        balance: Decimal,
    ) -> error_stack::Result<AccountDto, KernelError> {
        module
            .create_account(CreateAccountDto {
                owner: owner.into(),
                initial_balance: balance,
                pin: "1234".into(),
            })
            .await
    }

    fn amount(account: &AccountDto, amount: Decimal) -> AmountDto {
        AmountDto {
            number: account.number.clone(),
            amount,
        }
    }

    #[tokio::test]
    async fn create_account() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let account = open(&module, "Leto", dec!(100)).await?;
        assert_eq!(account.number.len(), 10);
        assert!(account.number.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(account.balance, dec!(100));

        let error = open(&module, "Leto", dec!(1)).await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::DuplicateKey);

        let error = open(&module, "Jessica", dec!(-1)).await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::InvalidAmount);
        Ok(())
    }

    #[tokio::test]
    async fn deposit_and_withdraw() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let account = open(&module, "Leto", dec!(100)).await?;

        let updated = module.deposit(amount(&account, dec!(20.50))).await?;
        assert_eq!(updated.balance, dec!(120.50));
        let updated = module.withdraw(amount(&account, dec!(120.50))).await?;
        assert_eq!(updated.balance, dec!(0));

        let error = module.withdraw(amount(&account, dec!(0.01))).await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::InsufficientFunds);
        let error = module.deposit(amount(&account, dec!(0))).await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::InvalidAmount);
        let error = module.withdraw(amount(&account, dec!(-3))).await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::InvalidAmount);

        let found = module
            .get_balance(GetAccountDto {
                number: account.number.clone(),
            })
            .await?;
        assert_eq!(found.balance, dec!(0));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_account() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let missing = AmountDto {
            number: "0000000000".into(),
            amount: dec!(1),
        };
        let error = module.deposit(missing).await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NotFound);

        for amount in [dec!(0), dec!(-5)] {
            let bad = || AmountDto {
                number: "0000000000".into(),
                amount,
            };
            let error = module.deposit(bad()).await.unwrap_err();
            assert_eq!(error.current_context(), &KernelError::InvalidAmount);
            let error = module.withdraw(bad()).await.unwrap_err();
            assert_eq!(error.current_context(), &KernelError::InvalidAmount);
        }
        let error = module
            .verify_pin(VerifyPinDto {
                number: "0000000000".into(),
                pin: "1234".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn verify_pin() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let account = open(&module, "Leto", dec!(10)).await?;

        let verified = module
            .verify_pin(VerifyPinDto {
                number: account.number.clone(),
                pin: "1234".into(),
            })
            .await?;
        assert!(verified);
        let verified = module
            .verify_pin(VerifyPinDto {
                number: account.number.clone(),
                pin: "4321".into(),
            })
            .await?;
        assert!(!verified);
        Ok(())
    }

    #[tokio::test]
    async fn close_and_search() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let leto = open(&module, "Leto Atreides", dec!(10)).await?;
        let paul = open(&module, "Paul Atreides", dec!(10)).await?;
        open(&module, "Vladimir Harkonnen", dec!(10)).await?;

        let found = module
            .search_accounts(SearchDto {
                keyword: "atreides".into(),
            })
            .await?;
        assert_eq!(found, vec![leto.clone(), paul.clone()]);

        module
            .close_account(DeleteAccountDto {
                number: leto.number.clone(),
            })
            .await?;
        let found = module
            .search_accounts(SearchDto {
                keyword: "ATREIDES".into(),
            })
            .await?;
        assert_eq!(found, vec![paul]);

        let error = module
            .close_account(DeleteAccountDto {
                number: leto.number,
            })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NotFound);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_withdrawals_never_overdraw() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let account = open(&module, "Leto", dec!(100)).await?;

        let tasks = (0..2)
            .map(|_| {
                let module = module.clone();
                let dto = amount(&account, dec!(60));
                tokio::spawn(async move { module.withdraw(dto).await })
            })
            .collect::<Vec<_>>();

        let mut succeeded = 0;
        for task in tasks {
            match task.await.expect("withdraw task panicked") {
                Ok(_) => succeeded += 1,
                Err(error) => {
                    assert_eq!(error.current_context(), &KernelError::InsufficientFunds)
                }
            }
        }
        assert_eq!(succeeded, 1);

        let found = module
            .get_balance(GetAccountDto {
                number: account.number,
            })
            .await?;
        assert_eq!(found.balance, dec!(40));
        Ok(())
    }
}
