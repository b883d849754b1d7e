use std::ops::{Deref, DerefMut};

use error_stack::{Report, ResultExt};
use sqlx::migrate::MigrateError;
use sqlx::postgres::{PgPoolOptions, PgQueryResult};
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::config::store_lock_timeout_from_env;
use crate::env;
use crate::error::ConvertError;

pub use self::{account::*, book::*, loan::*, member::*};

mod account;
mod book;
mod loan;
mod member;

static POSTGRES_URL: &str = "POSTGRES_URL";
static ONE_OPEN_LOAN_PER_BOOK: &str = "loans_one_open_per_book";
static SERIALIZATION_FAILURE: &str = "40001";
static DEADLOCK_DETECTED: &str = "40P01";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let acquire_timeout = store_lock_timeout_from_env()?;
        let pool = PgPoolOptions::new()
            .acquire_timeout(acquire_timeout)
            .connect(&url)
            .await
            .convert_error()?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .convert_error()?;
        tracing::info!(?acquire_timeout, "postgres store ready");
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(transaction))
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Update and delete address exactly one row; none means the key is unknown.
fn ensure_affected(
    result: PgQueryResult,
    table: &'static str,
) -> error_stack::Result<(), KernelError> {
    if result.rows_affected() == 0 {
        return Err(Report::new(KernelError::NotFound)
            .attach_printable(format!("No matching row in {table}")));
    }
    Ok(())
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(db) if db.constraint() == Some(ONE_OPEN_LOAN_PER_BOOK) => {
                    KernelError::Unavailable
                }
                Error::Database(db) if db.is_unique_violation() => KernelError::DuplicateKey,
                Error::Database(db)
                    if db.code().as_deref() == Some(SERIALIZATION_FAILURE)
                        || db.code().as_deref() == Some(DEADLOCK_DETECTED) =>
                {
                    KernelError::Concurrency
                }
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}

impl<T> ConvertError for Result<T, MigrateError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| "Failed to apply migrations")
    }
}
