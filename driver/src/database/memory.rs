use std::sync::Arc;
use std::time::Duration;

use error_stack::Report;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::error::Elapsed;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::prelude::entity::{Account, Book, Loan, Member};
use kernel::KernelError;

use crate::config::DEFAULT_STORE_LOCK_TIMEOUT;
use crate::error::ConvertError;

pub use self::{account::*, book::*, loan::*, member::*};

mod account;
mod book;
mod loan;
mod member;

/// Rows in insertion order.
#[derive(Debug, Clone, Default)]
struct Tables {
    books: Vec<Book>,
    members: Vec<Member>,
    loans: Vec<Loan>,
    accounts: Vec<Account>,
}

/// Process-local store. Transactions are serialized by a single lock. The first
/// write takes a private copy of the tables, which replaces the shared state on commit.
#[derive(Clone)]
pub struct InMemoryDatabase {
    tables: Arc<Mutex<Tables>>,
    lock_timeout: Duration,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::with_lock_timeout(DEFAULT_STORE_LOCK_TIMEOUT)
    }

    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            lock_timeout,
        }
    }
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let published = tokio::time::timeout(self.lock_timeout, self.tables.clone().lock_owned())
            .await
            .convert_error()?;
        tracing::trace!("in-memory transaction started");
        Ok(InMemoryTransaction {
            published,
            working: None,
        })
    }
}

pub struct InMemoryTransaction {
    published: OwnedMutexGuard<Tables>,
    working: Option<Tables>,
}

impl InMemoryTransaction {
    fn tables(&self) -> &Tables {
        self.working.as_ref().unwrap_or(&*self.published)
    }

    fn tables_mut(&mut self) -> &mut Tables {
        let published: &Tables = &self.published;
        self.working.get_or_insert_with(|| Tables::clone(published))
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let Self {
            mut published,
            working,
        } = self;
        if let Some(working) = working {
            *published = working;
        }
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

impl<T> ConvertError for Result<T, Elapsed> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            Report::new(error)
                .change_context(KernelError::Timeout)
                .attach_printable("Timed out waiting for the in-memory store lock")
        })
    }
}
