use std::sync::Arc;

use driver::clock::SystemClock;
use driver::config::{ledger_policy_from_env, pin_hasher_from_env};
use driver::database::{
    PostgresAccountRepository, PostgresBookRepository, PostgresDatabase, PostgresLoanRepository,
    PostgresMemberRepository,
};
use driver::identity::RandomIdentityGenerator;
use driver::security::BcryptPinHasher;
use kernel::interface::clock::DependOnClock;
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::identity::DependOnIdentityGenerator;
use kernel::interface::query::{
    DependOnAccountQuery, DependOnBookQuery, DependOnLoanQuery, DependOnMemberQuery,
};
use kernel::interface::security::DependOnPinHasher;
use kernel::interface::update::{
    DependOnAccountModifier, DependOnBookModifier, DependOnLoanModifier, DependOnMemberModifier,
};
use kernel::prelude::policy::{DependOnLedgerPolicy, LedgerPolicy};
use kernel::KernelError;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }

    pub fn handler(&self) -> &Handler {
        &self.0
    }
}

/// Every ledger operation is available on the handler through the service traits.
pub struct Handler {
    pgpool: PostgresDatabase,
    policy: LedgerPolicy,
    clock: SystemClock,
    identity: RandomIdentityGenerator,
    hasher: BcryptPinHasher,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        let policy = ledger_policy_from_env()?;
        let hasher = pin_hasher_from_env()?;
        tracing::info!(
            loan_days = policy.loan_duration().whole_days(),
            fine_per_day = %policy.fines().per_day().as_ref(),
            "ledger policy loaded"
        );
        tracing::info!(cost = hasher.cost(), "pin hasher ready");

        Ok(Self {
            pgpool,
            policy,
            clock: SystemClock,
            identity: RandomIdentityGenerator,
            hasher,
        })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.pgpool
    }
}

impl DependOnBookQuery for Handler {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for Handler {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl DependOnMemberQuery for Handler {
    type MemberQuery = PostgresMemberRepository;
    fn member_query(&self) -> &Self::MemberQuery {
        &PostgresMemberRepository
    }
}

impl DependOnMemberModifier for Handler {
    type MemberModifier = PostgresMemberRepository;
    fn member_modifier(&self) -> &Self::MemberModifier {
        &PostgresMemberRepository
    }
}

impl DependOnLoanQuery for Handler {
    type LoanQuery = PostgresLoanRepository;
    fn loan_query(&self) -> &Self::LoanQuery {
        &PostgresLoanRepository
    }
}

impl DependOnLoanModifier for Handler {
    type LoanModifier = PostgresLoanRepository;
    fn loan_modifier(&self) -> &Self::LoanModifier {
        &PostgresLoanRepository
    }
}

impl DependOnAccountQuery for Handler {
    type AccountQuery = PostgresAccountRepository;
    fn account_query(&self) -> &Self::AccountQuery {
        &PostgresAccountRepository
    }
}

impl DependOnAccountModifier for Handler {
    type AccountModifier = PostgresAccountRepository;
    fn account_modifier(&self) -> &Self::AccountModifier {
        &PostgresAccountRepository
    }
}

impl DependOnClock for Handler {
    type Clock = SystemClock;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}

impl DependOnIdentityGenerator for Handler {
    type IdentityGenerator = RandomIdentityGenerator;
    fn identity_generator(&self) -> &Self::IdentityGenerator {
        &self.identity
    }
}

impl DependOnPinHasher for Handler {
    type PinHasher = BcryptPinHasher;
    fn pin_hasher(&self) -> &Self::PinHasher {
        &self.hasher
    }
}

impl DependOnLedgerPolicy for Handler {
    fn ledger_policy(&self) -> &LedgerPolicy {
        &self.policy
    }
}
