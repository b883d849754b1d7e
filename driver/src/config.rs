use std::str::FromStr;
use std::time::Duration as StdDuration;

use error_stack::{Report, ResultExt};
use kernel::prelude::entity::Money;
use kernel::prelude::policy::{default_fine_per_day, LedgerPolicy, DEFAULT_LOAN_DAYS};
use kernel::KernelError;
use rust_decimal::Decimal;
use time::Duration;

use crate::optional_env;
use crate::security::BcryptPinHasher;

static LOAN_DURATION_DAYS: &str = "LOAN_DURATION_DAYS";
static FINE_PER_DAY: &str = "FINE_PER_DAY";
static STORE_LOCK_TIMEOUT_MS: &str = "STORE_LOCK_TIMEOUT_MS";
static PIN_HASH_COST: &str = "PIN_HASH_COST";

pub const DEFAULT_STORE_LOCK_TIMEOUT: StdDuration = StdDuration::from_secs(5);

/// Reads the lending policy, falling back to the defaults for unset variables.
pub fn ledger_policy_from_env() -> error_stack::Result<LedgerPolicy, KernelError> {
    let loan_days = optional_env(LOAN_DURATION_DAYS)?;
    let fine = optional_env(FINE_PER_DAY)?;
    parse_policy(loan_days.as_deref(), fine.as_deref())
}

pub fn store_lock_timeout_from_env() -> error_stack::Result<StdDuration, KernelError> {
    match optional_env(STORE_LOCK_TIMEOUT_MS)? {
        None => Ok(DEFAULT_STORE_LOCK_TIMEOUT),
        Some(raw) => parse::<u64>(STORE_LOCK_TIMEOUT_MS, &raw).map(StdDuration::from_millis),
    }
}

/// bcrypt work factor for stored PINs; unset means `bcrypt::DEFAULT_COST`.
pub fn pin_hasher_from_env() -> error_stack::Result<BcryptPinHasher, KernelError> {
    match optional_env(PIN_HASH_COST)? {
        None => Ok(BcryptPinHasher::default()),
        Some(raw) => BcryptPinHasher::new(parse::<u32>(PIN_HASH_COST, &raw)?),
    }
}

pub fn parse_policy(
    loan_days: Option<&str>,
    fine_per_day: Option<&str>,
) -> error_stack::Result<LedgerPolicy, KernelError> {
    let loan_days = match loan_days {
        None => DEFAULT_LOAN_DAYS,
        Some(raw) => parse::<i64>(LOAN_DURATION_DAYS, raw)?,
    };
    if loan_days <= 0 {
        return Err(Report::new(KernelError::Internal)
            .attach_printable(format!("{LOAN_DURATION_DAYS} must be positive, got {loan_days}")));
    }

    let fine_per_day = match fine_per_day {
        None => default_fine_per_day(),
        Some(raw) => Money::new(parse::<Decimal>(FINE_PER_DAY, raw)?),
    };
    if fine_per_day.is_negative() {
        return Err(Report::new(KernelError::Internal)
            .attach_printable(format!("{FINE_PER_DAY} must not be negative")));
    }

    Ok(LedgerPolicy::new(Duration::days(loan_days), fine_per_day))
}

fn parse<T>(key: &str, raw: &str) -> error_stack::Result<T, KernelError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Invalid value for `{key}`: {raw}"))
}
