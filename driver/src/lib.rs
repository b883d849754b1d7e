use error_stack::{Report, ResultExt};
use kernel::KernelError;

pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod identity;
pub mod security;

pub(crate) fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to read env `{key}`"))
}

pub(crate) fn optional_env(key: &str) -> error_stack::Result<Option<String>, KernelError> {
    match dotenvy::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(error) => Err(Report::new(error)
            .change_context(KernelError::Internal)
            .attach_printable(format!("Failed to read env `{key}`"))),
    }
}
