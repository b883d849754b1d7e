use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    NotFound,
    DuplicateKey,
    Unavailable,
    InsufficientFunds,
    InvalidAmount,
    Concurrency,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound => write!(f, "Referenced entity not found"),
            KernelError::DuplicateKey => write!(f, "Uniqueness constraint violated"),
            KernelError::Unavailable => write!(f, "Entity is not in a state permitting this"),
            KernelError::InsufficientFunds => write!(f, "Insufficient funds"),
            KernelError::InvalidAmount => write!(f, "Amount must be positive"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
