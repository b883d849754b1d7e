pub mod search;
pub mod service;
pub mod transfer;
