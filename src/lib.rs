// Bank Ledger - Core Library
// Account model plus the service that owns and operates on accounts

pub mod config;
pub mod entities;
pub mod error;
pub mod service;

// Re-export commonly used types
pub use config::{ConfigError, LedgerConfig};
pub use entities::{Account, AccountType, InterestRate};
pub use error::{AccountError, Result};
pub use service::{AccountSummary, BankService};
