// ⚠️ Account Errors - Domain failure taxonomy
// The Display text of every variant is user-facing and must stay stable.

use thiserror::Error;

// ============================================================================
// ACCOUNT ERROR
// ============================================================================

/// Every recoverable failure an account or the bank service can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Amount, limit or rate argument was zero or negative
    #[error("Money amount must be greater than zero")]
    InvalidAmount,

    /// Savings withdrawal would drive the balance below zero
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Checking withdrawal would exceed the overdraft limit
    #[error("Limit reached")]
    LimitReached,

    #[error("Interest rate must be greater than zero")]
    InvalidInterestRate,

    /// Identifier not present in the registry
    #[error("Invalid account number")]
    AccountNotFound,

    /// Operation needs a checking account but got a savings one
    #[error("Wrong account type")]
    WrongAccountType,
}

pub type Result<T> = std::result::Result<T, AccountError>;

// ============================================================================
// TESTS
// ============================================================================
