// 💳 Account Entity - Checking and savings accounts with per-type withdrawal policy
//
// "Account UUID is IDENTITY (never changes), balance is a VALUE (changes)"
//
// - Identity: UUID assigned at creation, used for equality and lookups
// - Variant data lives in AccountKind (checking carries its overdraft limit)
// - The savings interest rate is NOT stored here: one rate applies to every
//   savings account, so the owner of the registry passes it in

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AccountError, Result};

// ============================================================================
// ACCOUNT TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Everyday account with an overdraft limit
    Checking,

    /// Interest-bearing account, never overdrawn
    Savings,
}

impl AccountType {
    /// Lowercase name, as shown in account details
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strictly positive; NaN is rejected too
fn is_positive(value: f64) -> bool {
    value > 0.0
}

/// Float with a mandatory fractional part: `150.0`, `0.2`, `1.0e16`
fn format_amount(value: f64) -> String {
    let text = format!("{:?}", value);
    match text.find('e') {
        Some(pos) if !text[..pos].contains('.') => format!("{}.0{}", &text[..pos], &text[pos..]),
        _ => text,
    }
}

// ============================================================================
// INTEREST RATE
// ============================================================================

/// Interest multiplier shared by all savings accounts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct InterestRate(f64);

impl InterestRate {
    pub const DEFAULT: f64 = 0.2;

    /// Validated rate; zero and negative rates are rejected
    pub fn new(rate: f64) -> Result<Self> {
        if !is_positive(rate) {
            return Err(AccountError::InvalidInterestRate);
        }
        Ok(InterestRate(rate))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for InterestRate {
    fn default() -> Self {
        InterestRate(Self::DEFAULT)
    }
}

// ============================================================================
// ACCOUNT KIND
// ============================================================================

/// Variant-specific state of an account
#[derive(Debug, Clone, Copy, PartialEq)]
enum AccountKind {
    /// Overdraft ceiling: |balance - amount| may not exceed it on withdrawal
    Checking { limit: f64 },

    Savings,
}

impl AccountKind {
    fn account_type(&self) -> AccountType {
        match self {
            AccountKind::Checking { .. } => AccountType::Checking,
            AccountKind::Savings => AccountType::Savings,
        }
    }
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

/// A single customer account.
///
/// Balance starts at zero and only moves through [`Account::deposit`],
/// [`Account::withdraw`] and [`Account::provide_interest`]. Two accounts are
/// equal when their ids are equal.
#[derive(Debug, Clone)]
pub struct Account {
    id: Uuid,
    owner: String,
    balance: f64,
    kind: AccountKind,
    opened_at: DateTime<Utc>,
}

impl Account {
    fn new(owner: String, kind: AccountKind) -> Self {
        Account {
            id: Uuid::new_v4(),
            owner,
            balance: 0.0,
            kind,
            opened_at: Utc::now(),
        }
    }

    /// Create checking account with the given overdraft limit
    pub fn checking(owner: impl Into<String>, limit: f64) -> Self {
        Self::new(owner.into(), AccountKind::Checking { limit })
    }

    /// Create savings account
    pub fn savings(owner: impl Into<String>) -> Self {
        Self::new(owner.into(), AccountKind::Savings)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Overdraft limit, `None` for savings accounts
    pub fn limit(&self) -> Option<f64> {
        match self.kind {
            AccountKind::Checking { limit } => Some(limit),
            AccountKind::Savings => None,
        }
    }

    /// Check if account is overdrawn (negative balance)
    pub fn is_overdrawn(&self) -> bool {
        self.balance < 0.0
    }

    #[cfg(test)]
    pub(crate) fn set_balance(&mut self, balance: f64) {
        self.balance = balance;
    }

    /// Add money to the account
    pub fn deposit(&mut self, amount: f64) -> Result<()> {
        if !is_positive(amount) {
            return Err(AccountError::InvalidAmount);
        }

        self.balance += amount;
        Ok(())
    }

    /// Take money out of the account.
    ///
    /// Checking: fails with `LimitReached` when `|balance - amount| > limit`.
    /// The absolute value is intentional and compared regardless of sign.
    ///
    /// Savings: fails with `InsufficientFunds` when `balance < amount`.
    pub fn withdraw(&mut self, amount: f64) -> Result<()> {
        if !is_positive(amount) {
            return Err(AccountError::InvalidAmount);
        }

        match self.kind {
            AccountKind::Checking { limit } => {
                if (self.balance - amount).abs() > limit {
                    return Err(AccountError::LimitReached);
                }
            }
            AccountKind::Savings => {
                if self.balance < amount {
                    return Err(AccountError::InsufficientFunds);
                }
            }
        }

        self.balance -= amount;
        Ok(())
    }

    /// Replace the overdraft limit of a checking account
    pub fn set_limit(&mut self, new_limit: f64) -> Result<()> {
        match &mut self.kind {
            AccountKind::Checking { limit } => {
                if !is_positive(new_limit) {
                    return Err(AccountError::InvalidAmount);
                }
                *limit = new_limit;
                Ok(())
            }
            AccountKind::Savings => Err(AccountError::WrongAccountType),
        }
    }

    /// Move money from this checking account into `to`.
    ///
    /// Withdraws first and only deposits if the withdrawal succeeded. The two
    /// steps are not atomic: a failing deposit leaves the withdrawal in place.
    /// A deposit cannot fail today since withdraw already rejects non-positive
    /// amounts.
    pub fn transfer_to(&mut self, to: &mut Account, amount: f64) -> Result<()> {
        if self.account_type() != AccountType::Checking {
            return Err(AccountError::WrongAccountType);
        }

        self.withdraw(amount)?;
        to.deposit(amount)
    }

    /// Credit interest at `rate` to a savings account.
    ///
    /// Returns `false` and leaves checking accounts untouched.
    pub fn provide_interest(&mut self, rate: InterestRate) -> bool {
        match self.kind {
            AccountKind::Savings => {
                self.balance += self.balance * rate.value();
                true
            }
            AccountKind::Checking { .. } => false,
        }
    }

    /// Human-readable details.
    ///
    /// ```text
    /// Account details:
    /// Holder: Peter Parker
    /// Type: checking
    /// Balance: 150.0
    /// Limit: 500.0
    /// ```
    ///
    /// Savings accounts end with `Interest rate: <rate>` instead of the limit.
    /// Numbers always carry a fractional part, also in exponent form
    /// (`1.0e16`, never `1e16`).
    pub fn details(&self, rate: InterestRate) -> String {
        let variant_line = match self.kind {
            AccountKind::Checking { limit } => format!("Limit: {}", format_amount(limit)),
            AccountKind::Savings => format!("Interest rate: {}", format_amount(rate.value())),
        };

        format!(
            "Account details:\nHolder: {}\nType: {}\nBalance: {}\n{}\n",
            self.owner,
            self.account_type(),
            format_amount(self.balance),
            variant_line
        )
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Account {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn checking() -> Account {
        Account::checking("Peter Parker", 500.0)
    }

    fn savings() -> Account {
        Account::savings("Peter Parker")
    }

    #[test]
    fn test_account_creation() {
        let account = checking();

        assert!(!account.id().is_nil());
        assert_eq!(account.owner(), "Peter Parker");
        assert_eq!(account.balance(), 0.0);
        assert_eq!(account.account_type(), AccountType::Checking);
        assert_eq!(account.limit(), Some(500.0));

        let account = savings();
        assert_eq!(account.account_type(), AccountType::Savings);
        assert_eq!(account.limit(), None);
    }

    #[test]
    fn test_accounts_get_distinct_ids() {
        let a = checking();
        let b = checking();
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_account_type_names() {
        assert_eq!(AccountType::Checking.as_str(), "checking");
        assert_eq!(AccountType::Savings.to_string(), "savings");
        assert_eq!(
            serde_json::to_string(&AccountType::Savings).unwrap(),
            "\"savings\""
        );
    }

    // ------------------------------------------------------------------------
    // deposit
    // ------------------------------------------------------------------------

    #[test]
    fn test_deposit_positive_amount() {
        let mut account = checking();
        account.deposit(50.0).unwrap();
        assert_eq!(account.balance(), 50.0);

        let mut account = savings();
        account.deposit(50.0).unwrap();
        assert_eq!(account.balance(), 50.0);
    }

    #[test]
    fn test_deposit_rejects_non_positive_amount() {
        for mut account in [checking(), savings()] {
            account.deposit(10.0).unwrap();
            assert_eq!(account.deposit(0.0), Err(AccountError::InvalidAmount));
            assert_eq!(account.deposit(-50.0), Err(AccountError::InvalidAmount));
            assert_eq!(account.balance(), 10.0);
        }
    }

    // ------------------------------------------------------------------------
    // checking withdraw / limit / transfer
    // ------------------------------------------------------------------------

    #[test]
    fn test_checking_withdraw() {
        let mut account = checking();
        account.set_balance(100.0);
        account.withdraw(50.0).unwrap();
        assert_eq!(account.balance(), 50.0);
    }

    #[test]
    fn test_checking_withdraw_below_zero_within_limit() {
        let mut account = checking();
        account.withdraw(100.0).unwrap();
        assert_eq!(account.balance(), -100.0);
        assert!(account.is_overdrawn());
    }

    #[test]
    fn test_checking_withdraw_rejects_non_positive_amount() {
        let mut account = checking();
        assert_eq!(account.withdraw(0.0), Err(AccountError::InvalidAmount));
        assert_eq!(account.withdraw(-50.0), Err(AccountError::InvalidAmount));
        assert_eq!(account.balance(), 0.0);
    }

    #[test]
    fn test_checking_withdraw_beyond_limit() {
        let mut account = checking();
        let err = account.withdraw(600.0).unwrap_err();
        assert_eq!(err, AccountError::LimitReached);
        assert_eq!(err.to_string(), "Limit reached");
        assert_eq!(account.balance(), 0.0);
    }

    #[test]
    fn test_checking_withdraw_exactly_at_limit() {
        let mut account = checking();
        account.withdraw(500.0).unwrap();
        assert_eq!(account.balance(), -500.0);
        assert_eq!(account.withdraw(0.01), Err(AccountError::LimitReached));
    }

    #[test]
    fn test_checking_limit_rule_uses_absolute_value() {
        // |1000 - 100| = 900 > 500, rejected even though the result is positive
        let mut account = checking();
        account.set_balance(1000.0);
        assert_eq!(account.withdraw(100.0), Err(AccountError::LimitReached));
        assert_eq!(account.balance(), 1000.0);

        // |1000 - 600| = 400 <= 500
        account.withdraw(600.0).unwrap();
        assert_eq!(account.balance(), 400.0);
    }

    #[test]
    fn test_checking_scenario() {
        let mut account = checking();
        account.deposit(100.0).unwrap();
        assert_eq!(account.balance(), 100.0);
        account.withdraw(100.0).unwrap();
        assert_eq!(account.balance(), 0.0);
        assert_eq!(account.withdraw(1000.0), Err(AccountError::LimitReached));
        assert_eq!(account.balance(), 0.0);
        assert_eq!(account.withdraw(0.0), Err(AccountError::InvalidAmount));
        assert_eq!(account.withdraw(-1000.0), Err(AccountError::InvalidAmount));
    }

    #[test]
    fn test_set_limit() {
        let mut account = checking();
        account.set_limit(600.0).unwrap();
        assert_eq!(account.limit(), Some(600.0));

        assert_eq!(account.set_limit(0.0), Err(AccountError::InvalidAmount));
        assert_eq!(account.set_limit(-50.0), Err(AccountError::InvalidAmount));
        assert_eq!(account.limit(), Some(600.0));
    }

    #[test]
    fn test_set_limit_on_savings() {
        let mut account = savings();
        assert_eq!(account.set_limit(600.0), Err(AccountError::WrongAccountType));
    }

    #[test]
    fn test_transfer() {
        let mut from = checking();
        let mut to = Account::savings("Ave Ott");

        from.transfer_to(&mut to, 100.0).unwrap();

        assert_eq!(from.balance(), -100.0);
        assert_eq!(to.balance(), 100.0);
    }

    #[test]
    fn test_transfer_failures_leave_both_balances() {
        let mut from = checking();
        let mut to = Account::savings("Ave Ott");

        assert_eq!(from.transfer_to(&mut to, 0.0), Err(AccountError::InvalidAmount));
        assert_eq!(from.transfer_to(&mut to, -100.0), Err(AccountError::InvalidAmount));
        assert_eq!(from.transfer_to(&mut to, 600.0), Err(AccountError::LimitReached));

        assert_eq!(from.balance(), 0.0);
        assert_eq!(to.balance(), 0.0);
    }

    #[test]
    fn test_transfer_from_savings() {
        let mut from = savings();
        from.set_balance(100.0);
        let mut to = checking();

        assert_eq!(from.transfer_to(&mut to, 10.0), Err(AccountError::WrongAccountType));
        assert_eq!(from.balance(), 100.0);
    }

    // ------------------------------------------------------------------------
    // savings withdraw / interest
    // ------------------------------------------------------------------------

    #[test]
    fn test_savings_withdraw() {
        let mut account = savings();
        account.set_balance(100.0);
        account.withdraw(50.0).unwrap();
        assert_eq!(account.balance(), 50.0);

        account.withdraw(50.0).unwrap();
        assert_eq!(account.balance(), 0.0);
    }

    #[test]
    fn test_savings_withdraw_insufficient_funds() {
        let mut account = savings();
        let err = account.withdraw(600.0).unwrap_err();
        assert_eq!(err, AccountError::InsufficientFunds);
        assert_eq!(err.to_string(), "Insufficient funds");
        assert_eq!(account.balance(), 0.0);
    }

    #[test]
    fn test_savings_withdraw_rejects_non_positive_amount() {
        let mut account = savings();
        assert_eq!(account.withdraw(0.0), Err(AccountError::InvalidAmount));
        assert_eq!(account.withdraw(-50.0), Err(AccountError::InvalidAmount));
    }

    #[test]
    fn test_provide_interest() {
        let mut account = savings();
        account.set_balance(500.0);

        assert!(account.provide_interest(InterestRate::default()));
        assert_eq!(account.balance(), 600.0);
    }

    #[test]
    fn test_provide_interest_skips_checking() {
        let mut account = checking();
        account.set_balance(500.0);

        assert!(!account.provide_interest(InterestRate::default()));
        assert_eq!(account.balance(), 500.0);
    }

    #[test]
    fn test_interest_rate_validation() {
        assert_eq!(InterestRate::default().value(), 0.2);
        assert_eq!(InterestRate::new(0.5).unwrap().value(), 0.5);
        assert_eq!(InterestRate::new(0.0), Err(AccountError::InvalidInterestRate));
        assert_eq!(InterestRate::new(-0.5), Err(AccountError::InvalidInterestRate));
    }

    // ------------------------------------------------------------------------
    // details
    // ------------------------------------------------------------------------

    #[test]
    fn test_checking_details() {
        let mut account = checking();
        account.deposit(150.0).unwrap();

        assert_eq!(
            account.details(InterestRate::default()),
            "Account details:\n\
             Holder: Peter Parker\n\
             Type: checking\n\
             Balance: 150.0\n\
             Limit: 500.0\n"
        );
    }

    #[test]
    fn test_savings_details() {
        let mut account = savings();
        account.deposit(150.0).unwrap();

        assert_eq!(
            account.details(InterestRate::default()),
            "Account details:\n\
             Holder: Peter Parker\n\
             Type: savings\n\
             Balance: 150.0\n\
             Interest rate: 0.2\n"
        );
    }

    #[test]
    fn test_non_finite_amounts_rejected() {
        let mut account = checking();
        account.deposit(100.0).unwrap();

        assert_eq!(account.deposit(f64::NAN), Err(AccountError::InvalidAmount));
        assert_eq!(account.withdraw(f64::NAN), Err(AccountError::InvalidAmount));
        assert_eq!(account.set_limit(f64::NAN), Err(AccountError::InvalidAmount));
        assert_eq!(account.balance(), 100.0);
        assert_eq!(account.limit(), Some(500.0));

        let mut account = savings();
        assert_eq!(account.deposit(f64::NAN), Err(AccountError::InvalidAmount));
        assert_eq!(account.withdraw(f64::NAN), Err(AccountError::InvalidAmount));
        assert_eq!(account.balance(), 0.0);
    }

    #[test]
    fn test_interest_rate_rejects_nan() {
        assert_eq!(InterestRate::new(f64::NAN), Err(AccountError::InvalidInterestRate));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(150.0), "150.0");
        assert_eq!(format_amount(0.2), "0.2");
        assert_eq!(format_amount(-100.0), "-100.0");
        assert_eq!(format_amount(1e16), "1.0e16");
        assert_eq!(format_amount(1.5e16), "1.5e16");
        assert_eq!(format_amount(1e-7), "1.0e-7");
    }

    #[test]
    fn test_details_large_balance() {
        let mut account = savings();
        account.deposit(1e16).unwrap();
        assert!(account
            .details(InterestRate::default())
            .contains("Balance: 1.0e16\n"));
    }

    #[test]
    fn test_details_negative_balance() {
        let mut account = checking();
        account.withdraw(100.0).unwrap();
        assert!(account
            .details(InterestRate::default())
            .contains("Balance: -100.0\n"));
    }
}
