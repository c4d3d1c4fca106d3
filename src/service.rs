// 🏦 Bank Service - Account registry and the operations mediated through it
//
// The service is the only entry point for account operations:
// - Owns every account, keyed by UUID (value equality, exact match)
// - Owns the single interest rate shared by all savings accounts
// - Returns typed errors; every failure short-circuits before any mutation
// - Logs each accepted operation at info and each rejected one at warn

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{ConfigError, LedgerConfig};
use crate::entities::{Account, AccountType, InterestRate};
use crate::error::{AccountError, Result};

// ============================================================================
// ACCOUNT SUMMARY
// ============================================================================

/// Serializable view of one account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub id: Uuid,
    pub owner: String,
    pub account_type: AccountType,
    pub balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    pub opened_at: DateTime<Utc>,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            owner: account.owner().to_string(),
            account_type: account.account_type(),
            balance: account.balance(),
            limit: account.limit(),
            opened_at: account.opened_at(),
        }
    }
}

// ============================================================================
// BANK SERVICE
// ============================================================================

/// In-memory bank: account registry plus the shared savings interest rate.
///
/// Accounts are never removed. Not synchronized; wrap in a lock to share.
#[derive(Debug, Default)]
pub struct BankService {
    accounts: HashMap<Uuid, Account>,
    interest_rate: InterestRate,
}

impl BankService {
    /// Empty bank with the default interest rate (0.2)
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty bank using the interest rate from `config`
    pub fn with_config(config: &LedgerConfig) -> std::result::Result<Self, ConfigError> {
        Ok(BankService {
            accounts: HashMap::new(),
            interest_rate: config.interest_rate()?,
        })
    }

    // ------------------------------------------------------------------------
    // Account creation and lookup
    // ------------------------------------------------------------------------

    pub fn create_checking_account(&mut self, owner: impl Into<String>, limit: f64) -> Uuid {
        self.register(Account::checking(owner, limit))
    }

    pub fn create_savings_account(&mut self, owner: impl Into<String>) -> Uuid {
        self.register(Account::savings(owner))
    }

    fn register(&mut self, account: Account) -> Uuid {
        let id = account.id();
        info!(
            account = %id,
            owner = account.owner(),
            account_type = %account.account_type(),
            "Created bank account"
        );
        self.accounts.insert(id, account);
        id
    }

    /// Look up an account by exact id
    pub fn find_account(&self, id: Uuid) -> Result<&Account> {
        self.accounts.get(&id).ok_or(AccountError::AccountNotFound)
    }

    fn find_account_mut(&mut self, id: Uuid) -> Result<&mut Account> {
        self.accounts.get_mut(&id).ok_or(AccountError::AccountNotFound)
    }

    // ------------------------------------------------------------------------
    // Money movement
    // ------------------------------------------------------------------------

    pub fn deposit_money(&mut self, id: Uuid, amount: f64) -> Result<()> {
        self.find_account_mut(id)
            .and_then(|account| account.deposit(amount))
            .inspect(|_| info!(account = %id, "Deposited {}€ to bank account {}", amount, id))
            .inspect_err(|e| warn!(account = %id, amount, "Deposit rejected: {}", e))
    }

    pub fn withdraw_money(&mut self, id: Uuid, amount: f64) -> Result<()> {
        self.find_account_mut(id)
            .and_then(|account| account.withdraw(amount))
            .inspect(|_| info!(account = %id, "Withdrawn {}€ from bank account {}", amount, id))
            .inspect_err(|e| warn!(account = %id, amount, "Withdrawal rejected: {}", e))
    }

    /// Move `amount` from a checking account to any account.
    ///
    /// Checks run in order: source exists, source is checking, destination
    /// exists. The move itself is withdraw-then-deposit with no rollback (see
    /// [`Account::transfer_to`]).
    pub fn transfer_money(&mut self, from: Uuid, to: Uuid, amount: f64) -> Result<()> {
        self.try_transfer(from, to, amount)
            .inspect(|_| {
                info!(
                    from = %from,
                    to = %to,
                    "Transferred {}€ from account {} to account {}",
                    amount,
                    from,
                    to
                )
            })
            .inspect_err(|e| warn!(from = %from, to = %to, amount, "Transfer rejected: {}", e))
    }

    fn try_transfer(&mut self, from: Uuid, to: Uuid, amount: f64) -> Result<()> {
        if self.find_account(from)?.account_type() != AccountType::Checking {
            return Err(AccountError::WrongAccountType);
        }
        self.find_account(to)?;

        if from == to {
            let account = self.find_account_mut(from)?;
            account.withdraw(amount)?;
            return account.deposit(amount);
        }

        // Take the source out so both accounts can be borrowed mutably
        let mut source = self
            .accounts
            .remove(&from)
            .ok_or(AccountError::AccountNotFound)?;
        let result = match self.accounts.get_mut(&to) {
            Some(destination) => source.transfer_to(destination, amount),
            None => Err(AccountError::AccountNotFound),
        };
        self.accounts.insert(from, source);

        result
    }

    // ------------------------------------------------------------------------
    // Account settings and queries
    // ------------------------------------------------------------------------

    pub fn get_account_details(&self, id: Uuid) -> Result<String> {
        self.find_account(id)
            .map(|account| account.details(self.interest_rate))
            .inspect_err(|e| warn!(account = %id, "Details lookup rejected: {}", e))
    }

    /// Replace the overdraft limit; savings accounts fail with `WrongAccountType`
    pub fn change_checking_account_limit(&mut self, id: Uuid, new_limit: f64) -> Result<()> {
        self.find_account_mut(id)
            .and_then(|account| account.set_limit(new_limit))
            .inspect(|_| info!(account = %id, "Changed limit to {}€ of bank account {}", new_limit, id))
            .inspect_err(|e| warn!(account = %id, new_limit, "Limit change rejected: {}", e))
    }

    // ------------------------------------------------------------------------
    // Interest
    // ------------------------------------------------------------------------

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate.value()
    }

    /// Replace the rate used by every savings account
    pub fn update_interest_rate(&mut self, rate: f64) -> Result<()> {
        let current = self.interest_rate.value();

        InterestRate::new(rate)
            .map(|new_rate| self.interest_rate = new_rate)
            .inspect(|_| info!("Changed interest rate from {} to {}", current, rate))
            .inspect_err(|e| warn!(rate, "Interest rate update rejected: {}", e))
    }

    /// Credit interest to every savings account; returns how many were credited
    pub fn provide_interest_to_all_users(&mut self) -> usize {
        let rate = self.interest_rate;
        info!("Providing interest at rate {}", rate.value());

        self.accounts
            .values_mut()
            .map(|account| account.provide_interest(rate))
            .filter(|credited| *credited)
            .count()
    }

    // ------------------------------------------------------------------------
    // Registry views
    // ------------------------------------------------------------------------

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    pub fn accounts_by_type(&self, account_type: AccountType) -> Vec<&Account> {
        self.accounts()
            .filter(|account| account.account_type() == account_type)
            .collect()
    }

    /// Sum of all balances, overdrafts included
    pub fn total_balance(&self) -> f64 {
        self.accounts().map(Account::balance).sum()
    }

    pub fn overdrawn_accounts(&self) -> Vec<&Account> {
        self.accounts().filter(|account| account.is_overdrawn()).collect()
    }

    /// Summaries ordered by opening time, then id
    pub fn summaries(&self) -> Vec<AccountSummary> {
        let mut summaries: Vec<AccountSummary> = self.accounts().map(AccountSummary::from).collect();
        summaries.sort_by(|a, b| a.opened_at.cmp(&b.opened_at).then(a.id.cmp(&b.id)));
        summaries
    }

    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.summaries())
    }
}

// ============================================================================
// TESTS
// ============================================================================
