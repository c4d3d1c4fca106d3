// ⚙️ Ledger Configuration
// Values come from the environment, every key is optional

use std::env::{self, VarError};

use thiserror::Error;

use crate::entities::InterestRate;

pub const INTEREST_RATE_KEY: &str = "BANK_INTEREST_RATE";
pub const LOG_FILTER_KEY: &str = "BANK_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Runtime settings for a [`crate::BankService`] and the driver binary.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// Shared rate applied to every savings account on interest accrual
    pub interest_rate: f64,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            interest_rate: InterestRate::DEFAULT,
            log_filter: "info".to_string(),
        }
    }
}

impl LedgerConfig {
    /// Loads configuration from environment variables.
    ///
    /// - `BANK_INTEREST_RATE`: initial savings rate (optional, default 0.2, must be > 0)
    /// - `BANK_LOG`: log filter (optional, default "info")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Same as [`LedgerConfig::from_env`] but reads values through `lookup`.
    ///
    /// Only `VarError::NotPresent` counts as unset; a non-Unicode value is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = LedgerConfig::default();

        let interest_rate = match get_optional(&lookup, INTEREST_RATE_KEY)? {
            Some(raw) => parse_interest_rate(&raw)?,
            None => defaults.interest_rate,
        };

        let log_filter = get_optional(&lookup, LOG_FILTER_KEY)?
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(LedgerConfig {
            interest_rate,
            log_filter,
        })
    }

    /// Validated interest rate
    pub fn interest_rate(&self) -> Result<InterestRate, ConfigError> {
        InterestRate::new(self.interest_rate).map_err(|e| invalid(INTEREST_RATE_KEY, e.to_string()))
    }
}

fn get_optional<F>(lookup: &F, key: &str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(invalid(key, "value is not valid Unicode".to_string())),
    }
}

fn parse_interest_rate(raw: &str) -> Result<f64, ConfigError> {
    let rate: f64 = raw
        .trim()
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid(INTEREST_RATE_KEY, e.to_string()))?;

    InterestRate::new(rate)
        .map(|r| r.value())
        .map_err(|e| invalid(INTEREST_RATE_KEY, e.to_string()))
}

fn invalid(key: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    }
}

// ============================================================================
// TESTS
// ============================================================================
