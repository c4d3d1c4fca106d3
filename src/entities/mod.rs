// Entity Models
// "Identity persists, values change": every account keeps a stable UUID
// while its balance (and a checking account's limit) evolve.

pub mod account;

pub use account::{Account, AccountType, InterestRate};
