//! Chart of accounts.
//!
//! - Account domain types and enums
//! - Posting-time account checks (tenant scope, active flag, currency mode)
//! - Creation-time validation (code/name shape, normal-side consistency,
//!   parent hierarchy rules)

pub mod directory;
pub mod types;
pub mod validation;

pub use directory::AccountDirectory;
pub use types::{Account, AccountType, CurrencyMode, NormalSide};
pub use validation::AccountValidationError;
