//! Accounting periods.
//!
//! - Period domain types
//! - Posting-time resolution (the period containing an accounting date must
//!   be OPEN)
//! - Management state rules (close/lock/reopen, non-overlap)

pub mod resolver;
pub mod types;
pub mod validation;

pub use resolver::PeriodResolver;
pub use types::{Period, PeriodStatus};
pub use validation::PeriodValidationError;
