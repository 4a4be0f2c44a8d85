//! Journal entries, postings, and the posting engine.
//!
//! - Journal entry / line / posting domain types
//! - Draft input types
//! - Error types for posting operations
//! - Exact-integer balance accumulation
//! - The posting engine driving DRAFT -> POSTED

pub mod balance;
pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod balance_props;

pub use balance::BalanceTotals;
pub use engine::{PostedEntry, PostingEngine};
pub use error::PostingError;
pub use types::{
    DraftEntry, DraftLine, JournalEntry, JournalEntryStatus, JournalLine, Posting,
};
