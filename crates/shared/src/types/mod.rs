//! Core type definitions shared across the workspace.

pub mod currency;
pub mod id;

pub use currency::{Currency, CurrencyCode, CurrencyCodeError, RoundingPolicy};
pub use id::{
    AccountId, JournalEntryId, JournalLineId, LedgerId, PartyId, PeriodId, PostingId, TenantId,
};
