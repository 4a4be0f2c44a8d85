//! Error types for journal-entry operations.

use chrono::NaiveDate;
use thiserror::Error;

use tallybook_shared::types::{AccountId, CurrencyCode, JournalEntryId, LedgerId};

use crate::period::PeriodStatus;
use crate::storage::StorageError;

use super::types::JournalEntryStatus;

/// Errors that can occur while creating or posting a journal entry.
///
/// Every error aborts the whole operation with no persistence side effect.
#[derive(Debug, Error)]
pub enum PostingError {
    // ========== Not-found / Tenancy Errors ==========
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(JournalEntryId),

    /// Ledger not found.
    #[error("Ledger not found: {0}")]
    LedgerNotFound(LedgerId),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// The referenced resource belongs to another tenant.
    #[error("{resource} does not belong to current tenant")]
    TenantMismatch {
        /// What kind of resource failed the tenant check.
        resource: &'static str,
    },

    // ========== State Errors ==========
    /// Only DRAFT entries can be posted.
    #[error("Only DRAFT entries can be posted (status is {0:?})")]
    NotDraft(JournalEntryStatus),

    /// A concurrent writer changed the entry between validation and commit.
    #[error("Concurrent modification detected, please retry")]
    ConcurrentModification,

    // ========== Structural Errors ==========
    /// Entry has no lines at all.
    #[error("Journal entry must have at least one line")]
    NoLines,

    /// A draft must carry at least two lines.
    #[error("Journal entry must have at least two lines")]
    InsufficientLines,

    /// Line amounts must be positive.
    #[error("Line amount must be positive")]
    NonPositiveAmount,

    /// An entry with this idempotency key already exists in the ledger.
    #[error("Duplicate idempotency key for ledger: {0}")]
    DuplicateIdempotencyKey(String),

    // ========== Account Constraint Errors ==========
    /// Account is inactive and cannot be posted to.
    #[error("Account is not active: {code}")]
    AccountInactive {
        /// Code of the inactive account.
        code: String,
    },

    /// Line currency is not accepted by a single-currency account.
    #[error("Account {account_code} only accepts currency {required:?}, got {got}")]
    CurrencyNotAllowed {
        /// Code of the constrained account.
        account_code: String,
        /// The account's pinned currency.
        required: Option<CurrencyCode>,
        /// The currency the line carried.
        got: CurrencyCode,
    },

    // ========== Period Errors ==========
    /// No period of the ledger contains the accounting date.
    #[error("No period found for accounting date: {0}")]
    NoPeriodForDate(NaiveDate),

    /// The containing period is not OPEN.
    #[error("Period is not open for accounting date: {date} (status is {status:?})")]
    PeriodNotOpen {
        /// The accounting date that was checked.
        date: NaiveDate,
        /// The status of the containing period.
        status: PeriodStatus,
    },

    // ========== Currency Errors ==========
    /// No direct or inverse FX rate exists for the pair as of the date.
    #[error("No FX rate found for {base} to {quote} as of {as_of}")]
    CurrencyConversion {
        /// The line's currency.
        base: CurrencyCode,
        /// The ledger's functional currency.
        quote: CurrencyCode,
        /// The accounting date the lookup was bounded by.
        as_of: NaiveDate,
    },

    /// Converted amount exceeds 64-bit minor units.
    #[error("Functional amount overflows 64-bit minor units")]
    AmountOverflow,

    // ========== Balancing Errors ==========
    /// Functional debits and credits are not equal.
    #[error("Journal entry does not balance. Debits: {debits}, Credits: {credits}")]
    Unbalanced {
        /// Total functional debits in minor units.
        debits: i64,
        /// Total functional credits in minor units.
        credits: i64,
    },

    // ========== Storage Errors ==========
    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl PostingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::LedgerNotFound(_) => "LEDGER_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::TenantMismatch { .. } => "TENANT_MISMATCH",
            Self::NotDraft(_) => "NOT_DRAFT",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
            Self::NoLines => "NO_LINES",
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::DuplicateIdempotencyKey(_) => "DUPLICATE_IDEMPOTENCY_KEY",
            Self::AccountInactive { .. } => "ACCOUNT_INACTIVE",
            Self::CurrencyNotAllowed { .. } => "CURRENCY_NOT_ALLOWED",
            Self::NoPeriodForDate(_) => "NO_PERIOD_FOR_DATE",
            Self::PeriodNotOpen { .. } => "PERIOD_NOT_OPEN",
            Self::CurrencyConversion { .. } => "CURRENCY_CONVERSION",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::Unbalanced { .. } => "UNBALANCED",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns true if retrying the same call may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification)
    }
}
