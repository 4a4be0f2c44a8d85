//! Storage traits the core consumes.
//!
//! The core never talks to a database directly. Persistence implements
//! [`LedgerStore`] and the posting engine calls through it; the in-memory
//! store and any SQL-backed store provide the same contract.

use chrono::NaiveDate;
use thiserror::Error;

use tallybook_shared::types::{
    AccountId, CurrencyCode, JournalEntryId, LedgerId, TenantId,
};

use crate::account::Account;
use crate::fx::FxRate;
use crate::journal::{JournalEntry, JournalLine, Posting};
use crate::ledger::Ledger;
use crate::period::Period;

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The operation lost a race with a concurrent writer.
    #[error("Storage conflict: {0}")]
    Conflict(String),

    /// The backend failed (connection, corruption, ...).
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Storage contract for the posting engine and its collaborators.
///
/// All methods are synchronous reads except [`insert_draft`] and
/// [`commit_posted`]. `commit_posted` is the single atomic mutation of a
/// posting attempt: the implementation must apply the entry update, the
/// postings, and the sequence allocation in one all-or-nothing unit, and
/// must fail with [`StorageError::Conflict`] if the stored entry is no
/// longer in draft status.
///
/// [`insert_draft`]: LedgerStore::insert_draft
/// [`commit_posted`]: LedgerStore::commit_posted
pub trait LedgerStore: Send + Sync {
    /// Looks up a ledger by id.
    fn ledger_by_id(&self, id: LedgerId) -> Result<Option<Ledger>, StorageError>;

    /// Looks up an account by id.
    fn account_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError>;

    /// Finds the period of the ledger whose date range contains `date`.
    fn period_containing(
        &self,
        tenant_id: TenantId,
        ledger_id: LedgerId,
        date: NaiveDate,
    ) -> Result<Option<Period>, StorageError>;

    /// Returns the rate for the exact (base, quote) pair with the latest
    /// `as_of` not after the requested date.
    fn most_recent_rate(
        &self,
        base: &CurrencyCode,
        quote: &CurrencyCode,
        as_of: NaiveDate,
    ) -> Result<Option<FxRate>, StorageError>;

    /// Loads a journal entry by id.
    fn journal_entry_by_id(
        &self,
        id: JournalEntryId,
    ) -> Result<Option<JournalEntry>, StorageError>;

    /// Loads the lines of a journal entry, in insertion order.
    fn journal_lines(&self, entry_id: JournalEntryId) -> Result<Vec<JournalLine>, StorageError>;

    /// Returns true if an entry of the ledger already carries this
    /// idempotency key.
    fn idempotency_key_exists(
        &self,
        ledger_id: LedgerId,
        key: &str,
    ) -> Result<bool, StorageError>;

    /// Persists a new draft entry and its lines.
    fn insert_draft(
        &self,
        entry: &JournalEntry,
        lines: &[JournalLine],
    ) -> Result<(), StorageError>;

    /// Returns the next sequence number for the ledger: `1 + max(sequence_no)`
    /// over already-posted entries, or 1 if none exist.
    ///
    /// This is a read-side helper; posting itself allocates the sequence
    /// inside [`commit_posted`](LedgerStore::commit_posted) so concurrent
    /// posts cannot claim the same number.
    fn next_sequence(&self, tenant_id: TenantId, ledger_id: LedgerId)
        -> Result<i64, StorageError>;

    /// Atomically persists a posting: verifies the stored entry is still in
    /// draft status, allocates the next sequence number, and writes the
    /// updated entry, its resolved lines, and the postings in one unit.
    ///
    /// Returns the allocated sequence number.
    fn commit_posted(
        &self,
        entry: &JournalEntry,
        lines: &[JournalLine],
        postings: &[Posting],
    ) -> Result<i64, StorageError>;
}
