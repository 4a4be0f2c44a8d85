//! Journal entry domain types.
//!
//! Entries and lines live in flat id-keyed storage: a line carries its
//! entry's id, never a live back-reference, and postings reference both by
//! id.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallybook_shared::types::{
    AccountId, CurrencyCode, JournalEntryId, JournalLineId, LedgerId, PartyId, PostingId,
    TenantId,
};

use crate::account::NormalSide;

/// Lifecycle status of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalEntryStatus {
    /// Entry is being drafted and can be modified.
    Draft,
    /// Entry has been posted to the ledger (immutable).
    Posted,
    /// Entry has been reversed by a later entry (immutable).
    Reversed,
    /// Entry has been voided (immutable).
    Void,
}

impl JournalEntryStatus {
    /// Returns true if the entry can still be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the entry is immutable.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        !self.is_editable()
    }
}

/// A balanced transaction record composed of two or more lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Tenant this entry belongs to.
    pub tenant_id: TenantId,
    /// Ledger this entry belongs to.
    pub ledger_id: LedgerId,
    /// The date the entry takes effect in the books.
    pub accounting_date: NaiveDate,
    /// The date the underlying transaction occurred, if different.
    pub transaction_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: JournalEntryStatus,
    /// Per-ledger monotonic number, assigned only on posting.
    pub sequence_no: Option<i64>,
    /// Caller-supplied external reference.
    pub external_id: Option<String>,
    /// Deduplication key, unique per ledger.
    pub idempotency_key: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// When the entry was posted.
    pub posted_at: Option<DateTime<Utc>>,
    /// Opaque metadata blob.
    pub metadata: Option<serde_json::Value>,
}

/// One debit or credit within a journal entry, against one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique identifier.
    pub id: JournalLineId,
    /// Tenant this line belongs to.
    pub tenant_id: TenantId,
    /// Owning entry (by id).
    pub entry_id: JournalEntryId,
    /// Account the line posts against.
    pub account_id: AccountId,
    /// Optional counterparty.
    pub party_id: Option<PartyId>,
    /// Debit or credit.
    pub direction: NormalSide,
    /// Currency of the face amount.
    pub currency: CurrencyCode,
    /// Face amount in the line currency's minor units (positive).
    pub amount_minor: i64,
    /// Rate applied during posting; set only by the posting engine.
    pub fx_rate: Option<Decimal>,
    /// Amount in functional-currency minor units; set only by the posting engine.
    pub functional_amount_minor: Option<i64>,
    /// Free-text memo.
    pub memo: Option<String>,
    /// Opaque dimension tags.
    pub dimensions: Option<serde_json::Value>,
}

/// An immutable, signed ledger record generated from a line at posting time.
///
/// The signed amount is in the line's original currency: positive for
/// debits, negative for credits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    /// Unique identifier.
    pub id: PostingId,
    /// Tenant the posting belongs to.
    pub tenant_id: TenantId,
    /// Ledger the posting belongs to.
    pub ledger_id: LedgerId,
    /// Originating journal entry.
    pub entry_id: JournalEntryId,
    /// Originating journal line.
    pub line_id: JournalLineId,
    /// Account posted against.
    pub account_id: AccountId,
    /// Optional counterparty.
    pub party_id: Option<PartyId>,
    /// Accounting date copied from the entry.
    pub accounting_date: NaiveDate,
    /// Currency of the signed amount (the line's original currency).
    pub currency: CurrencyCode,
    /// Signed amount in minor units: +amount for debit, -amount for credit.
    pub amount_minor_signed: i64,
    /// When the posting was created.
    pub posted_at: DateTime<Utc>,
}

/// Input for one line of a new draft entry.
#[derive(Debug, Clone)]
pub struct DraftLine {
    /// Account to post against.
    pub account_id: AccountId,
    /// Optional counterparty.
    pub party_id: Option<PartyId>,
    /// Debit or credit.
    pub direction: NormalSide,
    /// Currency of the face amount.
    pub currency: CurrencyCode,
    /// Face amount in minor units (must be positive).
    pub amount_minor: i64,
    /// Free-text memo.
    pub memo: Option<String>,
    /// Opaque dimension tags.
    pub dimensions: Option<serde_json::Value>,
}

/// Input for creating a new draft journal entry.
#[derive(Debug, Clone)]
pub struct DraftEntry {
    /// The date the entry takes effect in the books.
    pub accounting_date: NaiveDate,
    /// The date the underlying transaction occurred, if different.
    pub transaction_date: Option<NaiveDate>,
    /// Free-text description.
    pub description: Option<String>,
    /// Caller-supplied external reference.
    pub external_id: Option<String>,
    /// Deduplication key, unique per ledger.
    pub idempotency_key: Option<String>,
    /// Opaque metadata blob.
    pub metadata: Option<serde_json::Value>,
    /// The lines (at least two).
    pub lines: Vec<DraftLine>,
}
