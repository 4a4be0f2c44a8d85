//! The posting engine.
//!
//! Orchestrates the DRAFT -> POSTED transition: load, tenant and state
//! checks, account checks, period check, functional-currency conversion,
//! balance verification, posting materialization, and the atomic commit
//! that allocates the entry's sequence number. Any failure aborts the
//! whole operation with nothing persisted.

use chrono::Utc;
use tallybook_shared::types::{JournalEntryId, JournalLineId, LedgerId, PostingId};

use crate::account::{AccountDirectory, NormalSide};
use crate::context::TenantContext;
use crate::fx;
use crate::period::PeriodResolver;
use crate::storage::{LedgerStore, StorageError};

use super::balance::BalanceTotals;
use super::error::PostingError;
use super::types::{
    DraftEntry, JournalEntry, JournalEntryStatus, JournalLine, Posting,
};

/// A journal entry returned with its lines.
#[derive(Debug, Clone)]
pub struct PostedEntry {
    /// The entry, carrying sequence number and posted timestamp once posted.
    pub entry: JournalEntry,
    /// The entry's lines, carrying fx rate and functional amount once posted.
    pub lines: Vec<JournalLine>,
}

/// Creates draft journal entries and posts them.
pub struct PostingEngine<'a, S: LedgerStore> {
    store: &'a S,
}

impl<'a, S: LedgerStore> PostingEngine<'a, S> {
    /// Creates an engine over the given store.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Creates a new journal entry in DRAFT status.
    ///
    /// Validates the target ledger (existence, tenant), the draft's shape
    /// (at least two lines, positive amounts), and idempotency-key
    /// uniqueness within the ledger. FX fields stay unset until posting.
    ///
    /// # Errors
    ///
    /// Returns `PostingError` if validation fails; nothing is persisted.
    pub fn create_journal_entry(
        &self,
        ctx: &TenantContext,
        ledger_id: LedgerId,
        draft: DraftEntry,
    ) -> Result<PostedEntry, PostingError> {
        let ledger = self
            .store
            .ledger_by_id(ledger_id)?
            .ok_or(PostingError::LedgerNotFound(ledger_id))?;
        if ledger.tenant_id != ctx.tenant_id() {
            return Err(PostingError::TenantMismatch { resource: "ledger" });
        }

        if draft.lines.len() < 2 {
            return Err(PostingError::InsufficientLines);
        }
        if draft.lines.iter().any(|line| line.amount_minor <= 0) {
            return Err(PostingError::NonPositiveAmount);
        }

        if let Some(key) = &draft.idempotency_key {
            if self.store.idempotency_key_exists(ledger_id, key)? {
                return Err(PostingError::DuplicateIdempotencyKey(key.clone()));
            }
        }

        let entry = JournalEntry {
            id: JournalEntryId::new(),
            tenant_id: ctx.tenant_id(),
            ledger_id,
            accounting_date: draft.accounting_date,
            transaction_date: draft.transaction_date,
            status: JournalEntryStatus::Draft,
            sequence_no: None,
            external_id: draft.external_id,
            idempotency_key: draft.idempotency_key,
            description: draft.description,
            posted_at: None,
            metadata: draft.metadata,
        };

        let lines: Vec<JournalLine> = draft
            .lines
            .into_iter()
            .map(|line| JournalLine {
                id: JournalLineId::new(),
                tenant_id: ctx.tenant_id(),
                entry_id: entry.id,
                account_id: line.account_id,
                party_id: line.party_id,
                direction: line.direction,
                currency: line.currency,
                amount_minor: line.amount_minor,
                fx_rate: None,
                functional_amount_minor: None,
                memo: line.memo,
                dimensions: line.dimensions,
            })
            .collect();

        self.store.insert_draft(&entry, &lines)?;

        tracing::info!(
            entry_id = %entry.id,
            ledger_id = %ledger_id,
            lines = lines.len(),
            "journal entry drafted"
        );

        Ok(PostedEntry { entry, lines })
    }

    /// Posts a DRAFT journal entry, producing immutable signed postings.
    ///
    /// Runs every check in order, short-circuiting the whole operation on
    /// the first failure; only if all pass are the postings, the resolved
    /// lines, and the POSTED entry committed in one atomic unit, which also
    /// allocates the ledger's next sequence number.
    ///
    /// # Errors
    ///
    /// Returns `PostingError`; on any error the entry stays DRAFT and no
    /// posting exists.
    pub fn post_journal_entry(
        &self,
        ctx: &TenantContext,
        entry_id: JournalEntryId,
    ) -> Result<PostedEntry, PostingError> {
        // 1. Load and scope to tenant.
        let mut entry = self
            .store
            .journal_entry_by_id(entry_id)?
            .ok_or(PostingError::EntryNotFound(entry_id))?;
        if entry.tenant_id != ctx.tenant_id() {
            return Err(PostingError::TenantMismatch {
                resource: "journal entry",
            });
        }

        // 2. Only DRAFT entries can be posted.
        if entry.status != JournalEntryStatus::Draft {
            return Err(PostingError::NotDraft(entry.status));
        }

        // 3. Structural minimum of two lines is enforced at creation; an
        //    empty entry still must never post.
        let mut lines = self.store.journal_lines(entry_id)?;
        if lines.is_empty() {
            return Err(PostingError::NoLines);
        }

        let ledger = self
            .store
            .ledger_by_id(entry.ledger_id)?
            .ok_or(PostingError::LedgerNotFound(entry.ledger_id))?;
        let functional = &ledger.functional_currency;

        // 4. Account checks per line.
        for line in &lines {
            let account = AccountDirectory::resolve(line.account_id, ctx, |id| {
                self.store.account_by_id(id)
            })?;
            AccountDirectory::require_active(&account)?;
            AccountDirectory::require_currency_allowed(&account, &line.currency)?;
        }

        // 5. The accounting date must fall in an OPEN period.
        let period = PeriodResolver::find_containing(
            ctx,
            entry.ledger_id,
            entry.accounting_date,
            |tenant, ledger_id, date| self.store.period_containing(tenant, ledger_id, date),
        )?;
        PeriodResolver::require_open(period.as_ref(), entry.accounting_date)?;

        // 6. Convert each line to functional currency.
        // 7. Verify the entry balances.
        let mut totals = BalanceTotals::new();
        for line in &mut lines {
            let conversion = fx::convert_to_functional(
                &line.currency,
                line.amount_minor,
                functional,
                entry.accounting_date,
                |base, quote, as_of| self.store.most_recent_rate(base, quote, as_of),
            )?;
            line.fx_rate = Some(conversion.fx_rate);
            line.functional_amount_minor = Some(conversion.functional_amount_minor);
            totals.accumulate(line.direction, conversion.functional_amount_minor)?;
        }
        totals.require_balanced()?;

        // 8. Materialize one posting per line, signed in the line's
        //    original currency.
        let posted_at = Utc::now();
        let postings: Vec<Posting> = lines
            .iter()
            .map(|line| Posting {
                id: PostingId::new(),
                tenant_id: entry.tenant_id,
                ledger_id: entry.ledger_id,
                entry_id: entry.id,
                line_id: line.id,
                account_id: line.account_id,
                party_id: line.party_id,
                accounting_date: entry.accounting_date,
                currency: line.currency.clone(),
                amount_minor_signed: match line.direction {
                    NormalSide::Debit => line.amount_minor,
                    NormalSide::Credit => -line.amount_minor,
                },
                posted_at,
            })
            .collect();

        // 9-11. Commit atomically; the store re-checks DRAFT status and
        // allocates the sequence number under its own serialization.
        entry.status = JournalEntryStatus::Posted;
        entry.posted_at = Some(posted_at);

        let sequence = self
            .store
            .commit_posted(&entry, &lines, &postings)
            .map_err(|err| match err {
                StorageError::Conflict(_) => PostingError::ConcurrentModification,
                other => PostingError::Storage(other),
            })?;
        entry.sequence_no = Some(sequence);

        tracing::info!(
            entry_id = %entry.id,
            ledger_id = %entry.ledger_id,
            sequence_no = sequence,
            debits = totals.debits(),
            credits = totals.credits(),
            "journal entry posted"
        );

        Ok(PostedEntry { entry, lines })
    }
}
