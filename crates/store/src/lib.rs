//! In-memory storage backend for the posting engine.
//!
//! [`MemoryStore`] keeps the whole ledger state behind one `RwLock` and
//! implements the core [`LedgerStore`] contract. The single write lock is
//! what makes [`LedgerStore::commit_posted`] atomic: the draft re-check,
//! the sequence allocation, and every write happen under one guard, so a
//! posting either lands completely or not at all.
//!
//! The store also carries the administrative surface (tenants, ledgers,
//! accounts, periods, FX rates), running the core validation rules before
//! mutating state the way a SQL backend would run them before issuing
//! statements.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use thiserror::Error;

use tallybook_core::account::validation::{
    validate_new_account, validate_parent, AccountValidationError,
};
use tallybook_core::account::Account;
use tallybook_core::fx::validation::validate_rate_upsert;
use tallybook_core::fx::{FxRate, FxValidationError};
use tallybook_core::journal::{JournalEntry, JournalEntryStatus, JournalLine, Posting};
use tallybook_core::ledger::Ledger;
use tallybook_core::period::validation::{
    validate_can_close, validate_can_lock, validate_can_reopen, validate_creation,
    validate_no_overlap,
};
use tallybook_core::period::{Period, PeriodStatus, PeriodValidationError};
use tallybook_core::storage::{LedgerStore, StorageError};
use tallybook_core::tenancy::{Party, Tenant};
use tallybook_shared::types::{
    AccountId, CurrencyCode, JournalEntryId, LedgerId, PartyId, PeriodId, TenantId,
};

/// Errors from the period management surface.
#[derive(Debug, Error)]
pub enum PeriodAdminError {
    /// No period with that id.
    #[error("Period not found: {0}")]
    NotFound(PeriodId),

    /// A period state rule rejected the transition.
    #[error(transparent)]
    Validation(#[from] PeriodValidationError),
}

#[derive(Default)]
struct State {
    tenants: HashMap<TenantId, Tenant>,
    parties: HashMap<PartyId, Party>,
    ledgers: HashMap<LedgerId, Ledger>,
    accounts: HashMap<AccountId, Account>,
    periods: HashMap<PeriodId, Period>,
    rates: Vec<FxRate>,
    entries: HashMap<JournalEntryId, JournalEntry>,
    lines: HashMap<JournalEntryId, Vec<JournalLine>>,
    postings: Vec<Posting>,
}

impl State {
    fn next_sequence(&self, tenant_id: TenantId, ledger_id: LedgerId) -> i64 {
        self.entries
            .values()
            .filter(|e| e.tenant_id == tenant_id && e.ledger_id == ledger_id)
            .filter_map(|e| e.sequence_no)
            .max()
            .map_or(1, |max| max + 1)
    }

    fn open_period(&self, tenant_id: TenantId, ledger_id: LedgerId) -> Option<&Period> {
        self.periods.values().find(|p| {
            p.tenant_id == tenant_id
                && p.ledger_id == ledger_id
                && p.status == PeriodStatus::Open
        })
    }
}

/// Thread-safe in-memory ledger store.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a tenant.
    pub fn insert_tenant(&self, tenant: Tenant) {
        self.write().tenants.insert(tenant.id, tenant);
    }

    /// Registers a party.
    pub fn insert_party(&self, party: Party) {
        self.write().parties.insert(party.id, party);
    }

    /// Registers a ledger.
    pub fn insert_ledger(&self, ledger: Ledger) {
        self.write().ledgers.insert(ledger.id, ledger);
    }

    /// Creates an account after running the creation-time rules: code and
    /// name shape, type consistency, currency mode, and parent hierarchy.
    ///
    /// # Errors
    ///
    /// Returns `AccountValidationError` if any rule rejects the account.
    pub fn create_account(&self, account: Account) -> Result<(), AccountValidationError> {
        validate_new_account(&account)?;
        let mut state = self.write();
        if let Some(parent_id) = account.parent_account_id {
            validate_parent(&account, parent_id, |id| {
                Ok(state.accounts.get(&id).cloned())
            })?;
        }
        state.accounts.insert(account.id, account);
        Ok(())
    }

    /// Marks an account inactive. Missing accounts are a no-op.
    pub fn deactivate_account(&self, id: AccountId) {
        if let Some(account) = self.write().accounts.get_mut(&id) {
            account.is_active = false;
        }
    }

    /// Creates a period after checking its shape and that its date range
    /// does not overlap any existing period of the same ledger.
    ///
    /// # Errors
    ///
    /// Returns `PeriodValidationError` on a bad range or an overlap.
    pub fn create_period(&self, period: Period) -> Result<(), PeriodValidationError> {
        validate_creation(&period.name, period.start_date, period.end_date)?;
        let mut state = self.write();
        let siblings: Vec<Period> = state
            .periods
            .values()
            .filter(|p| p.tenant_id == period.tenant_id && p.ledger_id == period.ledger_id)
            .cloned()
            .collect();
        validate_no_overlap(period.start_date, period.end_date, &siblings)?;
        state.periods.insert(period.id, period);
        Ok(())
    }

    /// Closes an OPEN period.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent, `Validation(NotOpen)` from any other status.
    pub fn close_period(&self, id: PeriodId) -> Result<(), PeriodAdminError> {
        let mut state = self.write();
        let period = state
            .periods
            .get_mut(&id)
            .ok_or(PeriodAdminError::NotFound(id))?;
        validate_can_close(period)?;
        period.status = PeriodStatus::Closed;
        Ok(())
    }

    /// Locks a CLOSED period. LOCKED is terminal.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent, `Validation(NotClosed)` from any other status.
    pub fn lock_period(&self, id: PeriodId) -> Result<(), PeriodAdminError> {
        let mut state = self.write();
        let period = state
            .periods
            .get_mut(&id)
            .ok_or(PeriodAdminError::NotFound(id))?;
        validate_can_lock(period)?;
        period.status = PeriodStatus::Locked;
        Ok(())
    }

    /// Reopens a CLOSED period, provided no other period of the ledger is
    /// currently open. LOCKED periods never reopen.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent, `Validation(Locked)` for locked periods,
    /// `Validation(AnotherPeriodOpen)` if a different period is open.
    pub fn reopen_period(&self, id: PeriodId) -> Result<(), PeriodAdminError> {
        let mut state = self.write();
        let period = state
            .periods
            .get(&id)
            .ok_or(PeriodAdminError::NotFound(id))?
            .clone();
        let open = state.open_period(period.tenant_id, period.ledger_id).cloned();
        validate_can_reopen(&period, open.as_ref())?;
        if let Some(stored) = state.periods.get_mut(&id) {
            stored.status = PeriodStatus::Open;
        }
        Ok(())
    }

    /// Records an FX rate, replacing any existing row for the same
    /// (base, quote, as_of) triple.
    ///
    /// # Errors
    ///
    /// Returns `FxValidationError` for a non-positive rate or a same-currency
    /// pair.
    pub fn upsert_fx_rate(&self, rate: FxRate) -> Result<(), FxValidationError> {
        validate_rate_upsert(&rate.base, &rate.quote, rate.rate)?;
        let mut state = self.write();
        if let Some(existing) = state
            .rates
            .iter_mut()
            .find(|r| r.base == rate.base && r.quote == rate.quote && r.as_of == rate.as_of)
        {
            *existing = rate;
        } else {
            state.rates.push(rate);
        }
        Ok(())
    }

    /// Returns the postings of an entry, in line order.
    #[must_use]
    pub fn postings_for_entry(&self, entry_id: JournalEntryId) -> Vec<Posting> {
        self.read()
            .postings
            .iter()
            .filter(|p| p.entry_id == entry_id)
            .cloned()
            .collect()
    }

    /// Total number of postings in the store.
    #[must_use]
    pub fn posting_count(&self) -> usize {
        self.read().postings.len()
    }
}

impl LedgerStore for MemoryStore {
    fn ledger_by_id(&self, id: LedgerId) -> Result<Option<Ledger>, StorageError> {
        Ok(self.read().ledgers.get(&id).cloned())
    }

    fn account_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError> {
        Ok(self.read().accounts.get(&id).cloned())
    }

    fn period_containing(
        &self,
        tenant_id: TenantId,
        ledger_id: LedgerId,
        date: NaiveDate,
    ) -> Result<Option<Period>, StorageError> {
        Ok(self
            .read()
            .periods
            .values()
            .find(|p| {
                p.tenant_id == tenant_id && p.ledger_id == ledger_id && p.contains_date(date)
            })
            .cloned())
    }

    fn most_recent_rate(
        &self,
        base: &CurrencyCode,
        quote: &CurrencyCode,
        as_of: NaiveDate,
    ) -> Result<Option<FxRate>, StorageError> {
        Ok(self
            .read()
            .rates
            .iter()
            .filter(|r| &r.base == base && &r.quote == quote && r.as_of <= as_of)
            .max_by_key(|r| r.as_of)
            .cloned())
    }

    fn journal_entry_by_id(
        &self,
        id: JournalEntryId,
    ) -> Result<Option<JournalEntry>, StorageError> {
        Ok(self.read().entries.get(&id).cloned())
    }

    fn journal_lines(&self, entry_id: JournalEntryId) -> Result<Vec<JournalLine>, StorageError> {
        Ok(self.read().lines.get(&entry_id).cloned().unwrap_or_default())
    }

    fn idempotency_key_exists(
        &self,
        ledger_id: LedgerId,
        key: &str,
    ) -> Result<bool, StorageError> {
        Ok(self.read().entries.values().any(|e| {
            e.ledger_id == ledger_id && e.idempotency_key.as_deref() == Some(key)
        }))
    }

    fn insert_draft(
        &self,
        entry: &JournalEntry,
        lines: &[JournalLine],
    ) -> Result<(), StorageError> {
        let mut state = self.write();
        if state.entries.contains_key(&entry.id) {
            return Err(StorageError::Conflict(format!(
                "journal entry {} already exists",
                entry.id
            )));
        }
        // The idempotency key acts as a unique index per ledger; re-check
        // under the write lock so two racing drafts cannot both land.
        if let Some(key) = &entry.idempotency_key {
            let taken = state.entries.values().any(|e| {
                e.ledger_id == entry.ledger_id && e.idempotency_key.as_deref() == Some(key)
            });
            if taken {
                return Err(StorageError::Conflict(format!(
                    "idempotency key {key} already used"
                )));
            }
        }
        state.entries.insert(entry.id, entry.clone());
        state.lines.insert(entry.id, lines.to_vec());
        Ok(())
    }

    fn next_sequence(
        &self,
        tenant_id: TenantId,
        ledger_id: LedgerId,
    ) -> Result<i64, StorageError> {
        Ok(self.read().next_sequence(tenant_id, ledger_id))
    }

    fn commit_posted(
        &self,
        entry: &JournalEntry,
        lines: &[JournalLine],
        postings: &[Posting],
    ) -> Result<i64, StorageError> {
        let mut state = self.write();

        // Re-check the stored status under the write lock: a concurrent
        // poster may have won the race since validation.
        let stored = state.entries.get(&entry.id).ok_or_else(|| {
            StorageError::Conflict(format!("journal entry {} no longer exists", entry.id))
        })?;
        if stored.status != JournalEntryStatus::Draft {
            return Err(StorageError::Conflict(format!(
                "journal entry {} is no longer in draft status",
                entry.id
            )));
        }

        let sequence = state.next_sequence(entry.tenant_id, entry.ledger_id);

        let mut committed = entry.clone();
        committed.sequence_no = Some(sequence);
        state.entries.insert(entry.id, committed);
        state.lines.insert(entry.id, lines.to_vec());
        state.postings.extend_from_slice(postings);

        tracing::debug!(
            entry_id = %entry.id,
            sequence_no = sequence,
            postings = postings.len(),
            "posting committed"
        );
        Ok(sequence)
    }
}
