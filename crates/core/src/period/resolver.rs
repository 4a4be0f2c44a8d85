//! Posting-time period resolution.

use chrono::NaiveDate;
use tallybook_shared::types::{LedgerId, TenantId};

use super::types::Period;
use crate::context::TenantContext;
use crate::journal::error::PostingError;
use crate::storage::StorageError;

/// Resolves the accounting period gating a posting attempt.
///
/// Evaluated once per attempt against the entry's accounting date; lines
/// share the entry's date.
pub struct PeriodResolver;

impl PeriodResolver {
    /// Finds the period of the ledger containing `date`, scoped to the
    /// caller's tenant.
    pub fn find_containing<F>(
        ctx: &TenantContext,
        ledger_id: LedgerId,
        date: NaiveDate,
        lookup: F,
    ) -> Result<Option<Period>, PostingError>
    where
        F: Fn(TenantId, LedgerId, NaiveDate) -> Result<Option<Period>, StorageError>,
    {
        Ok(lookup(ctx.tenant_id(), ledger_id, date)?)
    }

    /// Requires an OPEN period for the accounting date.
    ///
    /// # Errors
    ///
    /// `NoPeriodForDate` if no period contains the date, `PeriodNotOpen`
    /// if the containing period is CLOSED or LOCKED.
    pub fn require_open(period: Option<&Period>, date: NaiveDate) -> Result<(), PostingError> {
        match period {
            None => Err(PostingError::NoPeriodForDate(date)),
            Some(period) if !period.is_open() => Err(PostingError::PeriodNotOpen {
                date,
                status: period.status,
            }),
            Some(_) => Ok(()),
        }
    }
}
