//! Period domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tallybook_shared::types::{LedgerId, PeriodId, TenantId};

/// Status of an accounting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period accepts postings.
    Open,
    /// Period is closed; postings rejected, may be reopened.
    Closed,
    /// Period is locked; postings rejected, may never be reopened.
    Locked,
}

/// A date range during which postings to a ledger are permitted or
/// forbidden. Periods of a ledger never overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Period {
    /// Unique identifier.
    pub id: PeriodId,
    /// Tenant this period belongs to.
    pub tenant_id: TenantId,
    /// Ledger this period belongs to.
    pub ledger_id: LedgerId,
    /// Period name (e.g., "2026-01").
    pub name: String,
    /// First day, inclusive.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
    /// Current status.
    pub status: PeriodStatus,
}

impl Period {
    /// Returns true if postings are permitted in this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
