//! Ledger domain type.

use serde::{Deserialize, Serialize};
use tallybook_shared::types::{CurrencyCode, LedgerId, TenantId};

/// A book of accounts with one functional currency.
///
/// All journal entries posted to a ledger must balance in the ledger's
/// functional currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    /// Unique identifier.
    pub id: LedgerId,
    /// Tenant this ledger belongs to.
    pub tenant_id: TenantId,
    /// Display name.
    pub name: String,
    /// The currency all entries must balance in.
    pub functional_currency: CurrencyCode,
    /// IANA timezone name (e.g., "America/New_York").
    pub timezone: String,
    /// Opaque ledger settings.
    pub settings: Option<serde_json::Value>,
}
