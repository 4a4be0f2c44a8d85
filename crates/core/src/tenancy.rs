//! Tenants and parties.
//!
//! A tenant is the isolation boundary: every other entity references exactly
//! one tenant, and every read or write is filtered by the caller's tenant.

use serde::{Deserialize, Serialize};
use tallybook_shared::types::{PartyId, TenantId};

/// A tenant owning ledgers, accounts, and journal entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique identifier.
    pub id: TenantId,
    /// Display name.
    pub name: String,
    /// Opaque tenant settings.
    pub settings: Option<serde_json::Value>,
}

/// Classification of a party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyType {
    /// A customer the tenant sells to.
    Customer,
    /// A vendor the tenant buys from.
    Vendor,
    /// An employee of the tenant.
    Employee,
    /// Any other counterparty.
    Other,
}

/// A counterparty that journal lines may reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    /// Unique identifier.
    pub id: PartyId,
    /// Tenant this party belongs to.
    pub tenant_id: TenantId,
    /// Party classification.
    pub party_type: PartyType,
    /// Display name.
    pub name: String,
}
