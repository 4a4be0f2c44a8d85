//! FX rate domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallybook_shared::types::CurrencyCode;

/// A base -> quote multiplier valid as of a given date.
///
/// Identified by (base, quote, as_of); storage enforces uniqueness on that
/// triple so "most recent rate" is well defined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FxRate {
    /// Base currency code.
    pub base: CurrencyCode,
    /// Quote currency code.
    pub quote: CurrencyCode,
    /// Date this rate takes effect.
    pub as_of: NaiveDate,
    /// Multiplier: 1 base = `rate` quote.
    pub rate: Decimal,
    /// Where the rate came from (e.g., "ECB", "manual").
    pub source: Option<String>,
    /// When the row was recorded.
    pub inserted_at: DateTime<Utc>,
}
