//! Conversion of line amounts into a ledger's functional currency.
//!
//! CRITICAL: Rounding semantics are load-bearing for reproducibility.
//! - Identity (same currency): rate 1, amount unchanged, no rounding.
//! - Direct rate: decimal multiply, then truncate toward zero to minor units.
//! - Inverse fallback: decimal divide rounded to 6 decimal places half-up,
//!   then truncate toward zero to minor units.
//!
//! The decimal API `convert_amount` keeps 6-decimal-place half-up results
//! without truncation.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tallybook_shared::types::CurrencyCode;

use super::types::FxRate;
use crate::journal::error::PostingError;
use crate::storage::StorageError;

/// Result of converting one journal line to functional currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineConversion {
    /// The rate applied (1 for identity; effective rate for inverse fallback).
    pub fx_rate: Decimal,
    /// The amount in functional-currency minor units.
    pub functional_amount_minor: i64,
}

/// Converts a line's face amount to the ledger's functional currency.
///
/// Tries, in order: identity, the direct (line -> functional) rate, the
/// inverse (functional -> line) rate. `lookup` must return the most recent
/// rate with `as_of` not after the requested date for the exact pair.
///
/// # Errors
///
/// `CurrencyConversion` if neither a direct nor an inverse rate exists,
/// `AmountOverflow` if the converted amount exceeds 64-bit minor units.
pub fn convert_to_functional<F>(
    currency: &CurrencyCode,
    amount_minor: i64,
    functional: &CurrencyCode,
    as_of: NaiveDate,
    lookup: F,
) -> Result<LineConversion, PostingError>
where
    F: Fn(&CurrencyCode, &CurrencyCode, NaiveDate) -> Result<Option<FxRate>, StorageError>,
{
    if currency == functional {
        return Ok(LineConversion {
            fx_rate: Decimal::ONE,
            functional_amount_minor: amount_minor,
        });
    }

    if let Some(direct) = lookup(currency, functional, as_of)? {
        // Decimal's plain `*` panics past 28 digits; a huge minor amount
        // times a large rate must surface as an error instead.
        let converted = Decimal::from(amount_minor)
            .checked_mul(direct.rate)
            .ok_or(PostingError::AmountOverflow)?;
        return Ok(LineConversion {
            fx_rate: direct.rate,
            functional_amount_minor: to_minor(converted)?,
        });
    }

    if let Some(inverse) = lookup(functional, currency, as_of)? {
        let converted = Decimal::from(amount_minor)
            .checked_div(inverse.rate)
            .ok_or(PostingError::AmountOverflow)?
            .round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero);
        // Report the effective rate at the same 6-place policy as the
        // amount, so repeating quotients like 1/3 persist cleanly.
        let fx_rate = Decimal::ONE
            .checked_div(inverse.rate)
            .ok_or(PostingError::AmountOverflow)?
            .round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero);
        return Ok(LineConversion {
            fx_rate,
            functional_amount_minor: to_minor(converted)?,
        });
    }

    Err(PostingError::CurrencyConversion {
        base: currency.clone(),
        quote: functional.clone(),
        as_of,
    })
}

/// Converts a decimal amount between two currencies, for direct use outside
/// posting. Applies the same identity/direct/inverse resolution but returns
/// a decimal scaled to 6 places half-up instead of minor units.
pub fn convert_amount<F>(
    amount: Decimal,
    from: &CurrencyCode,
    to: &CurrencyCode,
    as_of: NaiveDate,
    lookup: F,
) -> Result<Decimal, PostingError>
where
    F: Fn(&CurrencyCode, &CurrencyCode, NaiveDate) -> Result<Option<FxRate>, StorageError>,
{
    if from == to {
        return Ok(amount);
    }

    if let Some(direct) = lookup(from, to, as_of)? {
        return Ok(amount
            .checked_mul(direct.rate)
            .ok_or(PostingError::AmountOverflow)?
            .round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero));
    }

    if let Some(inverse) = lookup(to, from, as_of)? {
        return Ok(amount
            .checked_div(inverse.rate)
            .ok_or(PostingError::AmountOverflow)?
            .round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero));
    }

    Err(PostingError::CurrencyConversion {
        base: from.clone(),
        quote: to.clone(),
        as_of,
    })
}

/// Truncates a decimal toward zero into 64-bit minor units.
fn to_minor(amount: Decimal) -> Result<i64, PostingError> {
    amount.trunc().to_i64().ok_or(PostingError::AmountOverflow)
}
