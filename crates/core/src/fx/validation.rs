//! FX rate upsert validation.

use rust_decimal::Decimal;
use thiserror::Error;

use tallybook_shared::types::CurrencyCode;

/// Errors raised when recording an FX rate.
#[derive(Debug, Error)]
pub enum FxValidationError {
    /// Rate must be strictly positive.
    #[error("Exchange rate must be positive")]
    NonPositiveRate,

    /// Base and quote must differ.
    #[error("Base and quote currencies must be different")]
    SameCurrencyPair,
}

/// Validates an upsert of a (base, quote, as_of) rate row.
pub fn validate_rate_upsert(
    base: &CurrencyCode,
    quote: &CurrencyCode,
    rate: Decimal,
) -> Result<(), FxValidationError> {
    if base == quote {
        return Err(FxValidationError::SameCurrencyPair);
    }
    if rate <= Decimal::ZERO {
        return Err(FxValidationError::NonPositiveRate);
    }
    Ok(())
}
