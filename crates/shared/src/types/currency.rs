//! Currency codes and currency reference data.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are carried as integer minor units; rates as `rust_decimal::Decimal`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a currency code fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid currency code: {0}")]
pub struct CurrencyCodeError(pub String);

/// A validated ISO 4217 currency code (exactly 3 uppercase ASCII letters).
///
/// Comparison is case-sensitive by construction: codes are only ever stored
/// in their canonical uppercase form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a currency code, validating the 3-uppercase-letter shape.
    pub fn new(code: &str) -> Result<Self, CurrencyCodeError> {
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(code.to_string()))
        } else {
            Err(CurrencyCodeError(code.to_string()))
        }
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Rounding policy applied when presenting amounts in a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Round half away from zero.
    HalfUp,
    /// Round half to even (banker's rounding).
    HalfEven,
    /// Truncate toward zero.
    Truncate,
}

/// Currency reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code.
    pub code: CurrencyCode,
    /// Display name (e.g., "US Dollar").
    pub name: String,
    /// Minor-unit exponent (2 for USD cents, 0 for JPY).
    pub exponent: u32,
    /// Rounding policy for presentation.
    pub rounding: RoundingPolicy,
}
