//! Exact-integer balance accumulation.
//!
//! The double-entry invariant: functional debits must equal functional
//! credits exactly, as 64-bit integers in minor units. Never approximated,
//! never floating point.

use crate::account::NormalSide;

use super::error::PostingError;

/// Running functional-currency totals for one entry's lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceTotals {
    debits: i64,
    credits: i64,
}

impl BalanceTotals {
    /// Creates empty totals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one line's functional amount to the side it lands on.
    ///
    /// # Errors
    ///
    /// `AmountOverflow` if a running total exceeds `i64`.
    pub fn accumulate(
        &mut self,
        direction: NormalSide,
        functional_amount_minor: i64,
    ) -> Result<(), PostingError> {
        match direction {
            NormalSide::Debit => {
                self.debits = self
                    .debits
                    .checked_add(functional_amount_minor)
                    .ok_or(PostingError::AmountOverflow)?;
            }
            NormalSide::Credit => {
                self.credits = self
                    .credits
                    .checked_add(functional_amount_minor)
                    .ok_or(PostingError::AmountOverflow)?;
            }
        }
        Ok(())
    }

    /// Total functional debits in minor units.
    #[must_use]
    pub const fn debits(&self) -> i64 {
        self.debits
    }

    /// Total functional credits in minor units.
    #[must_use]
    pub const fn credits(&self) -> i64 {
        self.credits
    }

    /// Returns true iff debits equal credits exactly.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.debits == self.credits
    }

    /// Enforces the double-entry invariant.
    pub const fn require_balanced(&self) -> Result<(), PostingError> {
        if self.is_balanced() {
            Ok(())
        } else {
            Err(PostingError::Unbalanced {
                debits: self.debits,
                credits: self.credits,
            })
        }
    }
}
