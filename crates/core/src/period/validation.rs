//! Period management state rules.
//!
//! Periods move OPEN -> CLOSED -> LOCKED. Closing requires OPEN, locking
//! requires CLOSED, and LOCKED is terminal. Reopening additionally requires
//! that no other period of the ledger is already open.

use chrono::NaiveDate;
use thiserror::Error;

use super::types::{Period, PeriodStatus};

/// Errors raised by period management validation.
#[derive(Debug, Error)]
pub enum PeriodValidationError {
    /// Period name is empty or longer than 255 characters.
    #[error("Period name must be 1-255 characters")]
    InvalidName,

    /// Start date falls after end date.
    #[error("Start date cannot be after end date")]
    StartAfterEnd,

    /// Date range overlaps an existing period of the ledger.
    #[error("Period overlaps existing period {name}")]
    Overlap {
        /// Name of the period already covering part of the range.
        name: String,
    },

    /// Only OPEN periods can be closed.
    #[error("Only OPEN periods can be closed")]
    NotOpen,

    /// Only CLOSED periods can be locked.
    #[error("Only CLOSED periods can be locked")]
    NotClosed,

    /// LOCKED periods can never be reopened.
    #[error("LOCKED periods cannot be reopened")]
    Locked,

    /// Another period of the ledger is already open.
    #[error("Cannot reopen period: another period is already open")]
    AnotherPeriodOpen,
}

/// Validates the shape of a new period.
pub fn validate_creation(
    name: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), PeriodValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > 255 {
        return Err(PeriodValidationError::InvalidName);
    }
    if start_date > end_date {
        return Err(PeriodValidationError::StartAfterEnd);
    }
    Ok(())
}

/// Rejects a date range that overlaps any existing period of the ledger.
pub fn validate_no_overlap(
    start_date: NaiveDate,
    end_date: NaiveDate,
    existing: &[Period],
) -> Result<(), PeriodValidationError> {
    for period in existing {
        if start_date <= period.end_date && end_date >= period.start_date {
            return Err(PeriodValidationError::Overlap {
                name: period.name.clone(),
            });
        }
    }
    Ok(())
}

/// A period can be closed only from OPEN.
pub fn validate_can_close(period: &Period) -> Result<(), PeriodValidationError> {
    if period.status == PeriodStatus::Open {
        Ok(())
    } else {
        Err(PeriodValidationError::NotOpen)
    }
}

/// A period can be locked only from CLOSED.
pub fn validate_can_lock(period: &Period) -> Result<(), PeriodValidationError> {
    if period.status == PeriodStatus::Closed {
        Ok(())
    } else {
        Err(PeriodValidationError::NotClosed)
    }
}

/// A period can be reopened unless it is LOCKED, and only while no other
/// period of the ledger is open.
pub fn validate_can_reopen(
    period: &Period,
    open_period: Option<&Period>,
) -> Result<(), PeriodValidationError> {
    if period.status == PeriodStatus::Locked {
        return Err(PeriodValidationError::Locked);
    }
    if let Some(open) = open_period {
        if open.id != period.id {
            return Err(PeriodValidationError::AnotherPeriodOpen);
        }
    }
    Ok(())
}
