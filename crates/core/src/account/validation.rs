//! Creation-time account validation.
//!
//! These rules run when an account is created or reparented, not at posting
//! time: code/name shape, account-type vs normal-side consistency,
//! single-currency requirements, and parent hierarchy rules including cycle
//! detection by a bounded-depth walk over parent ids.

use thiserror::Error;

use tallybook_shared::types::AccountId;

use super::types::{Account, CurrencyMode, NormalSide};
use crate::storage::StorageError;

/// Maximum parent-chain depth walked during cycle detection.
const MAX_HIERARCHY_DEPTH: usize = 64;

/// Errors raised by account creation validation.
#[derive(Debug, Error)]
pub enum AccountValidationError {
    /// Account code is empty, too long, or not `[A-Z0-9]+`.
    #[error("Account code must be 1-50 uppercase letters or digits")]
    InvalidCode,

    /// Account name is empty or longer than 255 characters.
    #[error("Account name must be 1-255 characters")]
    InvalidName,

    /// Normal side contradicts the account type.
    #[error("{account_type:?} accounts must have normal side {expected:?}")]
    NormalSideMismatch {
        /// The declared account type.
        account_type: super::types::AccountType,
        /// The side that type requires.
        expected: NormalSide,
    },

    /// Single-currency accounts must carry a currency code.
    #[error("Single currency accounts must specify a currency code")]
    MissingCurrency,

    /// An account cannot be its own parent.
    #[error("Account cannot be its own parent")]
    OwnParent,

    /// Parent belongs to a different tenant.
    #[error("Parent account must belong to the same tenant")]
    ParentTenantMismatch,

    /// Parent belongs to a different ledger.
    #[error("Parent account must belong to the same ledger")]
    ParentLedgerMismatch,

    /// Parent account does not exist.
    #[error("Parent account not found: {0}")]
    ParentNotFound(AccountId),

    /// Reparenting would make the hierarchy cyclic.
    #[error("Account hierarchy must not contain cycles")]
    HierarchyCycle,

    /// Parent chain exceeds the supported depth.
    #[error("Account hierarchy exceeds maximum depth of {MAX_HIERARCHY_DEPTH}")]
    HierarchyTooDeep,

    /// Storage failure while walking the hierarchy.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Validates a candidate account at creation time.
///
/// Checks shape rules and type consistency; parent rules are validated
/// separately by [`validate_parent`] because they need a lookup.
pub fn validate_new_account(account: &Account) -> Result<(), AccountValidationError> {
    validate_code(&account.code)?;
    validate_name(&account.name)?;
    validate_type_consistency(account)?;
    validate_currency_mode(account)?;
    Ok(())
}

fn validate_code(code: &str) -> Result<(), AccountValidationError> {
    let ok = !code.is_empty()
        && code.len() <= 50
        && code.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(AccountValidationError::InvalidCode)
    }
}

fn validate_name(name: &str) -> Result<(), AccountValidationError> {
    let trimmed = name.trim();
    // The limit is 255 characters, not bytes; multibyte names count once
    // per character.
    if trimmed.is_empty() || trimmed.chars().count() > 255 {
        Err(AccountValidationError::InvalidName)
    } else {
        Ok(())
    }
}

/// ASSET/EXPENSE accounts must be debit-normal; LIABILITY/EQUITY/REVENUE
/// credit-normal. Contra accounts may sit on either side.
fn validate_type_consistency(account: &Account) -> Result<(), AccountValidationError> {
    if let Some(expected) = account.account_type.conventional_normal_side() {
        if account.normal_side != expected {
            return Err(AccountValidationError::NormalSideMismatch {
                account_type: account.account_type,
                expected,
            });
        }
    }
    Ok(())
}

fn validate_currency_mode(account: &Account) -> Result<(), AccountValidationError> {
    if account.currency_mode == CurrencyMode::Single && account.currency.is_none() {
        return Err(AccountValidationError::MissingCurrency);
    }
    Ok(())
}

/// Validates the parent relationship of an account.
///
/// The parent must exist, share tenant and ledger, must not be the account
/// itself, and must not make the account reachable from its own ancestry.
/// Cycle detection walks parent ids with a depth bound instead of
/// traversing a live object graph.
pub fn validate_parent<F>(
    account: &Account,
    parent_id: AccountId,
    lookup: F,
) -> Result<(), AccountValidationError>
where
    F: Fn(AccountId) -> Result<Option<Account>, StorageError>,
{
    if parent_id == account.id {
        return Err(AccountValidationError::OwnParent);
    }

    let parent = lookup(parent_id)?.ok_or(AccountValidationError::ParentNotFound(parent_id))?;

    if parent.tenant_id != account.tenant_id {
        return Err(AccountValidationError::ParentTenantMismatch);
    }
    if parent.ledger_id != account.ledger_id {
        return Err(AccountValidationError::ParentLedgerMismatch);
    }

    // Walk up from the parent; finding this account means a cycle.
    let mut cursor = parent.parent_account_id;
    for _ in 0..MAX_HIERARCHY_DEPTH {
        let Some(ancestor_id) = cursor else {
            return Ok(());
        };
        if ancestor_id == account.id {
            return Err(AccountValidationError::HierarchyCycle);
        }
        cursor = lookup(ancestor_id)?
            .ok_or(AccountValidationError::ParentNotFound(ancestor_id))?
            .parent_account_id;
    }

    Err(AccountValidationError::HierarchyTooDeep)
}
