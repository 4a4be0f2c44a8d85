//! Posting-time account checks.
//!
//! Resolves accounts referenced by journal lines and enforces the
//! constraints that gate posting: tenant scope, the active flag, and
//! single-currency mode. All checks are read-only.

use tallybook_shared::types::{AccountId, CurrencyCode};

use super::types::{Account, CurrencyMode};
use crate::context::TenantContext;
use crate::journal::error::PostingError;
use crate::storage::StorageError;

/// Read-only directory over the chart of accounts.
pub struct AccountDirectory;

impl AccountDirectory {
    /// Resolves an account by id, scoped to the caller's tenant.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if absent, `TenantMismatch` if it belongs to
    /// another tenant.
    pub fn resolve<F>(
        account_id: AccountId,
        ctx: &TenantContext,
        lookup: F,
    ) -> Result<Account, PostingError>
    where
        F: Fn(AccountId) -> Result<Option<Account>, StorageError>,
    {
        let account = lookup(account_id)?.ok_or(PostingError::AccountNotFound(account_id))?;

        if account.tenant_id != ctx.tenant_id() {
            return Err(PostingError::TenantMismatch { resource: "account" });
        }

        Ok(account)
    }

    /// Requires that the account accepts new postings.
    pub fn require_active(account: &Account) -> Result<(), PostingError> {
        if account.is_active {
            Ok(())
        } else {
            Err(PostingError::AccountInactive {
                code: account.code.clone(),
            })
        }
    }

    /// Requires that a line's currency is acceptable for the account.
    ///
    /// Single-currency accounts accept exactly their pinned currency;
    /// multi-currency accounts accept any code.
    pub fn require_currency_allowed(
        account: &Account,
        line_currency: &CurrencyCode,
    ) -> Result<(), PostingError> {
        if account.currency_mode == CurrencyMode::Single {
            match &account.currency {
                Some(pinned) if pinned == line_currency => {}
                _ => {
                    return Err(PostingError::CurrencyNotAllowed {
                        account_code: account.code.clone(),
                        required: account.currency.clone(),
                        got: line_currency.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
