//! Account domain types.

use serde::{Deserialize, Serialize};
use tallybook_shared::types::{AccountId, CurrencyCode, LedgerId, TenantId};

/// Side of the books an amount lands on.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/revenue accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/revenue accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalSide {
    /// Debit side.
    Debit,
    /// Credit side.
    Credit,
}

/// Account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Resources owned (cash, receivables, inventory).
    Asset,
    /// Obligations owed (payables, loans).
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
    /// Offsets another account's balance.
    Contra,
}

impl AccountType {
    /// Returns the normal side conventional for this account type, or
    /// `None` where either side is acceptable (contra accounts).
    #[must_use]
    pub const fn conventional_normal_side(&self) -> Option<NormalSide> {
        match self {
            Self::Asset | Self::Expense => Some(NormalSide::Debit),
            Self::Liability | Self::Equity | Self::Revenue => Some(NormalSide::Credit),
            Self::Contra => None,
        }
    }
}

/// Whether an account is pinned to a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyMode {
    /// Lines against this account must use the account's currency.
    Single,
    /// Lines may use any currency.
    Multi,
}

/// A chart-of-accounts entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Tenant this account belongs to.
    pub tenant_id: TenantId,
    /// Ledger this account belongs to.
    pub ledger_id: LedgerId,
    /// Unique account code (uppercase letters and digits).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// The balance-increasing side for this account.
    pub normal_side: NormalSide,
    /// Single- or multi-currency mode.
    pub currency_mode: CurrencyMode,
    /// Pinned currency; required when `currency_mode` is `Single`.
    pub currency: Option<CurrencyCode>,
    /// Whether the account accepts new postings.
    pub is_active: bool,
    /// Optional parent account (hierarchy by id, never a live reference).
    pub parent_account_id: Option<AccountId>,
}
