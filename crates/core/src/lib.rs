//! Core business logic for Tallybook.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and the journal-entry
//! posting engine live here; persistence is reached only through the
//! [`storage::LedgerStore`] trait.
//!
//! # Modules
//!
//! - `journal` - Journal entries, postings, and the posting engine
//! - `account` - Chart of accounts and account validation
//! - `period` - Accounting periods and period state rules
//! - `fx` - FX rates and functional-currency conversion
//! - `ledger` - Ledger domain type
//! - `tenancy` - Tenants and parties
//! - `context` - Per-request tenant scope
//! - `storage` - Storage traits the core consumes

pub mod account;
pub mod context;
pub mod fx;
pub mod journal;
pub mod ledger;
pub mod period;
pub mod storage;
pub mod tenancy;
