//! Shared types and configuration for Tallybook.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Currency codes and currency reference data
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
