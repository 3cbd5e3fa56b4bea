//! Core banking logic
//!
//! This module contains the core ledger components:
//! - `schema` - Relation creation and atomic reset
//! - `accounts` - Identity and account administration
//! - `ledger` - Balance movement under per-operation transactions
//! - `queries` - Read-side account lookups
//! - `bank` - Facade tying the above together over one shared store

pub mod accounts;
pub mod bank;
pub mod ledger;
pub mod queries;
pub mod schema;

pub use accounts::AccountStore;
pub use bank::Bank;
pub use ledger::LedgerEngine;
pub use queries::Queries;

/// Wall-clock timestamp in the stored `YYYY-MM-DD HH:MM:SS` format
pub(crate) fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
