//! Bank Ledger Library
//! # Overview
//!
//! This library provides a small bank over a pooled SQLite store: identity
//! and account administration, balance movement under per-operation
//! transactions, and an interactive console on top.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Identity, Account, LedgerError, etc.)
//! - [`cli`] - CLI argument parsing
//! - [`config`] - TOML configuration with defaults for every field
//! - [`store`] - Bounded connection pool over one SQLite database
//! - [`core`] - Business logic components:
//!   - [`core::schema`] - Relation creation and atomic reset
//!   - [`core::accounts`] - Identity and account administration
//!   - [`core::ledger`] - Deposit, withdraw, and transfer
//!   - [`core::queries`] - Read-side account lookups
//!   - [`core::bank`] - Facade tying the components together
//! - [`console`] - Interactive menus for administrators and customers
//!
//! # Ledger Operations
//!
//! The ledger supports three operations:
//!
//! - **Deposit**: Credit funds to an account
//! - **Withdraw**: Debit funds from an account (no funds or freeze check;
//!   balances may go negative)
//! - **Transfer**: Move funds between accounts with ordered validation of
//!   both endpoints
//!
//! # Invariants
//!
//! Every mutating operation is one store transaction: it applies fully and
//! appends one audit row, or it rolls back and leaves no trace. A transfer
//! conserves money across its two accounts, and its validation order is
//! fixed, so the reported rejection reason is deterministic.

// Module declarations
pub mod cli;
pub mod config;
pub mod console;
pub mod core;
pub mod store;
pub mod types;

pub use config::{AdminCredentials, Config};
pub use core::{AccountStore, Bank, LedgerEngine, Queries};
pub use store::{PoolOptions, PooledConn, Store};
pub use types::{
    Account, AccountId, Identity, IdentityId, LedgerError, LedgerOp, Party,
};
