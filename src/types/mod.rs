//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Identity and account snapshot types
//! - `ledger`: Operation tags and transfer parties
//! - `error`: The closed error taxonomy for ledger and store operations

pub mod account;
pub mod error;
pub mod ledger;

pub use account::{Account, AccountId, Identity, IdentityId, DEFAULT_ROLE};
pub use error::LedgerError;
pub use ledger::{LedgerOp, Party};
