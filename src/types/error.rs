//! Error types for the bank ledger
//!
//! This module defines the closed error taxonomy for ledger and store
//! operations. Every failure is typed and returned to the caller; nothing is
//! stringified into a catch-all along the way.
//!
//! # Error Categories
//!
//! - **Ledger Errors**: Missing accounts, frozen accounts, insufficient
//!   funds, invalid amounts
//! - **Uniqueness Errors**: Duplicate identity names or IBANs, surfaced from
//!   store-level constraints
//! - **Store Errors**: Bounded-wait expiry (`Busy`) and any other storage
//!   engine failure; the only classes a caller may treat as transient

use super::ledger::Party;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for ledger and store operations
///
/// Each variant carries enough context to diagnose the failure without
/// re-querying the store. All variants except `Busy` and `StoreUnavailable`
/// are deterministic: retrying with the same inputs and state reproduces the
/// same outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// No account carries the requested IBAN
    ///
    /// `party` is set when the lookup happened inside a transfer, so callers
    /// can tell which endpoint was missing.
    #[error("{}account {iban} not found", party.map(|p| format!("{} ", p)).unwrap_or_default())]
    AccountNotFound {
        /// IBAN that failed to resolve
        iban: String,
        /// Transfer side the IBAN belonged to, if any
        party: Option<Party>,
    },

    /// The account is frozen and rejects transfer participation
    #[error("{party} account {iban} is frozen")]
    FrozenAccount {
        /// IBAN of the frozen account
        iban: String,
        /// Transfer side the account sat on
        party: Party,
    },

    /// The sender balance cannot cover the requested transfer
    #[error("Insufficient funds for {iban}: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Sender IBAN
        iban: String,
        /// Balance at the time of the check
        available: Decimal,
        /// Amount the transfer asked for
        requested: Decimal,
    },

    /// A non-positive amount was supplied to a ledger operation
    ///
    /// Rejected before the store is touched, so a bad amount never opens a
    /// transaction.
    #[error("Invalid amount {amount}: ledger operations require a positive amount")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// An account with this IBAN already exists
    ///
    /// Raised from the store's uniqueness constraint, which closes the
    /// check-then-insert race a caller-side pre-check would leave open.
    #[error("An account with IBAN {iban} already exists")]
    DuplicateIban {
        /// IBAN that collided
        iban: String,
    },

    /// An identity with this name already exists
    #[error("An identity named '{name}' already exists")]
    DuplicateName {
        /// Name that collided
        name: String,
    },

    /// Checked decimal arithmetic failed
    ///
    /// The enclosing transaction rolls back and no balance changes.
    #[error("Arithmetic overflow in {operation} for {iban}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account whose balance was being computed
        iban: String,
    },

    /// The bounded wait for a pooled connection or store lock expired
    #[error("Store is busy: timed out waiting for a connection")]
    Busy,

    /// The storage engine failed outside the ledger taxonomy
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// Description of the underlying failure
        message: String,
    },
}

// Conversion from rusqlite::Error to LedgerError
//
// Busy/locked conditions surface as `Busy` so callers can retry; everything
// else is a store failure.
impl From<rusqlite::Error> for LedgerError {
    fn from(error: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, _) = &error {
            if matches!(
                code.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ) {
                return LedgerError::Busy;
            }
        }
        LedgerError::StoreUnavailable {
            message: error.to_string(),
        }
    }
}

/// Whether a store error is a UNIQUE constraint violation
///
/// Insert sites call this before the blanket conversion applies, turning
/// constraint failures into the matching `Duplicate*` variant.
pub(crate) fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(code, _)
            if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(iban: &str, party: Option<Party>) -> Self {
        LedgerError::AccountNotFound {
            iban: iban.to_string(),
            party,
        }
    }

    /// Create a FrozenAccount error
    pub fn frozen_account(iban: &str, party: Party) -> Self {
        LedgerError::FrozenAccount {
            iban: iban.to_string(),
            party,
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(iban: &str, available: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            iban: iban.to_string(),
            available,
            requested,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create a DuplicateIban error
    pub fn duplicate_iban(iban: &str) -> Self {
        LedgerError::DuplicateIban {
            iban: iban.to_string(),
        }
    }

    /// Create a DuplicateName error
    pub fn duplicate_name(name: &str) -> Self {
        LedgerError::DuplicateName {
            name: name.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, iban: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            iban: iban.to_string(),
        }
    }
}
