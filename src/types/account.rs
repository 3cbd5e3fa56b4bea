//! Identity and account snapshot types
//!
//! This module defines the snapshot structures returned by the store. The
//! store exclusively owns entity state; snapshots are point-in-time copies
//! and are never written back, so every operation re-reads from the store.

use rust_decimal::Decimal;

/// Identity identifier (store-assigned rowid)
pub type IdentityId = i64;

/// Account identifier (store-assigned rowid)
pub type AccountId = i64;

/// Role assigned to identities created with a blank or whitespace role
pub const DEFAULT_ROLE: &str = "Customer";

/// Login principal snapshot
///
/// Represents one row of the identities relation, minus the password: the
/// secret is only ever compared inside the store and never leaves it in a
/// snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// Store-assigned identifier
    pub id: IdentityId,

    /// Login name
    pub name: String,

    /// Free-text role; `"Customer"` routes to the customer menu
    pub role: String,

    /// Creation timestamp, set once by the store
    pub created_at: String,
}

impl Identity {
    /// Whether this identity carries the customer role
    pub fn is_customer(&self) -> bool {
        self.role == DEFAULT_ROLE
    }
}

/// Bank account snapshot
///
/// Represents one IBAN-addressed account as of call time. The balance moves
/// only through deposit, withdraw, and transfer; the frozen flag rejects
/// transfer participation on either side until cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Store-assigned identifier
    pub id: AccountId,

    /// Identity that owns this account
    pub owner_id: IdentityId,

    /// Unique identifier string, the primary lookup key for all ledger
    /// operations
    pub iban: String,

    /// Current balance at the time of the snapshot
    pub balance: Decimal,

    /// Free-text account classification, e.g. "Savings" or "Current"
    pub account_type: String,

    /// Whether the account currently rejects transfer participation
    pub frozen: bool,

    /// Creation timestamp, set once by the store
    pub created_at: String,
}
