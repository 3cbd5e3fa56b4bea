//! Ledger operation tags and transfer parties
//!
//! Small enums shared between the ledger engine and the error taxonomy:
//! the operation tag recorded in the transaction log, and the side of a
//! transfer a failure refers to.

use std::fmt;

/// Mutating ledger operations
///
/// Each successful operation appends one row to the transaction log with
/// this tag in the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOp {
    /// Credit funds to a single account
    Deposit,

    /// Debit funds from a single account
    Withdraw,

    /// Move funds between two accounts atomically
    Transfer,
}

impl LedgerOp {
    /// Tag stored in the transaction log
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerOp::Deposit => "deposit",
            LedgerOp::Withdraw => "withdraw",
            LedgerOp::Transfer => "transfer",
        }
    }
}

impl fmt::Display for LedgerOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of a transfer a failure refers to
///
/// Transfer validation checks the sender before the receiver; the party
/// carried by an error tells callers which side tripped the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    /// The account funds move out of
    Sender,

    /// The account funds move into
    Receiver,
}

impl Party {
    /// Lowercase name used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Party::Sender => "sender",
            Party::Receiver => "receiver",
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
