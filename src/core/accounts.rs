//! Identity and account management
//!
//! This module provides the `AccountStore` struct covering the CRUD side of
//! the ledger: login identities (name, password, role) and bank accounts
//! (IBAN, owner, balance, type, frozen flag).
//!
//! Uniqueness of identity names and IBANs is enforced by store-level
//! constraints; the resulting violation is the authoritative duplicate
//! signal rather than a racy read-before-insert check.

use crate::core::timestamp_now;
use crate::store::Store;
use crate::types::error::is_unique_violation;
use crate::types::{Account, Identity, IdentityId, LedgerError, DEFAULT_ROLE};
use rusqlite::{params, OptionalExtension};
use rust_decimal::Decimal;

/// Identity and account CRUD over the shared store
pub struct AccountStore {
    store: Store,
}

impl AccountStore {
    /// Create an AccountStore over the given store handle
    pub fn new(store: Store) -> Self {
        AccountStore { store }
    }

    /// Insert a new login identity
    ///
    /// The id and creation timestamp are assigned here; a blank or
    /// whitespace role falls back to `"Customer"`.
    ///
    /// # Arguments
    ///
    /// * `name` - Login name, unique across identities
    /// * `password` - Secret compared verbatim at login
    /// * `role` - Free-text role, defaulted when blank
    ///
    /// # Returns
    ///
    /// The stored identity snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if an identity with `name` already exists.
    pub fn create_identity(
        &self,
        name: &str,
        password: &str,
        role: &str,
    ) -> Result<Identity, LedgerError> {
        let role = if role.trim().is_empty() { DEFAULT_ROLE } else { role };
        let created_at = timestamp_now();

        let conn = self.store.conn()?;
        let inserted = conn.execute(
            "INSERT INTO Identities (name, password, role, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
            params![name, password, role, created_at],
        );
        match inserted {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                return Err(LedgerError::duplicate_name(name));
            }
            Err(err) => return Err(err.into()),
        }

        let id = conn.last_insert_rowid();
        tracing::debug!(id, name, role, "created identity");

        Ok(Identity {
            id,
            name: name.to_string(),
            role: role.to_string(),
            created_at,
        })
    }

    /// Look up an identity by exact credentials
    ///
    /// Absence is a normal outcome, not an error: a wrong name or password
    /// returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `Busy` or `StoreUnavailable` on store failure.
    pub fn validate_login(
        &self,
        name: &str,
        password: &str,
    ) -> Result<Option<Identity>, LedgerError> {
        let conn = self.store.conn()?;
        let identity = conn
            .query_row(
                "SELECT id, name, role, created_at FROM Identities \
                 WHERE name = ?1 AND password = ?2",
                params![name, password],
                |row| {
                    Ok(Identity {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        role: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(identity)
    }

    /// Insert a new bank account bound to an owner identity
    ///
    /// The owner id is stored as given; an id with no matching identity
    /// row is accepted, since the declared reference is not enforced.
    ///
    /// # Arguments
    ///
    /// * `owner_id` - Identity the account belongs to
    /// * `iban` - Unique identifier string, the lookup key for all ledger
    ///   operations
    /// * `initial_balance` - Opening balance
    /// * `account_type` - Free-text classification, e.g. "Savings"
    ///
    /// # Returns
    ///
    /// The stored account snapshot, unfrozen.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIban` if an account with `iban` already exists.
    pub fn create_account(
        &self,
        owner_id: IdentityId,
        iban: &str,
        initial_balance: Decimal,
        account_type: &str,
    ) -> Result<Account, LedgerError> {
        let created_at = timestamp_now();

        let conn = self.store.conn()?;
        let inserted = conn.execute(
            "INSERT INTO Accounts (owner_id, iban, balance, account_type, frozen, created_at) \
             VALUES (?1, ?2, ?3, ?4, 0, ?5)",
            params![
                owner_id,
                iban,
                initial_balance.to_string(),
                account_type,
                created_at
            ],
        );
        match inserted {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                return Err(LedgerError::duplicate_iban(iban));
            }
            Err(err) => return Err(err.into()),
        }

        let id = conn.last_insert_rowid();
        tracing::debug!(id, iban, owner_id, "created account");

        Ok(Account {
            id,
            owner_id,
            iban: iban.to_string(),
            balance: initial_balance,
            account_type: account_type.to_string(),
            frozen: false,
            created_at,
        })
    }

    /// Delete the account with the given IBAN
    ///
    /// A missing IBAN is a no-op, not an error; callers that must report
    /// "does not exist" distinctly check existence first.
    ///
    /// # Errors
    ///
    /// Returns `Busy` or `StoreUnavailable` on store failure.
    pub fn delete_account(&self, iban: &str) -> Result<(), LedgerError> {
        let conn = self.store.conn()?;
        conn.execute("DELETE FROM Accounts WHERE iban = ?1", params![iban])?;
        Ok(())
    }

    /// Set or clear the frozen flag on an account
    ///
    /// A missing IBAN is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Busy` or `StoreUnavailable` on store failure.
    pub fn set_frozen(&self, iban: &str, frozen: bool) -> Result<(), LedgerError> {
        let conn = self.store.conn()?;
        conn.execute(
            "UPDATE Accounts SET frozen = ?1 WHERE iban = ?2",
            params![frozen, iban],
        )?;
        Ok(())
    }
}
