//! Read-side account queries
//!
//! `Queries` answers lookups over the Accounts relation without taking the
//! write path: single-account fetch by IBAN, all accounts owned by one
//! identity, and the full account listing. Rows come back as [`Account`]
//! values with the stored balance text parsed into a `Decimal`.

use crate::store::Store;
use crate::types::{Account, AccountId, IdentityId, LedgerError};
use rusqlite::{params, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::str::FromStr;

const ACCOUNT_COLUMNS: &str = "id, owner_id, iban, balance, account_type, frozen, created_at";

/// Account lookups over the shared store
pub struct Queries {
    store: Store,
}

type AccountRow = (AccountId, IdentityId, String, String, String, bool, String);

impl Queries {
    /// Create a Queries handle over the given store
    pub fn new(store: Store) -> Self {
        Queries { store }
    }

    /// Fetch the account carrying the given IBAN
    ///
    /// Returns `Ok(None)` when no account carries it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable or the stored balance
    /// text is unreadable.
    pub fn get_account(&self, iban: &str) -> Result<Option<Account>, LedgerError> {
        let conn = self.store.conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {ACCOUNT_COLUMNS} FROM Accounts WHERE iban = ?1"),
                params![iban],
                read_row,
            )
            .optional()?;
        row.map(into_account).transpose()
    }

    /// Fetch every account owned by the given identity, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable or a stored balance is
    /// unreadable.
    pub fn get_accounts_by_owner(&self, owner_id: IdentityId) -> Result<Vec<Account>, LedgerError> {
        let conn = self.store.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM Accounts WHERE owner_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt.query_map(params![owner_id], read_row)?;
        collect_accounts(rows)
    }

    /// Fetch every account in the store, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable or a stored balance is
    /// unreadable.
    pub fn get_all_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let conn = self.store.conn()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {ACCOUNT_COLUMNS} FROM Accounts ORDER BY id"))?;
        let rows = stmt.query_map([], read_row)?;
        collect_accounts(rows)
    }
}

fn read_row(row: &Row) -> rusqlite::Result<AccountRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn into_account(row: AccountRow) -> Result<Account, LedgerError> {
    let (id, owner_id, iban, balance_text, account_type, frozen, created_at) = row;
    let balance = Decimal::from_str(&balance_text).map_err(|_| LedgerError::StoreUnavailable {
        message: format!("unreadable balance for {iban}: '{balance_text}'"),
    })?;
    Ok(Account {
        id,
        owner_id,
        iban,
        balance,
        account_type,
        frozen,
        created_at,
    })
}

fn collect_accounts(
    rows: impl Iterator<Item = rusqlite::Result<AccountRow>>,
) -> Result<Vec<Account>, LedgerError> {
    let mut accounts = Vec::new();
    for row in rows {
        accounts.push(into_account(row?)?);
    }
    Ok(accounts)
}
