//! Schema management
//!
//! Creates the three persistent relations and supports a destructive full
//! reset. `ensure_schema` is idempotent and safe on every process start;
//! `reset_schema` wraps the whole drop-and-recreate sequence in one
//! transaction so a mid-way failure leaves the prior schema intact.
//!
//! Foreign keys are declared but not enforced: the storage engine's default
//! is preserved, so deleting an account with log history succeeds and an
//! account may reference an owner id with no identity row.

use crate::types::LedgerError;
use rusqlite::{Connection, TransactionBehavior};

const SCHEMA_SQL: &str = "\
CREATE TABLE IF NOT EXISTS Identities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'Customer',
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS Accounts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL REFERENCES Identities(id),
    iban TEXT NOT NULL UNIQUE,
    balance TEXT NOT NULL DEFAULT '0',
    account_type TEXT NOT NULL,
    frozen INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_accounts_owner ON Accounts(owner_id);
CREATE TABLE IF NOT EXISTS TransactionLog (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_id INTEGER NOT NULL REFERENCES Accounts(id),
    type TEXT NOT NULL,
    amount TEXT NOT NULL,
    target_account_id INTEGER REFERENCES Accounts(id),
    date TEXT NOT NULL
);
";

// Children first so the declared references never dangle mid-reset
const DROP_SQL: &str = "\
DROP TABLE IF EXISTS TransactionLog;
DROP TABLE IF EXISTS Accounts;
DROP TABLE IF EXISTS Identities;
";

/// Create the relations if they are absent
///
/// # Errors
///
/// Returns `StoreUnavailable` if the schema statements fail.
pub fn ensure_schema(conn: &Connection) -> Result<(), LedgerError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Drop and recreate all relations as one atomic unit
///
/// Either the whole reset commits (old data gone, fresh empty schema in
/// place) or the store is left unchanged. Calling it twice in a row succeeds
/// both times.
///
/// # Errors
///
/// Returns `Busy` if the reset cannot acquire the write lock in time, or
/// `StoreUnavailable` for any other failure; in both cases the transaction
/// rolls back.
pub fn reset_schema(conn: &mut Connection) -> Result<(), LedgerError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute_batch(DROP_SQL)?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.commit()?;

    tracing::debug!("schema reset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            )
            .unwrap();
        let names = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap();
        names
    }

    #[test]
    fn test_ensure_schema_creates_all_relations() {
        let conn = Connection::open_in_memory().unwrap();

        ensure_schema(&conn).unwrap();

        assert_eq!(table_names(&conn), vec!["Accounts", "Identities", "TransactionLog"]);
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        assert_eq!(table_names(&conn).len(), 3);
    }

    #[test]
    fn test_ensure_schema_preserves_existing_rows() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO Identities (name, password, role, created_at) \
             VALUES ('User1', 'pass1', 'Customer', '2024-01-01 00:00:00')",
            [],
        )
        .unwrap();

        ensure_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM Identities", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_reset_schema_clears_existing_rows() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO Identities (name, password, role, created_at) \
             VALUES ('User1', 'pass1', 'Customer', '2024-01-01 00:00:00')",
            [],
        )
        .unwrap();

        reset_schema(&mut conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM Identities", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_reset_schema_twice_in_a_row_succeeds() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();

        reset_schema(&mut conn).unwrap();
        reset_schema(&mut conn).unwrap();

        assert_eq!(table_names(&conn).len(), 3);
    }

    #[test]
    fn test_reset_schema_works_on_a_fresh_database() {
        let mut conn = Connection::open_in_memory().unwrap();

        reset_schema(&mut conn).unwrap();

        assert_eq!(table_names(&conn).len(), 3);
    }
}
