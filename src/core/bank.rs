//! Bank facade
//!
//! `Bank` wires the store, account administration, ledger engine, and read
//! queries into one handle. Opening a bank ensures the schema exists, so a
//! fresh database file is usable immediately. The handle is `Send` and
//! `Sync`; clones of the underlying store share one connection pool, and
//! callers on separate threads go through it concurrently.

use crate::core::accounts::AccountStore;
use crate::core::ledger::LedgerEngine;
use crate::core::queries::Queries;
use crate::core::schema;
use crate::store::{PoolOptions, Store};
use crate::types::{Account, Identity, IdentityId, LedgerError};
use rust_decimal::Decimal;
use std::path::Path;

/// Facade over account administration, ledger operations, and queries
pub struct Bank {
    store: Store,
    accounts: AccountStore,
    ledger: LedgerEngine,
    queries: Queries,
}

impl Bank {
    /// Open the database at `path` and ensure the schema exists
    ///
    /// # Arguments
    ///
    /// * `path` - Database file, created if absent
    /// * `options` - Pool sizing and timeout settings
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// statements fail.
    pub fn open(path: impl AsRef<Path>, options: PoolOptions) -> Result<Self, LedgerError> {
        let store = Store::open(path, options)?;
        {
            let conn = store.conn()?;
            schema::ensure_schema(&conn)?;
        }
        tracing::info!("bank ledger ready");
        Ok(Bank {
            accounts: AccountStore::new(store.clone()),
            ledger: LedgerEngine::new(store.clone()),
            queries: Queries::new(store.clone()),
            store,
        })
    }

    /// Drop and recreate every relation, discarding all rows
    ///
    /// Runs as one store transaction; a half-reset state is never visible.
    /// The handle stays usable afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset transaction fails.
    pub fn reset(&self) -> Result<(), LedgerError> {
        let mut conn = self.store.conn()?;
        schema::reset_schema(&mut conn)
    }

    /// Register a new identity; see [`AccountStore::create_identity`]
    pub fn create_identity(
        &self,
        name: &str,
        password: &str,
        role: &str,
    ) -> Result<Identity, LedgerError> {
        self.accounts.create_identity(name, password, role)
    }

    /// Check a name/password pair; see [`AccountStore::validate_login`]
    pub fn validate_login(
        &self,
        name: &str,
        password: &str,
    ) -> Result<Option<Identity>, LedgerError> {
        self.accounts.validate_login(name, password)
    }

    /// Open an account under an identity; see [`AccountStore::create_account`]
    pub fn create_account(
        &self,
        owner_id: IdentityId,
        iban: &str,
        initial_balance: Decimal,
        account_type: &str,
    ) -> Result<Account, LedgerError> {
        self.accounts
            .create_account(owner_id, iban, initial_balance, account_type)
    }

    /// Remove the account with the given IBAN; see [`AccountStore::delete_account`]
    pub fn delete_account(&self, iban: &str) -> Result<(), LedgerError> {
        self.accounts.delete_account(iban)
    }

    /// Set or clear an account's freeze flag; see [`AccountStore::set_frozen`]
    pub fn set_frozen(&self, iban: &str, frozen: bool) -> Result<(), LedgerError> {
        self.accounts.set_frozen(iban, frozen)
    }

    /// Credit an account; see [`LedgerEngine::deposit`]
    pub fn deposit(&self, iban: &str, amount: Decimal) -> Result<(), LedgerError> {
        self.ledger.deposit(iban, amount)
    }

    /// Debit an account; see [`LedgerEngine::withdraw`]
    pub fn withdraw(&self, iban: &str, amount: Decimal) -> Result<(), LedgerError> {
        self.ledger.withdraw(iban, amount)
    }

    /// Move funds between accounts; see [`LedgerEngine::transfer`]
    pub fn transfer(
        &self,
        from_iban: &str,
        to_iban: &str,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        self.ledger.transfer(from_iban, to_iban, amount)
    }

    /// Fetch one account by IBAN; see [`Queries::get_account`]
    pub fn get_account(&self, iban: &str) -> Result<Option<Account>, LedgerError> {
        self.queries.get_account(iban)
    }

    /// Fetch an identity's accounts; see [`Queries::get_accounts_by_owner`]
    pub fn get_accounts_by_owner(
        &self,
        owner_id: IdentityId,
    ) -> Result<Vec<Account>, LedgerError> {
        self.queries.get_accounts_by_owner(owner_id)
    }

    /// Fetch every account; see [`Queries::get_all_accounts`]
    pub fn get_all_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        self.queries.get_all_accounts()
    }
}
