//! Store module
//!
//! SQLite access for the ledger. All entity state lives in the database;
//! in-process code holds no cache of it. `Store` is a cheap cloneable handle
//! over the shared connection pool, and every operation checks a connection
//! out for exactly its own duration.

mod pool;

pub use pool::{PoolOptions, PooledConn};

use crate::types::LedgerError;
use pool::Pool;
use std::path::Path;
use std::sync::Arc;

/// Shared handle to the ledger database
///
/// Clones share one pool, so a `Store` can be handed to each component and
/// to each session thread without multiplying connections.
#[derive(Clone)]
pub struct Store {
    pool: Arc<Pool>,
}

impl Store {
    /// Open (or create) the database at `path` behind a connection pool
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the database cannot be opened.
    pub fn open(path: impl AsRef<Path>, options: PoolOptions) -> Result<Self, LedgerError> {
        let pool = Pool::open(path.as_ref(), &options)?;
        Ok(Store {
            pool: Arc::new(pool),
        })
    }

    /// Check a connection out of the pool for one operation
    ///
    /// # Errors
    ///
    /// Returns `Busy` if every connection stays checked out past the
    /// configured wait bound.
    pub fn conn(&self) -> Result<PooledConn<'_>, LedgerError> {
        self.pool.checkout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_database_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.sqlite");

        let store = Store::open(&path, PoolOptions::default()).unwrap();
        let _conn = store.conn().unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_clones_share_one_pool() {
        let dir = TempDir::new().unwrap();
        let options = PoolOptions {
            size: 1,
            checkout_timeout: Duration::from_millis(50),
            ..PoolOptions::default()
        };

        let store = Store::open(dir.path().join("store.sqlite"), options).unwrap();
        let clone = store.clone();

        let _held = store.conn().unwrap();
        assert!(matches!(clone.conn(), Err(LedgerError::Busy)));
    }
}
