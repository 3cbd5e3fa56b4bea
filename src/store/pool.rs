//! Bounded connection pool
//!
//! The store is a single shared resource. Instead of one long-lived handle
//! behind a global mutex, a fixed set of connections is opened up front and
//! checked out per operation: acquire at operation start, return on every
//! exit path through the guard's `Drop`. Checkout waits are bounded so a
//! stalled operation surfaces as `Busy` instead of hanging its caller.

use crate::types::LedgerError;
use parking_lot::{Condvar, Mutex};
use rusqlite::Connection;
use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::time::{Duration, Instant};

/// Pool sizing and wait bounds
#[derive(Debug, Clone)]
pub struct PoolOptions {
    /// Number of connections opened up front (minimum 1)
    pub size: usize,

    /// How long a connection waits on the store's internal write lock
    /// before an operation fails as busy
    pub busy_timeout: Duration,

    /// How long a checkout waits for an idle connection before failing
    /// as busy
    pub checkout_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        PoolOptions {
            size: 4,
            busy_timeout: Duration::from_millis(5000),
            checkout_timeout: Duration::from_millis(5000),
        }
    }
}

/// Fixed-size pool of pre-opened store connections
pub(crate) struct Pool {
    idle: Mutex<Vec<Connection>>,
    available: Condvar,
    checkout_timeout: Duration,
}

impl Pool {
    /// Open `options.size` connections against the database at `path`
    ///
    /// Every connection is configured the same way: write-ahead logging for
    /// concurrent readers, and a busy timeout bounding lock waits inside the
    /// storage engine.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the database cannot be opened or
    /// configured.
    pub(crate) fn open(path: &Path, options: &PoolOptions) -> Result<Self, LedgerError> {
        let size = options.size.max(1);
        let mut idle = Vec::with_capacity(size);
        for _ in 0..size {
            idle.push(open_connection(path, options.busy_timeout)?);
        }

        tracing::debug!(path = %path.display(), connections = size, "opened connection pool");

        Ok(Pool {
            idle: Mutex::new(idle),
            available: Condvar::new(),
            checkout_timeout: options.checkout_timeout,
        })
    }

    /// Check a connection out of the pool
    ///
    /// Blocks until a connection is idle, up to the configured checkout
    /// timeout. The returned guard hands the connection back when dropped.
    ///
    /// # Errors
    ///
    /// Returns `Busy` if no connection becomes idle within the bound.
    pub(crate) fn checkout(&self) -> Result<PooledConn<'_>, LedgerError> {
        let deadline = Instant::now() + self.checkout_timeout;
        let mut idle = self.idle.lock();
        loop {
            if let Some(conn) = idle.pop() {
                return Ok(PooledConn {
                    conn: Some(conn),
                    pool: self,
                });
            }
            if self.available.wait_until(&mut idle, deadline).timed_out() {
                return Err(LedgerError::Busy);
            }
        }
    }

    fn put_back(&self, conn: Connection) {
        self.idle.lock().push(conn);
        self.available.notify_one();
    }
}

fn open_connection(path: &Path, busy_timeout: Duration) -> Result<Connection, LedgerError> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(busy_timeout)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

/// RAII guard around a checked-out connection
///
/// Dereferences to [`rusqlite::Connection`]; dropping the guard returns the
/// connection to the pool and wakes one blocked checkout.
pub struct PooledConn<'a> {
    // Some until drop, where the connection is taken and returned
    conn: Option<Connection>,
    pool: &'a Pool,
}

impl Deref for PooledConn<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        self.conn.as_ref().expect("connection present until drop")
    }
}

impl DerefMut for PooledConn<'_> {
    fn deref_mut(&mut self) -> &mut Connection {
        self.conn.as_mut().expect("connection present until drop")
    }
}

impl Drop for PooledConn<'_> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.pool.put_back(conn);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn test_pool(size: usize, checkout_ms: u64) -> (TempDir, Pool) {
        let dir = TempDir::new().unwrap();
        let options = PoolOptions {
            size,
            checkout_timeout: Duration::from_millis(checkout_ms),
            ..PoolOptions::default()
        };
        let pool = Pool::open(&dir.path().join("pool.sqlite"), &options).unwrap();
        (dir, pool)
    }

    #[test]
    fn test_checkout_returns_working_connection() {
        let (_dir, pool) = test_pool(2, 200);

        let conn = pool.checkout().unwrap();
        let one: i64 = conn.query_row("SELECT 1", [], |row| row.get(0)).unwrap();
        assert_eq!(one, 1);
    }

    #[test]
    fn test_checkout_times_out_when_pool_exhausted() {
        let (_dir, pool) = test_pool(1, 50);

        let _held = pool.checkout().unwrap();
        let result = pool.checkout();
        assert!(matches!(result, Err(LedgerError::Busy)));
    }

    #[test]
    fn test_dropping_guard_returns_connection() {
        let (_dir, pool) = test_pool(1, 50);

        {
            let _held = pool.checkout().unwrap();
        }

        assert!(pool.checkout().is_ok());
    }

    #[test]
    fn test_blocked_checkout_wakes_when_connection_returns() {
        let (_dir, pool) = test_pool(1, 1000);
        let pool = Arc::new(pool);

        let held = pool.checkout().unwrap();
        let waiter = {
            let pool = Arc::clone(&pool);
            thread::spawn(move || pool.checkout().map(|_conn| ()))
        };

        // Give the waiter time to block, then free the connection
        thread::sleep(Duration::from_millis(50));
        drop(held);

        assert!(waiter.join().unwrap().is_ok());
    }

    #[test]
    fn test_zero_size_is_clamped_to_one_connection() {
        let dir = TempDir::new().unwrap();
        let options = PoolOptions {
            size: 0,
            ..PoolOptions::default()
        };

        let pool = Pool::open(&dir.path().join("pool.sqlite"), &options).unwrap();
        assert!(pool.checkout().is_ok());
    }
}
