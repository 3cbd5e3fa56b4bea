//! Runtime configuration
//!
//! Settings load from an optional TOML file; every field has a default, so
//! a missing file, a partial file, or no file at all still yields a working
//! configuration. Administrator credentials live here rather than in the
//! store, keeping the bootstrap login out of the Identities relation.

use crate::store::PoolOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration for the bank ledger
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Database file, created on first open if absent
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Number of pooled store connections
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// How long a connection retries a locked database before giving up
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// How long a caller waits for a pooled connection before `Busy`
    #[serde(default = "default_checkout_timeout_ms")]
    pub checkout_timeout_ms: u64,
    /// Administrator login honored without a stored identity
    #[serde(default)]
    pub admin: AdminCredentials,
}

/// Name and password accepted for the administrator dashboard
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminCredentials {
    #[serde(default = "default_admin_name")]
    pub name: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("BankDB.sqlite")
}

fn default_pool_size() -> usize {
    4
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_checkout_timeout_ms() -> u64 {
    5000
}

fn default_admin_name() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: default_db_path(),
            pool_size: default_pool_size(),
            busy_timeout_ms: default_busy_timeout_ms(),
            checkout_timeout_ms: default_checkout_timeout_ms(),
            admin: AdminCredentials::default(),
        }
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        AdminCredentials {
            name: default_admin_name(),
            password: default_admin_password(),
        }
    }
}

impl AdminCredentials {
    /// Check a login attempt against the configured credentials
    pub fn matches(&self, name: &str, password: &str) -> bool {
        self.name == name && self.password == password
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults
    ///
    /// With no path, or when the file is missing, unreadable, or fails to
    /// parse, the defaults apply; a fallback is logged but never fatal.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "configuration loaded");
                    config
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "unparseable configuration, using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unreadable configuration, using defaults");
                Self::default()
            }
        }
    }

    /// Pool settings derived from the configured sizes and timeouts
    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            size: self.pool_size,
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
            checkout_timeout: Duration::from_millis(self.checkout_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_apply_without_a_path() {
        let config = Config::load_or_default(None);

        assert_eq!(config.db_path, PathBuf::from("BankDB.sqlite"));
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.busy_timeout_ms, 5000);
        assert_eq!(config.checkout_timeout_ms, 5000);
        assert_eq!(config.admin.name, "admin");
        assert_eq!(config.admin.password, "admin123");
    }

    #[test]
    fn test_full_file_overrides_every_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bank.toml");
        std::fs::write(
            &path,
            r#"
db_path = "other.sqlite"
pool_size = 2
busy_timeout_ms = 100
checkout_timeout_ms = 250

[admin]
name = "root"
password = "hunter2"
"#,
        )
        .unwrap();

        let config = Config::load_or_default(Some(&path));

        assert_eq!(config.db_path, PathBuf::from("other.sqlite"));
        assert_eq!(config.pool_size, 2);
        assert_eq!(config.busy_timeout_ms, 100);
        assert_eq!(config.checkout_timeout_ms, 250);
        assert!(config.admin.matches("root", "hunter2"));
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bank.toml");
        std::fs::write(&path, "pool_size = 8\n").unwrap();

        let config = Config::load_or_default(Some(&path));

        assert_eq!(config.pool_size, 8);
        assert_eq!(config.db_path, PathBuf::from("BankDB.sqlite"));
        assert_eq!(config.admin.name, "admin");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default(Some(Path::new("/nonexistent/bank.toml")));

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bank.toml");
        std::fs::write(&path, "pool_size = \"not a number\"\n").unwrap();

        let config = Config::load_or_default(Some(&path));

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_pool_options_reflect_configured_timeouts() {
        let config = Config {
            pool_size: 3,
            busy_timeout_ms: 750,
            checkout_timeout_ms: 1500,
            ..Config::default()
        };

        let options = config.pool_options();

        assert_eq!(options.size, 3);
        assert_eq!(options.busy_timeout, Duration::from_millis(750));
        assert_eq!(options.checkout_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_admin_matches_requires_both_fields() {
        let admin = AdminCredentials::default();

        assert!(admin.matches("admin", "admin123"));
        assert!(!admin.matches("admin", "wrong"));
        assert!(!admin.matches("wrong", "admin123"));
    }
}
