use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Interactive bank ledger over a pooled SQLite store
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Interactive bank ledger over a pooled SQLite store", long_about = None)]
pub struct CliArgs {
    /// Optional TOML configuration file
    #[arg(
        long = "config",
        value_name = "FILE",
        help = "Path to a TOML configuration file (defaults apply without one)"
    )]
    pub config: Option<PathBuf>,

    /// Database file override
    #[arg(
        long = "db",
        value_name = "FILE",
        help = "Database file to open, overriding the configured path"
    )]
    pub db_path: Option<PathBuf>,
}

impl CliArgs {
    /// Resolve the effective configuration for this invocation
    ///
    /// Loads the configuration file when one was given, then applies the
    /// `--db` override on top. Flags always win over file contents.
    ///
    /// # Returns
    ///
    /// The effective `Config` for this run.
    pub fn resolve_config(&self) -> Config {
        let mut config = Config::load_or_default(self.config.as_deref());
        if let Some(db_path) = &self.db_path {
            config.db_path = db_path.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Flag parsing tests
    #[rstest]
    #[case::no_flags(&["program"], None, None)]
    #[case::config_only(&["program", "--config", "bank.toml"], Some("bank.toml"), None)]
    #[case::db_only(&["program", "--db", "other.sqlite"], None, Some("other.sqlite"))]
    #[case::both_flags(
        &["program", "--config", "bank.toml", "--db", "other.sqlite"],
        Some("bank.toml"),
        Some("other.sqlite")
    )]
    fn test_flag_parsing(
        #[case] args: &[&str],
        #[case] config: Option<&str>,
        #[case] db_path: Option<&str>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.config, config.map(PathBuf::from));
        assert_eq!(parsed.db_path, db_path.map(PathBuf::from));
    }

    #[test]
    fn test_resolve_config_without_flags_uses_defaults() {
        let parsed = CliArgs::try_parse_from(["program"]).unwrap();

        let config = parsed.resolve_config();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_db_override_wins_over_configured_path() {
        let parsed = CliArgs::try_parse_from(["program", "--db", "override.sqlite"]).unwrap();

        let config = parsed.resolve_config();

        assert_eq!(config.db_path, PathBuf::from("override.sqlite"));
        assert_eq!(config.pool_size, Config::default().pool_size);
    }

    // Error handling tests
    #[rstest]
    #[case::config_without_value(&["program", "--config"])]
    #[case::unknown_flag(&["program", "--unknown"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
