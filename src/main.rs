//! Bank Ledger CLI
//!
//! Command-line entry point for the interactive bank ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --db other.sqlite
//! cargo run -- --config bank.toml
//! cargo run -- --config bank.toml --db override.sqlite
//! ```
//!
//! The program opens the configured database (creating it and its schema on
//! first run) and serves the interactive console until the user exits or
//! stdin closes. Log output is controlled through `RUST_LOG`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (database not openable, console I/O failure, etc.)

use bank_ledger::cli;
use bank_ledger::console;
use bank_ledger::core::Bank;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = args.resolve_config();

    let bank = match Bank::open(&config.db_path, config.pool_options()) {
        Ok(bank) => bank,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = console::run(&bank, &config.admin) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
