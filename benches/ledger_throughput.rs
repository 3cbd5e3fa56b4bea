//! Benchmark suite for ledger operation throughput
//!
//! This benchmark measures deposits and transfers against a fresh on-disk
//! database using the divan benchmarking framework. Each run opens its own
//! bank, seeds two accounts, and applies a fixed batch of operations, so
//! the figures include per-operation transaction and audit-row costs.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```

use bank_ledger::core::Bank;
use bank_ledger::store::PoolOptions;
use rust_decimal::Decimal;
use tempfile::TempDir;

fn main() {
    divan::main();
}

/// Open a bank in a fresh temporary directory and seed two accounts
fn seeded_bank() -> (TempDir, Bank) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let bank = Bank::open(dir.path().join("BankDB.sqlite"), PoolOptions::default())
        .expect("Failed to open bank");
    let owner = bank
        .create_identity("Bench", "pw", "")
        .expect("Failed to create identity");
    bank.create_account(owner.id, "BENCH1", Decimal::from(1_000_000), "Current")
        .expect("Failed to create BENCH1");
    bank.create_account(owner.id, "BENCH2", Decimal::ZERO, "Current")
        .expect("Failed to create BENCH2");
    (dir, bank)
}

/// Benchmark 100 deposits into one account
#[divan::bench]
fn deposits_100() {
    let (_dir, bank) = seeded_bank();

    for _ in 0..100 {
        bank.deposit("BENCH1", Decimal::ONE).expect("Deposit failed");
    }
}

/// Benchmark 100 transfers between two accounts
#[divan::bench]
fn transfers_100() {
    let (_dir, bank) = seeded_bank();

    for _ in 0..100 {
        bank.transfer("BENCH1", "BENCH2", Decimal::ONE)
            .expect("Transfer failed");
    }
}

/// Benchmark 100 single-account reads by IBAN
#[divan::bench]
fn lookups_100() {
    let (_dir, bank) = seeded_bank();

    for _ in 0..100 {
        bank.get_account("BENCH1").expect("Lookup failed");
    }
}
