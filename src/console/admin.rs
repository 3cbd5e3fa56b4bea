//! Administrator dashboard
//!
//! Reachable only through the configured administrator credentials. The
//! dashboard spans every account in the store regardless of owner.

use super::{format_accounts, freeze_flow, prompt};
use crate::core::Bank;
use std::io;

pub(super) fn dashboard(bank: &Bank) -> io::Result<()> {
    println!("Administrator dashboard.");
    loop {
        println!();
        println!("1. View all accounts");
        println!("2. Delete an account");
        println!("3. Freeze or unfreeze an account");
        println!("4. Log out");
        let choice = prompt("Select an option: ")?;
        match choice.as_str() {
            "1" => view_all(bank),
            "2" => delete_flow(bank)?,
            "3" => toggle_freeze(bank)?,
            "4" => return Ok(()),
            _ => println!("Unknown option."),
        }
    }
}

fn view_all(bank: &Bank) {
    match bank.get_all_accounts() {
        Ok(accounts) => println!("{}", format_accounts(&accounts)),
        Err(err) => println!("{err}"),
    }
}

fn delete_flow(bank: &Bank) -> io::Result<()> {
    let iban = prompt("IBAN to delete: ")?;
    // Deleting an absent IBAN succeeds quietly, same as the store call
    match bank.delete_account(&iban) {
        Ok(()) => println!("Account {iban} deleted."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn toggle_freeze(bank: &Bank) -> io::Result<()> {
    let iban = prompt("IBAN to freeze or unfreeze: ")?;
    match bank.get_account(&iban) {
        Ok(Some(account)) => freeze_flow(bank, &account)?,
        Ok(None) => println!("Account {iban} does not exist."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}
