//! Customer menu
//!
//! Every flow here acts on behalf of the logged-in identity. Viewing is
//! scoped to owned accounts, and delete and freeze check ownership before
//! acting; ledger operations accept any IBAN, since transfers by nature
//! reach accounts the customer does not own.

use super::{format_accounts, freeze_flow, prompt, prompt_amount};
use crate::core::Bank;
use crate::types::{Account, Identity, LedgerError};
use std::io;

pub(super) fn menu(bank: &Bank, identity: &Identity) -> io::Result<()> {
    println!("Welcome, {}.", identity.name);
    loop {
        println!();
        println!("1. View my accounts");
        println!("2. Open a new account");
        println!("3. Deposit");
        println!("4. Withdraw");
        println!("5. Transfer");
        println!("6. Delete an account");
        println!("7. Freeze or unfreeze an account");
        println!("8. Log out");
        let choice = prompt("Select an option: ")?;
        match choice.as_str() {
            "1" => view_own(bank, identity),
            "2" => open_account(bank, identity)?,
            "3" => deposit_flow(bank)?,
            "4" => withdraw_flow(bank)?,
            "5" => transfer_flow(bank)?,
            "6" => delete_own(bank, identity)?,
            "7" => freeze_own(bank, identity)?,
            "8" => return Ok(()),
            _ => println!("Unknown option."),
        }
    }
}

fn view_own(bank: &Bank, identity: &Identity) {
    match bank.get_accounts_by_owner(identity.id) {
        Ok(accounts) => println!("{}", format_accounts(&accounts)),
        Err(err) => println!("{err}"),
    }
}

fn open_account(bank: &Bank, identity: &Identity) -> io::Result<()> {
    let iban = prompt("IBAN: ")?;
    let account_type = prompt("Account type (e.g. Savings, Current): ")?;
    let Some(balance) = prompt_amount("Initial balance: ")? else {
        return Ok(());
    };
    match bank.create_account(identity.id, &iban, balance, &account_type) {
        Ok(account) => println!("Account {} opened.", account.iban),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn deposit_flow(bank: &Bank) -> io::Result<()> {
    let iban = prompt("IBAN: ")?;
    let Some(amount) = prompt_amount("Amount: ")? else {
        return Ok(());
    };
    match bank.deposit(&iban, amount) {
        Ok(()) => println!("Deposited {amount} into {iban}."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn withdraw_flow(bank: &Bank) -> io::Result<()> {
    let iban = prompt("IBAN: ")?;
    let Some(amount) = prompt_amount("Amount: ")? else {
        return Ok(());
    };
    match bank.withdraw(&iban, amount) {
        Ok(()) => println!("Withdrew {amount} from {iban}."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn transfer_flow(bank: &Bank) -> io::Result<()> {
    let from_iban = prompt("From IBAN: ")?;
    let to_iban = prompt("To IBAN: ")?;
    let Some(amount) = prompt_amount("Amount: ")? else {
        return Ok(());
    };
    match bank.transfer(&from_iban, &to_iban, amount) {
        Ok(()) => println!("Transferred {amount} from {from_iban} to {to_iban}."),
        Err(LedgerError::Busy) => println!("The ledger is busy; please try again."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn delete_own(bank: &Bank, identity: &Identity) -> io::Result<()> {
    let iban = prompt("IBAN to delete: ")?;
    if let Some(account) = owned_account(bank, identity, &iban) {
        match bank.delete_account(&account.iban) {
            Ok(()) => println!("Account {} deleted.", account.iban),
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

fn freeze_own(bank: &Bank, identity: &Identity) -> io::Result<()> {
    let iban = prompt("IBAN to freeze or unfreeze: ")?;
    if let Some(account) = owned_account(bank, identity, &iban) {
        freeze_flow(bank, &account)?;
    }
    Ok(())
}

/// Look up an account and require that the identity owns it
///
/// Prints the reason and returns `None` when the account is missing, owned
/// by someone else, or the lookup fails.
fn owned_account(bank: &Bank, identity: &Identity, iban: &str) -> Option<Account> {
    match bank.get_account(iban) {
        Ok(Some(account)) if account.owner_id == identity.id => Some(account),
        Ok(Some(_)) => {
            println!("You can only manage your own accounts.");
            None
        }
        Ok(None) => {
            println!("Account {iban} does not exist.");
            None
        }
        Err(err) => {
            println!("{err}");
            None
        }
    }
}
