//! Interactive console
//!
//! A line-oriented menu over the [`Bank`] facade: a main menu for login and
//! registration, an administrator dashboard, and a customer menu. All input
//! arrives over stdin; end of input ends the session cleanly.
//!
//! Ledger rejections are ordinary outcomes here, printed and followed by a
//! fresh prompt. Only I/O failures end the session with an error.

mod admin;
mod customer;

use crate::config::AdminCredentials;
use crate::core::Bank;
use crate::types::Account;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Run the interactive session until the user exits or stdin closes
///
/// # Errors
///
/// Returns an error when reading stdin or writing stdout fails. A closed
/// stdin is treated as a normal exit.
pub fn run(bank: &Bank, admin: &AdminCredentials) -> io::Result<()> {
    match main_menu(bank, admin) {
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(()),
        other => other,
    }
}

fn main_menu(bank: &Bank, admin: &AdminCredentials) -> io::Result<()> {
    println!("Welcome to the bank ledger.");
    loop {
        println!();
        println!("1. Login");
        println!("2. Create Account");
        println!("3. Exit");
        let choice = prompt("Select an option: ")?;
        match choice.as_str() {
            "1" => login_flow(bank, admin)?,
            "2" => register_flow(bank)?,
            "3" => {
                println!("Goodbye.");
                return Ok(());
            }
            _ => println!("Unknown option."),
        }
    }
}

fn login_flow(bank: &Bank, admin: &AdminCredentials) -> io::Result<()> {
    let name = prompt("Name: ")?;
    let password = prompt("Password: ")?;

    if admin.matches(&name, &password) {
        return admin::dashboard(bank);
    }

    match bank.validate_login(&name, &password) {
        Ok(Some(identity)) if identity.is_customer() => customer::menu(bank, &identity),
        Ok(Some(_)) => {
            println!("Invalid role.");
            Ok(())
        }
        Ok(None) => {
            println!("Invalid credentials. Please try again.");
            Ok(())
        }
        Err(err) => {
            println!("{err}");
            Ok(())
        }
    }
}

fn register_flow(bank: &Bank) -> io::Result<()> {
    let name = prompt("Name: ")?;
    let password = prompt("Password: ")?;
    let role = prompt("Role (blank for Customer): ")?;

    match bank.create_identity(&name, &password, &role) {
        Ok(identity) => println!("Welcome, {}. You can log in now.", identity.name),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

/// Read one trimmed line, prompting first
///
/// A read of zero bytes means stdin closed; that surfaces as
/// `UnexpectedEof` so callers can unwind to a clean exit.
fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(line.trim().to_string())
}

/// Prompt for a decimal amount; `None` when the input does not parse
fn prompt_amount(label: &str) -> io::Result<Option<Decimal>> {
    let text = prompt(label)?;
    let amount = parse_amount(&text);
    if amount.is_none() {
        println!("'{text}' is not a valid amount.");
    }
    Ok(amount)
}

fn parse_amount(text: &str) -> Option<Decimal> {
    Decimal::from_str(text.trim()).ok()
}

/// Render accounts as an aligned table, one row per account
fn format_accounts(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }
    let mut out = format!(
        "{:<20} {:<8} {:<10} {:>14} {:<8}\n",
        "IBAN", "Owner", "Type", "Balance", "Status"
    );
    for account in accounts {
        let status = if account.frozen { "frozen" } else { "active" };
        out.push_str(&format!(
            "{:<20} {:<8} {:<10} {:>14} {:<8}\n",
            account.iban,
            account.owner_id,
            account.account_type,
            account.balance.to_string(),
            status
        ));
    }
    out.pop();
    out
}

/// Show an account's freeze state and flip it on confirmation
fn freeze_flow(bank: &Bank, account: &Account) -> io::Result<()> {
    let (state, action) = if account.frozen {
        ("frozen", "Unfreeze")
    } else {
        ("active", "Freeze")
    };
    println!("Account {} is currently {state}.", account.iban);
    let confirm = prompt(&format!("{action} this account? (YES/NO): "))?;
    if confirm != "YES" {
        return Ok(());
    }
    match bank.set_frozen(&account.iban, !account.frozen) {
        Ok(()) => println!("Account {} is now {}.", account.iban, if account.frozen { "active" } else { "frozen" }),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn account(iban: &str, balance: i64, frozen: bool) -> Account {
        Account {
            id: 1,
            owner_id: 7,
            iban: iban.to_string(),
            balance: Decimal::from(balance),
            account_type: "Current".to_string(),
            frozen,
            created_at: "2026-01-01 00:00:00".to_string(),
        }
    }

    #[rstest]
    #[case::integer("250", Some(Decimal::from(250)))]
    #[case::fractional("3.50", Some(Decimal::new(350, 2)))]
    #[case::padded("  42 ", Some(Decimal::from(42)))]
    #[case::negative("-5", Some(Decimal::from(-5)))]
    #[case::words("ten", None)]
    #[case::empty("", None)]
    fn test_parse_amount(#[case] text: &str, #[case] expected: Option<Decimal>) {
        assert_eq!(parse_amount(text), expected);
    }

    #[test]
    fn test_format_accounts_renders_one_row_per_account() {
        let accounts = vec![account("IBAN1", 5000, false), account("IBAN2", 1000, true)];

        let rendered = format_accounts(&accounts);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("IBAN"));
        assert!(lines[1].contains("IBAN1"));
        assert!(lines[1].contains("active"));
        assert!(lines[2].contains("IBAN2"));
        assert!(lines[2].contains("frozen"));
    }

    #[test]
    fn test_format_accounts_handles_empty_list() {
        assert_eq!(format_accounts(&[]), "No accounts found.");
    }
}
