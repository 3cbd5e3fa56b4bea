//! Ledger engine
//!
//! This module provides the `LedgerEngine`, the one component allowed to
//! move money. Every mutating operation runs inside a single store
//! transaction scoped to that operation:
//!
//! - Deposit and withdraw adjust one balance and append one log row
//! - Transfer validates both endpoints in a fixed order, moves the funds,
//!   and appends one log row linking sender to receiver
//!
//! An early return at any validation step drops the open transaction, which
//! rolls back every write in it; balances change all together or not at all.
//! Conflicting operations on the same account serialize on the store's
//! write lock, so two transfers sharing an endpoint can never both apply
//! against the same pre-transfer balance.

use crate::core::timestamp_now;
use crate::store::Store;
use crate::types::{AccountId, LedgerError, LedgerOp, Party};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Balance movement over the shared store
pub struct LedgerEngine {
    store: Store,
}

impl LedgerEngine {
    /// Create a LedgerEngine over the given store handle
    pub fn new(store: Store) -> Self {
        LedgerEngine { store }
    }

    /// Credit `amount` to the account with the given IBAN
    ///
    /// # Arguments
    ///
    /// * `iban` - Account to credit
    /// * `amount` - Amount to add, strictly positive
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is zero or negative (checked before the store is
    ///   touched)
    /// - No account carries the IBAN
    /// - The credited balance would overflow
    pub fn deposit(&self, iban: &str, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }

        let mut conn = self.store.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let (account_id, balance) = read_balance(&tx, iban)?
            .ok_or_else(|| LedgerError::account_not_found(iban, None))?;
        let updated = balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", iban))?;

        write_balance(&tx, iban, updated)?;
        append_log(&tx, account_id, LedgerOp::Deposit, amount, None)?;
        tx.commit()?;

        tracing::debug!(iban, amount = %amount, "deposit committed");
        Ok(())
    }

    /// Debit `amount` from the account with the given IBAN
    ///
    /// Only existence and a positive amount are validated: withdrawals
    /// carry no funds or freeze check, so the balance may go negative
    /// here. Transfer is the only operation that checks either.
    ///
    /// # Arguments
    ///
    /// * `iban` - Account to debit
    /// * `amount` - Amount to subtract, strictly positive
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is zero or negative
    /// - No account carries the IBAN
    /// - The debited balance would overflow
    pub fn withdraw(&self, iban: &str, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }

        let mut conn = self.store.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let (account_id, balance) = read_balance(&tx, iban)?
            .ok_or_else(|| LedgerError::account_not_found(iban, None))?;
        let updated = balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("withdraw", iban))?;

        write_balance(&tx, iban, updated)?;
        append_log(&tx, account_id, LedgerOp::Withdraw, amount, None)?;
        tx.commit()?;

        tracing::debug!(iban, amount = %amount, "withdraw committed");
        Ok(())
    }

    /// Move `amount` from one account to another atomically
    ///
    /// The whole read-check-write sequence is one store transaction. Checks
    /// run in a fixed, observable order: sender existence, sender freeze,
    /// receiver existence, receiver freeze, then the sender balance. When
    /// several conditions hold at once, the earliest check in that order is
    /// the reported reason.
    ///
    /// A self-transfer resolves through the same steps and nets to zero on
    /// success; it still requires sufficient funds.
    ///
    /// # Arguments
    ///
    /// * `from_iban` - Sender account
    /// * `to_iban` - Receiver account
    /// * `amount` - Amount to move, strictly positive
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is zero or negative
    /// - Either endpoint is missing or frozen
    /// - The sender balance is below the requested amount
    /// - Either updated balance would overflow
    ///
    /// On any failure the transaction rolls back and both balances are
    /// unchanged.
    pub fn transfer(
        &self,
        from_iban: &str,
        to_iban: &str,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }

        let mut conn = self.store.conn()?;
        let result = transfer_in_tx(&mut conn, from_iban, to_iban, amount);
        match &result {
            Ok(()) => {
                tracing::debug!(from_iban, to_iban, amount = %amount, "transfer committed");
            }
            Err(err) => {
                tracing::warn!(from_iban, to_iban, amount = %amount, error = %err, "transfer rejected");
            }
        }
        result
    }
}

fn transfer_in_tx(
    conn: &mut Connection,
    from_iban: &str,
    to_iban: &str,
    amount: Decimal,
) -> Result<(), LedgerError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    // Check order is observable through the reported reason: sender
    // existence, sender freeze, receiver existence, receiver freeze, funds.
    let sender = read_endpoint(&tx, from_iban)?
        .ok_or_else(|| LedgerError::account_not_found(from_iban, Some(Party::Sender)))?;
    if sender.frozen {
        return Err(LedgerError::frozen_account(from_iban, Party::Sender));
    }
    let receiver = read_endpoint(&tx, to_iban)?
        .ok_or_else(|| LedgerError::account_not_found(to_iban, Some(Party::Receiver)))?;
    if receiver.frozen {
        return Err(LedgerError::frozen_account(to_iban, Party::Receiver));
    }

    let (_, sender_balance) = read_balance(&tx, from_iban)?
        .ok_or_else(|| LedgerError::account_not_found(from_iban, Some(Party::Sender)))?;
    if sender_balance < amount {
        return Err(LedgerError::insufficient_funds(
            from_iban,
            sender_balance,
            amount,
        ));
    }
    let debited = sender_balance
        .checked_sub(amount)
        .ok_or_else(|| LedgerError::arithmetic_overflow("transfer debit", from_iban))?;
    write_balance(&tx, from_iban, debited)?;

    // The credit leg re-reads inside the same transaction, so when both
    // IBANs name one account it sees the debited balance and nets back to
    // the original value.
    let (_, receiver_balance) = read_balance(&tx, to_iban)?
        .ok_or_else(|| LedgerError::account_not_found(to_iban, Some(Party::Receiver)))?;
    let credited = receiver_balance
        .checked_add(amount)
        .ok_or_else(|| LedgerError::arithmetic_overflow("transfer credit", to_iban))?;
    write_balance(&tx, to_iban, credited)?;

    append_log(&tx, sender.id, LedgerOp::Transfer, amount, Some(receiver.id))?;
    tx.commit()?;
    Ok(())
}

struct Endpoint {
    id: AccountId,
    frozen: bool,
}

fn read_endpoint(tx: &Transaction, iban: &str) -> Result<Option<Endpoint>, LedgerError> {
    let endpoint = tx
        .query_row(
            "SELECT id, frozen FROM Accounts WHERE iban = ?1",
            params![iban],
            |row| {
                Ok(Endpoint {
                    id: row.get(0)?,
                    frozen: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(endpoint)
}

fn read_balance(tx: &Transaction, iban: &str) -> Result<Option<(AccountId, Decimal)>, LedgerError> {
    let row = tx
        .query_row(
            "SELECT id, balance FROM Accounts WHERE iban = ?1",
            params![iban],
            |row| Ok((row.get::<_, AccountId>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()?;
    match row {
        Some((id, text)) => Ok(Some((id, parse_balance(iban, &text)?))),
        None => Ok(None),
    }
}

// Balances are stored as canonical decimal strings; a row that fails to
// parse is corrupt storage, not a ledger condition.
fn parse_balance(iban: &str, text: &str) -> Result<Decimal, LedgerError> {
    Decimal::from_str(text).map_err(|_| LedgerError::StoreUnavailable {
        message: format!("unreadable balance for {iban}: '{text}'"),
    })
}

fn write_balance(tx: &Transaction, iban: &str, balance: Decimal) -> Result<(), LedgerError> {
    tx.execute(
        "UPDATE Accounts SET balance = ?1 WHERE iban = ?2",
        params![balance.to_string(), iban],
    )?;
    Ok(())
}

fn append_log(
    tx: &Transaction,
    account_id: AccountId,
    op: LedgerOp,
    amount: Decimal,
    target_account_id: Option<AccountId>,
) -> Result<(), LedgerError> {
    tx.execute(
        "INSERT INTO TransactionLog (account_id, type, amount, target_account_id, date) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            account_id,
            op.as_str(),
            amount.to_string(),
            target_account_id,
            timestamp_now()
        ],
    )?;
    Ok(())
}
