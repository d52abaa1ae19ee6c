//! In-memory balance ledger.
//!
//! The gate treats the ledger as an external collaborator and consumes only
//! the two mutating primitives of the `Ledger` trait. This implementation
//! keeps per-account balances in a map and tracks total supply alongside,
//! with checked arithmetic so neither an account balance nor the supply can
//! wrap.

use std::collections::HashMap;

use sentinel_core::{AccountId, Ledger, LedgerError, LedgerResult};
use tracing::debug;

/// HashMap-backed ledger. Useful on its own for testing, and as the backing
/// ledger of a single-process deployment where balances don't outlive the
/// process.
#[derive(Default)]
pub struct InMemoryLedger {
    balances: HashMap<AccountId, u64>,
    total_supply: u64,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts that have ever been credited.
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }

    /// All (account, balance) pairs, for inspection.
    pub fn balances(&self) -> impl Iterator<Item = (&AccountId, &u64)> {
        self.balances.iter()
    }
}

impl Ledger for InMemoryLedger {
    fn credit(&mut self, account: AccountId, amount: u64) -> LedgerResult<()> {
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)?;
        let balance = self.balances.entry(account).or_insert(0);
        // Balance cannot overflow if supply did not: balance <= supply.
        *balance += amount;
        self.total_supply = new_supply;
        debug!(account = %account, amount, balance = *balance, "ledger credit");
        Ok(())
    }

    fn debit(&mut self, account: AccountId, amount: u64) -> LedgerResult<()> {
        let balance = self.balances.get_mut(&account).filter(|b| **b >= amount);
        match balance {
            Some(balance) => {
                *balance -= amount;
                self.total_supply -= amount;
                debug!(account = %account, amount, balance = *balance, "ledger debit");
                Ok(())
            }
            None => Err(LedgerError::InsufficientBalance),
        }
    }

    fn balance_of(&self, account: AccountId) -> u64 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    fn total_supply(&self) -> u64 {
        self.total_supply
    }
}
