//! Token ledger interface toward the hosting balance ledger.
//!
//! The engine never keeps account balances of its own; portal purchases and
//! stake movements are debits/credits against whatever ledger hosts it. The
//! [`MemoryTokenLedger`] is suitable for testing; a production host adapts
//! its own balance store to [`TokenLedger`].

use std::collections::HashMap;

use crate::error::BankError;
use crate::types::AccountId;

/// Mutable balance ledger interface.
///
/// Not thread-safe — callers should wrap in a `Mutex` or `RwLock` if
/// concurrent access is needed.
pub trait TokenLedger: Send + Sync {
    /// Current balance of `account` in motes.
    fn balance(&self, account: &AccountId) -> u64;

    /// Add `amount` motes to `account`. Saturates at `u64::MAX`.
    fn credit(&mut self, account: &AccountId, amount: u64);

    /// Remove `amount` motes from `account`.
    ///
    /// # Errors
    ///
    /// [`BankError::InsufficientFunds`] if the balance cannot cover `amount`.
    fn debit(&mut self, account: &AccountId, amount: u64) -> Result<(), BankError>;
}

/// In-memory balance ledger for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenLedger {
    balances: HashMap<AccountId, u64>,
}

impl MemoryTokenLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger pre-funded with the given balances.
    pub fn with_balances(balances: impl IntoIterator<Item = (AccountId, u64)>) -> Self {
        Self {
            balances: balances.into_iter().collect(),
        }
    }
}

impl TokenLedger for MemoryTokenLedger {
    fn balance(&self, account: &AccountId) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn credit(&mut self, account: &AccountId, amount: u64) {
        let entry = self.balances.entry(*account).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    fn debit(&mut self, account: &AccountId, amount: u64) -> Result<(), BankError> {
        let have = self.balance(account);
        if have < amount {
            return Err(BankError::InsufficientFunds { have, need: amount });
        }
        self.balances.insert(*account, have - amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(seed: u8) -> AccountId {
        AccountId([seed; 20])
    }

    #[test]
    fn unknown_account_has_zero_balance() {
        let ledger = MemoryTokenLedger::new();
        assert_eq!(ledger.balance(&acct(1)), 0);
    }

    #[test]
    fn credit_then_debit() {
        let mut ledger = MemoryTokenLedger::new();
        ledger.credit(&acct(1), 100);
        assert_eq!(ledger.balance(&acct(1)), 100);
        ledger.debit(&acct(1), 40).unwrap();
        assert_eq!(ledger.balance(&acct(1)), 60);
    }

    #[test]
    fn overdraft_is_rejected_without_mutation() {
        let mut ledger = MemoryTokenLedger::with_balances([(acct(1), 30)]);
        let err = ledger.debit(&acct(1), 31).unwrap_err();
        assert_eq!(err, BankError::InsufficientFunds { have: 30, need: 31 });
        assert_eq!(ledger.balance(&acct(1)), 30);
    }

    #[test]
    fn credit_saturates() {
        let mut ledger = MemoryTokenLedger::with_balances([(acct(1), u64::MAX - 1)]);
        ledger.credit(&acct(1), 10);
        assert_eq!(ledger.balance(&acct(1)), u64::MAX);
    }
}
