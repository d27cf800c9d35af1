//! Per-account ledger records with implicit existence.
//!
//! Accounts are created by first reference and never explicitly destroyed.
//! Reading an absent key observes the all-zero account, and an account whose
//! balance, nonce, and allowances are all zero is behaviorally identical to
//! one that never existed — so there is no "exists" bit to maintain and no
//! destruction path to get wrong.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// The ledger record for a single address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Ledger units held, redeemable 1:1 for custodied native coin.
    pub balance: U256,
    /// Monotonic permit counter. Incremented only by a successful permit.
    pub nonce: U256,
    /// Approved delegated spends: spender address to remaining amount.
    pub allowances: HashMap<Address, U256>,
}

/// The owning map from address to account record.
///
/// All reads return defaults for absent keys; all writes materialize the
/// record on demand. This is the only mutable state the contract owns —
/// total supply is deliberately *not* here (see the bridge module).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountBook {
    accounts: HashMap<Address, Account>,
}

impl AccountBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// The balance of `addr`, zero if never referenced.
    pub fn balance(&self, addr: Address) -> U256 {
        self.accounts
            .get(&addr)
            .map(|a| a.balance)
            .unwrap_or_default()
    }

    /// The permit nonce of `addr`, zero if never referenced.
    pub fn nonce(&self, addr: Address) -> U256 {
        self.accounts
            .get(&addr)
            .map(|a| a.nonce)
            .unwrap_or_default()
    }

    /// The remaining amount `spender` may move out of `owner`'s balance.
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.accounts
            .get(&owner)
            .and_then(|a| a.allowances.get(&spender))
            .copied()
            .unwrap_or_default()
    }

    /// Mutable access to the record for `addr`, materializing it if absent.
    pub fn account_mut(&mut self, addr: Address) -> &mut Account {
        self.accounts.entry(addr).or_default()
    }

    /// Sum of all booked balances.
    ///
    /// This is an audit probe, not an operation input: the contract never
    /// stores or depends on this figure, it exists so tests can compare the
    /// book against custody.
    pub fn circulating(&self) -> U256 {
        self.accounts
            .values()
            .fold(U256::ZERO, |acc, a| acc.saturating_add(a.balance))
    }
}
