//! The wrapped-coin contract facade.
//!
//! [`WrappedToken`] owns the account book and the fixed signing domain, and
//! is the single type behind every public operation. The operations
//! themselves live with their protocol: balance moves in [`crate::ledger`],
//! custody in [`crate::bridge`], offline approvals in [`crate::permit`],
//! notifications in [`crate::callback`]. This module holds what they share:
//! construction, metadata, read-only queries, and the atomic entry-point
//! wrapper that makes "it failed" mean "it never happened".

use std::cell::RefCell;

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::Eip712Domain;
use serde::{Deserialize, Serialize};

use crate::accounts::AccountBook;
use crate::env::Host;
use crate::error::TokenError;

/// Token metadata, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Human-readable token name. Also the EIP-712 domain name, so changing
    /// it would invalidate every outstanding permit signature.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display decimals. 18 matches the native coin's smallest unit.
    pub decimals: u8,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "Wrapped Specie".into(),
            symbol: "WSPC".into(),
            decimals: 18,
        }
    }
}

/// The custody-backed wrapped-coin ledger.
///
/// One instance per deployment. The account book sits behind a `RefCell`
/// because receiver hooks may reenter the contract mid-operation; borrows
/// are scoped to individual primitive mutations and never held across a
/// host call or callback, which is exactly the re-entry contract the
/// concurrency model promises.
pub struct WrappedToken {
    config: TokenConfig,
    address: Address,
    chain_id: u64,
    domain: Eip712Domain,
    separator: B256,
    pub(crate) book: RefCell<AccountBook>,
}

impl WrappedToken {
    /// Deploys the token at `address` on chain `chain_id`.
    ///
    /// The EIP-712 domain separator is computed here, once — it binds every
    /// permit signature to this name, version "1", chain, and address, so
    /// a signature for one deployment is noise to every other.
    pub fn new(config: TokenConfig, chain_id: u64, address: Address) -> Self {
        let domain = Eip712Domain::new(
            Some(config.name.clone().into()),
            Some("1".into()),
            Some(U256::from(chain_id)),
            Some(address),
            None,
        );
        let separator = domain.separator();
        Self {
            config,
            address,
            chain_id,
            domain,
            separator,
            book: RefCell::new(AccountBook::new()),
        }
    }

    /// The token name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    /// Display decimals.
    pub fn decimals(&self) -> u8 {
        self.config.decimals
    }

    /// The contract's own address. Transfers here are withdrawals.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The chain this deployment is bound to.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The fixed EIP-712 domain separator.
    pub fn domain_separator(&self) -> B256 {
        self.separator
    }

    pub(crate) fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    /// Total issued supply — defined as the native coin in custody.
    ///
    /// Deliberately a query, not a stored counter: there is no second
    /// bookkeeping location to drift out of sync with custody.
    pub fn total_supply(&self, env: &dyn Host) -> U256 {
        env.native_balance(self.address)
    }

    /// The ledger balance of `addr`.
    pub fn balance_of(&self, addr: Address) -> U256 {
        self.book.borrow().balance(addr)
    }

    /// The remaining amount `spender` may move out of `owner`'s balance.
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.book.borrow().allowance(owner, spender)
    }

    /// The permit nonce of `owner` — the value the next permit must sign.
    pub fn nonce_of(&self, owner: Address) -> U256 {
        self.book.borrow().nonce(owner)
    }

    /// Sum of all booked balances — the audit probe for the backing
    /// invariant. Always equal to [`total_supply`](Self::total_supply);
    /// the contract itself never reads this figure.
    pub fn circulating(&self) -> U256 {
        self.book.borrow().circulating()
    }

    /// Run `op` as one atomic operation.
    ///
    /// Snapshots the account book and opens a host checkpoint; on any error
    /// both are restored, so callers observe either the complete operation
    /// or no trace of it. Nests cleanly: a reentrant inner operation commits
    /// immediately, and still unwinds if the outer one later fails.
    pub(crate) fn atomic<T, F>(&self, env: &mut dyn Host, op: F) -> Result<T, TokenError>
    where
        F: FnOnce(&Self, &mut dyn Host) -> Result<T, TokenError>,
    {
        let cp = env.checkpoint();
        let book = self.book.borrow().clone();
        match op(self, env) {
            Ok(out) => {
                env.commit(cp);
                Ok(out)
            }
            Err(err) => {
                *self.book.borrow_mut() = book;
                env.rollback(cp);
                Err(err)
            }
        }
    }
}
