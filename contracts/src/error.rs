//! Failure taxonomy for the wrapped-coin contract.
//!
//! Every variant aborts the whole enclosing operation: the entry point that
//! produced it rolls back the ledger and the host checkpoint before the
//! error reaches the caller, so observing a `TokenError` means nothing
//! happened. No condition is ever silently swallowed or clamped.

use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::env::NativeTransferError;

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// A debit was attempted for more than the account holds.
    #[error("insufficient balance: {account} holds {balance}, needs {required}")]
    InsufficientBalance {
        /// The account being debited.
        account: Address,
        /// Its current balance.
        balance: U256,
        /// The amount the operation needed.
        required: U256,
    },

    /// A delegated spend exceeded the spender's remaining allowance.
    #[error("insufficient allowance: {spender} may spend {allowance} of {owner}'s units, needs {required}")]
    InsufficientAllowance {
        /// The account whose units were being spent.
        owner: Address,
        /// The caller attempting the spend.
        spender: Address,
        /// The remaining approved amount.
        allowance: U256,
        /// The amount the operation needed.
        required: U256,
    },

    /// The permit's deadline has passed.
    #[error("permit expired: deadline {deadline} has passed (now {now})")]
    ExpiredPermit {
        /// The deadline the holder signed.
        deadline: U256,
        /// The host's current timestamp.
        now: u64,
    },

    /// The signature does not recover to the claimed owner.
    ///
    /// Also covers a submitter tampering with any signed field: the digest
    /// changes, so recovery yields the wrong address.
    #[error("invalid permit: signature does not recover to the owner")]
    InvalidPermit,

    /// A notification callback could not be delivered or was refused.
    #[error("receiver {receiver} rejected the notification: {reason}")]
    ReceiverRejected {
        /// The address that was to be notified.
        receiver: Address,
        /// Why delivery failed.
        reason: String,
    },

    /// A native-coin movement failed. Covers both payout to a recipient and
    /// custody intake on deposit — either direction aborts the operation.
    #[error("payout failed: could not deliver {amount} native units to {to}")]
    PayoutFailed {
        /// The intended recipient of the native coin.
        to: Address,
        /// The amount that could not be moved.
        amount: U256,
        /// The host's reason.
        #[source]
        source: NativeTransferError,
    },

    /// A credit would overflow the balance width.
    ///
    /// Unreachable while custody backs issuance 1:1, but checked anyway.
    #[error("balance overflow: crediting {account} with {amount} would exceed the representable supply")]
    BalanceOverflow {
        /// The account being credited.
        account: Address,
        /// The amount that overflowed.
        amount: U256,
    },
}
