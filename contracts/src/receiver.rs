//! Receiver capabilities for callback notifications.
//!
//! A contract that wants to be told about incoming transfers or approvals
//! implements one of these traits and registers itself with the host. The
//! dispatcher invokes the hook synchronously, inside the same operation
//! that moved the units — and because all preceding mutations are already
//! applied, the hook is free to call back into the token (reenter) and will
//! observe consistent state.
//!
//! A hook that returns [`Rejection`] fails the whole enclosing operation.
//! Acknowledge or abort; there is no third outcome.

use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::env::Host;
use crate::token::WrappedToken;

/// A receiver's refusal of a notification, with its stated reason.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Rejection(pub String);

impl Rejection {
    /// Convenience constructor.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// The transfer-received hook.
///
/// Invoked after units have been credited to the implementing contract via
/// `transfer_and_call` or `deposit_to_and_call`.
pub trait TransferReceiver {
    /// Acknowledge (or refuse) `amount` units received from `from`.
    ///
    /// `token` is the notifying ledger — implementations may reenter it.
    /// `data` is the opaque payload the initiator attached.
    fn on_transfer_received(
        &self,
        token: &WrappedToken,
        env: &mut dyn Host,
        from: Address,
        amount: U256,
        data: &[u8],
    ) -> Result<(), Rejection>;
}

/// The approval-received hook.
///
/// Invoked after an allowance has been set for the implementing contract
/// via `approve_and_call`.
pub trait ApprovalReceiver {
    /// Acknowledge (or refuse) an `amount` allowance granted by `owner`.
    fn on_approval_received(
        &self,
        token: &WrappedToken,
        env: &mut dyn Host,
        owner: Address,
        amount: U256,
        data: &[u8],
    ) -> Result<(), Rejection>;
}
