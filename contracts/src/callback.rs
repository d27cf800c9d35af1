//! The "and-call" dispatcher: operate, then notify, atomically.
//!
//! Each entry point performs its base operation and then synchronously
//! invokes the receiving contract's hook. The two halves share one fate:
//! if the hook is missing (a plain address, or a contract without the
//! capability) or refuses, the whole operation rolls back — there is never
//! a credit that silently lost its notification.
//!
//! No lock guards the hook invocation, deliberately. Every mutation from
//! the base operation is already committed when the hook runs, so a hook
//! that reenters the token sees fully consistent state and cannot
//! double-spend; the checkpoint protocol handles unwinding if the outer
//! operation ultimately fails.

use alloy_primitives::{Address, U256};
use tracing::debug;

use crate::env::Host;
use crate::error::TokenError;
use crate::ledger::MoveOutcome;
use crate::token::WrappedToken;

impl WrappedToken {
    /// Deposit to `recipient`, then deliver the transfer-received hook with
    /// `(token, caller, value, data)`.
    pub fn deposit_to_and_call(
        &self,
        env: &mut dyn Host,
        caller: Address,
        recipient: Address,
        value: U256,
        data: &[u8],
    ) -> Result<(), TokenError> {
        debug!(%caller, %recipient, %value, "deposit_to_and_call");
        self.atomic(env, |token, env| {
            token.custody_in(env, caller, recipient, value)?;
            token.notify_transfer(env, recipient, caller, value, data)
        })
    }

    /// Transfer to `to`, then deliver the transfer-received hook.
    ///
    /// The zero/self withdraw redirect applies exactly as in
    /// [`transfer`](Self::transfer); when it triggers, no balance was
    /// credited and no hook is delivered — the redeem simply completes.
    pub fn transfer_and_call(
        &self,
        env: &mut dyn Host,
        caller: Address,
        to: Address,
        amount: U256,
        data: &[u8],
    ) -> Result<(), TokenError> {
        debug!(%caller, %to, %amount, "transfer_and_call");
        self.atomic(env, |token, env| {
            match token.move_units(env, caller, to, amount)? {
                MoveOutcome::Redeemed => Ok(()),
                MoveOutcome::Credited => token.notify_transfer(env, to, caller, amount, data),
            }
        })
    }

    /// Approve `spender`, then deliver the approval-received hook with
    /// `(token, caller, amount, data)`.
    pub fn approve_and_call(
        &self,
        env: &mut dyn Host,
        caller: Address,
        spender: Address,
        amount: U256,
        data: &[u8],
    ) -> Result<(), TokenError> {
        debug!(%caller, %spender, %amount, "approve_and_call");
        self.atomic(env, |token, env| {
            token.grant(env, caller, spender, amount);
            token.notify_approval(env, spender, caller, amount, data)
        })
    }

    fn notify_transfer(
        &self,
        env: &mut dyn Host,
        receiver: Address,
        from: Address,
        amount: U256,
        data: &[u8],
    ) -> Result<(), TokenError> {
        let Some(hook) = env.transfer_receiver(receiver) else {
            return Err(TokenError::ReceiverRejected {
                receiver,
                reason: "no transfer-received capability at this address".into(),
            });
        };
        hook.on_transfer_received(self, env, from, amount, data)
            .map_err(|rejection| TokenError::ReceiverRejected {
                receiver,
                reason: rejection.to_string(),
            })
    }

    fn notify_approval(
        &self,
        env: &mut dyn Host,
        receiver: Address,
        owner: Address,
        amount: U256,
        data: &[u8],
    ) -> Result<(), TokenError> {
        let Some(hook) = env.approval_receiver(receiver) else {
            return Err(TokenError::ReceiverRejected {
                receiver,
                reason: "no approval-received capability at this address".into(),
            });
        };
        hook.on_approval_received(self, env, owner, amount, data)
            .map_err(|rejection| TokenError::ReceiverRejected {
                receiver,
                reason: rejection.to_string(),
            })
    }
}
