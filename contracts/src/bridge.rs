//! The native-value bridge: deposit and withdraw.
//!
//! The only place ledger units are minted or burned, and every mint/burn is
//! paired — in the same atomic operation — with the custody of exactly that
//! much native coin. That pairing is the whole reason `total_supply` can be
//! a custody query instead of a counter: the two quantities cannot diverge
//! except through a bug in this module, which is why the integration suite
//! leans on it hardest.

use alloy_primitives::{Address, U256};
use tracing::debug;

use crate::env::Host;
use crate::error::TokenError;
use crate::events::Event;
use crate::token::WrappedToken;

impl WrappedToken {
    /// Wrap: custody `value` native coin from the caller and credit the
    /// caller with the same amount of units.
    pub fn deposit(
        &self,
        env: &mut dyn Host,
        caller: Address,
        value: U256,
    ) -> Result<(), TokenError> {
        self.deposit_to(env, caller, caller, value)
    }

    /// Wrap on someone's behalf: the caller pays, `recipient` is credited.
    pub fn deposit_to(
        &self,
        env: &mut dyn Host,
        caller: Address,
        recipient: Address,
        value: U256,
    ) -> Result<(), TokenError> {
        debug!(%caller, %recipient, %value, "deposit");
        self.atomic(env, |token, env| {
            token.custody_in(env, caller, recipient, value)
        })
    }

    /// A bare native transfer to the contract's address: equivalent to
    /// [`deposit`](Self::deposit).
    pub fn receive(
        &self,
        env: &mut dyn Host,
        caller: Address,
        value: U256,
    ) -> Result<(), TokenError> {
        self.deposit(env, caller, value)
    }

    /// Unwrap: burn `amount` of the caller's units and pay the caller back
    /// in native coin.
    pub fn withdraw(
        &self,
        env: &mut dyn Host,
        caller: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        self.withdraw_to(env, caller, caller, amount)
    }

    /// Unwrap with a different payee: the caller's units burn, `recipient`
    /// gets the native coin.
    pub fn withdraw_to(
        &self,
        env: &mut dyn Host,
        caller: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        debug!(%caller, %recipient, %amount, "withdraw");
        self.atomic(env, |token, env| {
            token.debit(caller, amount)?;
            token.pay_out(env, caller, recipient, amount)
        })
    }

    /// Delegated unwrap: burn from `owner` against the caller's allowance
    /// and pay `recipient`.
    ///
    /// Same allowance rules as `transfer_from`: the unlimited sentinel is
    /// never decremented, a shortfall fails the operation, and an owner
    /// acting as their own caller needs no allowance.
    pub fn withdraw_from(
        &self,
        env: &mut dyn Host,
        caller: Address,
        owner: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        debug!(%caller, %owner, %recipient, %amount, "withdraw_from");
        self.atomic(env, |token, env| {
            if caller != owner {
                token.spend_allowance(owner, caller, amount)?;
            }
            token.debit(owner, amount)?;
            token.pay_out(env, owner, recipient, amount)
        })
    }

    /// Custody intake: pull `value` native coin from `payer`, then mint the
    /// matching units to `recipient`.
    pub(crate) fn custody_in(
        &self,
        env: &mut dyn Host,
        payer: Address,
        recipient: Address,
        value: U256,
    ) -> Result<(), TokenError> {
        env.move_native(payer, self.address(), value)
            .map_err(|source| TokenError::PayoutFailed {
                to: self.address(),
                amount: value,
                source,
            })?;
        self.credit(recipient, value)?;
        env.emit(Event::Deposit {
            to: recipient,
            amount: value,
        });
        Ok(())
    }

    /// Custody release: push `amount` native coin from the contract to
    /// `to`, journaling the burn that `debited` already absorbed.
    ///
    /// Callers debit first; by the time the host runs, the book already
    /// reflects the burn, so code the payout hands control to observes
    /// consistent state. A recipient that cannot accept native coin fails
    /// the whole operation — there is no "absorb silently" path.
    pub(crate) fn pay_out(
        &self,
        env: &mut dyn Host,
        debited: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        env.move_native(self.address(), to, amount)
            .map_err(|source| TokenError::PayoutFailed {
                to,
                amount,
                source,
            })?;
        env.emit(Event::Withdrawal {
            from: debited,
            to,
            amount,
        });
        Ok(())
    }
}
