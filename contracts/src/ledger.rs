//! Balance and allowance accounting.
//!
//! The primitives every other protocol composes: checked credits and
//! debits, overwrite-style approvals, sentinel-aware delegated spends, and
//! the destination rule that turns a transfer to the zero address or to the
//! contract itself into a withdrawal. Nothing in this module touches native
//! custody except through the bridge's payout helper.

use alloy_primitives::{Address, U256};
use tracing::debug;

use crate::env::Host;
use crate::error::TokenError;
use crate::events::Event;
use crate::token::WrappedToken;

/// The allowance value meaning "unlimited": never decremented by a spend.
pub const UNLIMITED_ALLOWANCE: U256 = U256::MAX;

/// What a balance move actually did with the units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MoveOutcome {
    /// Ordinary move: the destination's ledger balance was credited.
    Credited,
    /// The destination triggered the withdraw redirect: units were burned
    /// and native coin paid to the original holder. No balance was credited.
    Redeemed,
}

impl WrappedToken {
    /// True for destinations that redefine a transfer as a withdrawal.
    ///
    /// The zero address and the contract's own address are both unspendable
    /// resting places; rather than strand units there, the ledger burns and
    /// pays the holder out.
    pub(crate) fn is_redeem_destination(&self, to: Address) -> bool {
        to == Address::ZERO || to == self.address()
    }

    /// Add `amount` to `to`'s balance.
    pub(crate) fn credit(&self, to: Address, amount: U256) -> Result<(), TokenError> {
        let mut book = self.book.borrow_mut();
        let account = book.account_mut(to);
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(TokenError::BalanceOverflow {
                account: to,
                amount,
            })?;
        Ok(())
    }

    /// Remove `amount` from `from`'s balance.
    pub(crate) fn debit(&self, from: Address, amount: U256) -> Result<(), TokenError> {
        let mut book = self.book.borrow_mut();
        let balance = book.balance(from);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance {
                account: from,
                balance,
                required: amount,
            })?;
        book.account_mut(from).balance = remaining;
        Ok(())
    }

    /// Overwrite `owner`'s allowance for `spender` and journal the approval.
    ///
    /// Unconditional overwrite — no read of the prior value, no increment
    /// semantics. That rules out the classic double-approve race at the
    /// interface: the new allowance is exactly what the owner said, however
    /// the old one was spent.
    pub(crate) fn grant(
        &self,
        env: &mut dyn Host,
        owner: Address,
        spender: Address,
        amount: U256,
    ) {
        self.book
            .borrow_mut()
            .account_mut(owner)
            .allowances
            .insert(spender, amount);
        env.emit(Event::Approval {
            owner,
            spender,
            amount,
        });
    }

    /// Consume `amount` of `owner`'s allowance for `spender`.
    ///
    /// The unlimited sentinel is exempt from decrement; every other value
    /// decrements exactly, and a shortfall is a failure, never a clamp.
    pub(crate) fn spend_allowance(
        &self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        let mut book = self.book.borrow_mut();
        let allowance = book.allowance(owner, spender);
        if allowance == UNLIMITED_ALLOWANCE {
            return Ok(());
        }
        let remaining =
            allowance
                .checked_sub(amount)
                .ok_or(TokenError::InsufficientAllowance {
                    owner,
                    spender,
                    allowance,
                    required: amount,
                })?;
        book.account_mut(owner).allowances.insert(spender, remaining);
        Ok(())
    }

    /// Move `amount` from `from` toward `to`, honoring the redeem redirect.
    ///
    /// The debit lands before any external control transfer: by the time
    /// the host pays out (or, in the and-call flow, a receiver runs), the
    /// sender's balance already reflects the move.
    pub(crate) fn move_units(
        &self,
        env: &mut dyn Host,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<MoveOutcome, TokenError> {
        if self.is_redeem_destination(to) {
            self.debit(from, amount)?;
            self.pay_out(env, from, from, amount)?;
            Ok(MoveOutcome::Redeemed)
        } else {
            self.debit(from, amount)?;
            self.credit(to, amount)?;
            env.emit(Event::Transfer { from, to, amount });
            Ok(MoveOutcome::Credited)
        }
    }

    /// Move `amount` of the caller's units to `to`.
    ///
    /// A `to` of the zero address or the contract itself is a withdrawal:
    /// the caller's units are burned and the native coin comes back to the
    /// caller. Everything else is an ordinary balance-to-balance move.
    pub fn transfer(
        &self,
        env: &mut dyn Host,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        debug!(%caller, %to, %amount, "transfer");
        self.atomic(env, |token, env| {
            token.move_units(env, caller, to, amount).map(|_| ())
        })
    }

    /// Move `amount` of `from`'s units to `to` on the strength of an
    /// allowance.
    ///
    /// The allowance check applies only to third parties: a caller moving
    /// their own units needs no approval from themselves. On the redeem
    /// redirect the native coin goes to `from` — the original holder — not
    /// to the caller.
    pub fn transfer_from(
        &self,
        env: &mut dyn Host,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        debug!(%caller, %from, %to, %amount, "transfer_from");
        self.atomic(env, |token, env| {
            if caller != from {
                token.spend_allowance(from, caller, amount)?;
            }
            token.move_units(env, from, to, amount).map(|_| ())
        })
    }

    /// Set `spender`'s allowance over the caller's units to exactly
    /// `amount`, replacing any prior value.
    pub fn approve(
        &self,
        env: &mut dyn Host,
        caller: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        debug!(%caller, %spender, %amount, "approve");
        self.atomic(env, |token, env| {
            token.grant(env, caller, spender, amount);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::InMemoryWorld;
    use crate::token::TokenConfig;

    fn addr(byte: u8) -> Address {
        Address::from([byte; 20])
    }

    /// Token with `amount` units pre-deposited to `holder`.
    fn setup(holder: Address, amount: u64) -> (WrappedToken, InMemoryWorld) {
        let token = WrappedToken::new(TokenConfig::default(), 1, addr(0xEE));
        let mut world = InMemoryWorld::new();
        world.fund(holder, U256::from(amount));
        token.deposit(&mut world, holder, U256::from(amount)).unwrap();
        (token, world)
    }

    #[test]
    fn transfer_moves_balance() {
        let (token, mut world) = setup(addr(1), 100);
        token
            .transfer(&mut world, addr(1), addr(2), U256::from(40))
            .unwrap();
        assert_eq!(token.balance_of(addr(1)), U256::from(60));
        assert_eq!(token.balance_of(addr(2)), U256::from(40));
    }

    #[test]
    fn transfer_more_than_balance_rejected() {
        let (token, mut world) = setup(addr(1), 100);
        let result = token.transfer(&mut world, addr(1), addr(2), U256::from(101));
        assert!(matches!(
            result,
            Err(TokenError::InsufficientBalance { .. })
        ));
        assert_eq!(token.balance_of(addr(1)), U256::from(100));
        assert_eq!(token.balance_of(addr(2)), U256::ZERO);
    }

    #[test]
    fn transfer_to_zero_address_redeems_to_caller() {
        let (token, mut world) = setup(addr(1), 100);
        token
            .transfer(&mut world, addr(1), Address::ZERO, U256::from(30))
            .unwrap();
        assert_eq!(token.balance_of(addr(1)), U256::from(70));
        assert_eq!(token.balance_of(Address::ZERO), U256::ZERO);
        assert_eq!(world.native_balance(addr(1)), U256::from(30));
        assert_eq!(token.total_supply(&world), U256::from(70));
    }

    #[test]
    fn transfer_to_contract_address_redeems_to_caller() {
        let (token, mut world) = setup(addr(1), 100);
        token
            .transfer(&mut world, addr(1), token.address(), U256::from(30))
            .unwrap();
        assert_eq!(token.balance_of(addr(1)), U256::from(70));
        assert_eq!(token.balance_of(token.address()), U256::ZERO);
        assert_eq!(world.native_balance(addr(1)), U256::from(30));
    }

    #[test]
    fn approve_overwrites_prior_allowance() {
        let (token, mut world) = setup(addr(1), 100);
        token
            .approve(&mut world, addr(1), addr(2), U256::from(50))
            .unwrap();
        token
            .approve(&mut world, addr(1), addr(2), U256::from(7))
            .unwrap();
        assert_eq!(token.allowance(addr(1), addr(2)), U256::from(7));
    }

    #[test]
    fn transfer_from_consumes_allowance_exactly() {
        let (token, mut world) = setup(addr(1), 100);
        token
            .approve(&mut world, addr(1), addr(2), U256::from(50))
            .unwrap();
        token
            .transfer_from(&mut world, addr(2), addr(1), addr(3), U256::from(20))
            .unwrap();
        assert_eq!(token.allowance(addr(1), addr(2)), U256::from(30));
        assert_eq!(token.balance_of(addr(3)), U256::from(20));
    }

    #[test]
    fn transfer_from_beyond_allowance_rejected() {
        let (token, mut world) = setup(addr(1), 100);
        token
            .approve(&mut world, addr(1), addr(2), U256::from(1))
            .unwrap();
        let result = token.transfer_from(&mut world, addr(2), addr(1), addr(3), U256::from(2));
        assert!(matches!(
            result,
            Err(TokenError::InsufficientAllowance { .. })
        ));
        // Allowance untouched by the failed spend.
        assert_eq!(token.allowance(addr(1), addr(2)), U256::from(1));
        assert_eq!(token.balance_of(addr(1)), U256::from(100));
    }

    #[test]
    fn unlimited_allowance_never_decrements() {
        let (token, mut world) = setup(addr(1), 100);
        token
            .approve(&mut world, addr(1), addr(2), UNLIMITED_ALLOWANCE)
            .unwrap();
        for _ in 0..3 {
            token
                .transfer_from(&mut world, addr(2), addr(1), addr(3), U256::from(10))
                .unwrap();
        }
        assert_eq!(token.allowance(addr(1), addr(2)), UNLIMITED_ALLOWANCE);
        assert_eq!(token.balance_of(addr(3)), U256::from(30));
    }

    #[test]
    fn self_spend_needs_no_allowance() {
        let (token, mut world) = setup(addr(1), 100);
        // No approval of addr(1) to itself anywhere.
        token
            .transfer_from(&mut world, addr(1), addr(1), addr(2), U256::from(10))
            .unwrap();
        assert_eq!(token.balance_of(addr(2)), U256::from(10));
    }

    #[test]
    fn transfer_from_redeem_pays_original_holder() {
        let (token, mut world) = setup(addr(1), 100);
        token
            .approve(&mut world, addr(1), addr(2), U256::from(50))
            .unwrap();
        token
            .transfer_from(&mut world, addr(2), addr(1), Address::ZERO, U256::from(25))
            .unwrap();
        // Native goes to the holder whose units burned, not the caller.
        assert_eq!(world.native_balance(addr(1)), U256::from(25));
        assert_eq!(world.native_balance(addr(2)), U256::ZERO);
        assert_eq!(token.allowance(addr(1), addr(2)), U256::from(25));
    }

    #[test]
    fn failed_transfer_emits_no_events() {
        let (token, mut world) = setup(addr(1), 100);
        let before = world.events().len();
        let _ = token.transfer(&mut world, addr(1), addr(2), U256::from(1_000));
        assert_eq!(world.events().len(), before);
    }
}
