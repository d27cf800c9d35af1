//! The execution environment the contract runs against.
//!
//! The ledger assumes an environment that runs one operation at a time, to
//! completion, and can unwind every side effect of a failed operation. The
//! [`Host`] trait makes those assumptions explicit: time, native-coin
//! custody, the checkpoint/rollback primitive, receiver lookup, and the
//! event journal all live behind it. The contract itself never touches
//! native value or a clock directly.
//!
//! [`InMemoryWorld`] is the reference host: a plain in-memory state machine
//! with a manual clock and a checkpoint stack, used by the integration
//! suite. In production the host is whatever execution layer embeds the
//! ledger.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::events::Event;
use crate::receiver::{ApprovalReceiver, TransferReceiver};

/// Opaque handle to a host checkpoint. Obtained from [`Host::checkpoint`]
/// and consumed by exactly one of [`Host::commit`] or [`Host::rollback`].
pub type Checkpoint = usize;

/// Errors from native-coin movement.
#[derive(Debug, Error)]
pub enum NativeTransferError {
    /// The paying account does not hold enough native coin.
    #[error("insufficient native funds: {holder} holds {balance}, tried to move {amount}")]
    InsufficientFunds {
        /// The account being debited.
        holder: Address,
        /// Its native balance.
        balance: U256,
        /// The amount requested.
        amount: U256,
    },

    /// The recipient cannot or will not accept native coin.
    #[error("recipient {recipient} refused the native transfer")]
    Refused {
        /// The refusing address.
        recipient: Address,
    },
}

/// The contract's window onto its execution environment.
///
/// Checkpoint discipline: every public contract entry point opens a
/// checkpoint, and on failure rolls back — native balances and journaled
/// events return to their checkpointed state. Checkpoints nest; a reentrant
/// inner operation that commits is still unwound if the outer one fails.
pub trait Host {
    /// Current time, seconds. Gates permit deadlines.
    fn timestamp(&self) -> u64;

    /// Native coin held by `addr`. Querying the contract's own address
    /// reports custody, which *is* the token's total supply.
    fn native_balance(&self, addr: Address) -> U256;

    /// Move native coin between addresses. The only way value crosses the
    /// custody boundary, in either direction.
    fn move_native(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), NativeTransferError>;

    /// Open a checkpoint covering native balances and the event journal.
    fn checkpoint(&mut self) -> Checkpoint;

    /// Discard everything since `cp`, restoring the checkpointed state.
    fn rollback(&mut self, cp: Checkpoint);

    /// Retain everything since `cp` and release the checkpoint.
    fn commit(&mut self, cp: Checkpoint);

    /// The transfer-received capability at `addr`, if it is a contract
    /// implementing the hook. `None` means notification cannot be delivered.
    fn transfer_receiver(&self, addr: Address) -> Option<Rc<dyn TransferReceiver>>;

    /// The approval-received capability at `addr`, if any.
    fn approval_receiver(&self, addr: Address) -> Option<Rc<dyn ApprovalReceiver>>;

    /// Journal an event. Rolled back with the enclosing checkpoint.
    fn emit(&mut self, event: Event);
}

/// Snapshot of the rollback-able portion of [`InMemoryWorld`].
///
/// Receiver registrations and the refusal set are code, not state — they
/// survive a rollback the way deployed bytecode survives a revert.
#[derive(Debug, Clone)]
struct WorldSnapshot {
    balances: HashMap<Address, U256>,
    events_len: usize,
}

/// In-memory reference host.
///
/// Holds native balances, a receiver registry, a manual clock, and a
/// checkpoint stack. Test conveniences (`fund`, `refuse_payments_to`,
/// `advance_time`) let the integration suite stage refused payouts,
/// expired deadlines, and any funding shape it needs.
pub struct InMemoryWorld {
    balances: HashMap<Address, U256>,
    now: u64,
    transfer_receivers: HashMap<Address, Rc<dyn TransferReceiver>>,
    approval_receivers: HashMap<Address, Rc<dyn ApprovalReceiver>>,
    refusing: HashSet<Address>,
    events: Vec<Event>,
    checkpoints: Vec<WorldSnapshot>,
}

impl InMemoryWorld {
    /// A fresh world with no balances, clock set to wall time.
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            now: u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default(),
            transfer_receivers: HashMap::new(),
            approval_receivers: HashMap::new(),
            refusing: HashSet::new(),
            events: Vec::new(),
            checkpoints: Vec::new(),
        }
    }

    /// Faucet: conjure native coin for `addr`.
    pub fn fund(&mut self, addr: Address, amount: U256) {
        let balance = self.balances.entry(addr).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Pin the clock to an absolute timestamp.
    pub fn set_timestamp(&mut self, now: u64) {
        self.now = now;
    }

    /// Advance the clock by `secs`.
    pub fn advance_time(&mut self, secs: u64) {
        self.now = self.now.saturating_add(secs);
    }

    /// Install a transfer-received capability at `addr`, making it a
    /// contract in the eyes of the dispatcher.
    pub fn deploy_transfer_receiver(&mut self, addr: Address, receiver: Rc<dyn TransferReceiver>) {
        self.transfer_receivers.insert(addr, receiver);
    }

    /// Install an approval-received capability at `addr`.
    pub fn deploy_approval_receiver(&mut self, addr: Address, receiver: Rc<dyn ApprovalReceiver>) {
        self.approval_receivers.insert(addr, receiver);
    }

    /// Mark `addr` as refusing all incoming native transfers.
    pub fn refuse_payments_to(&mut self, addr: Address) {
        self.refusing.insert(addr);
    }

    /// The committed event journal, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl Default for InMemoryWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for InMemoryWorld {
    fn timestamp(&self) -> u64 {
        self.now
    }

    fn native_balance(&self, addr: Address) -> U256 {
        self.balances.get(&addr).copied().unwrap_or_default()
    }

    fn move_native(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), NativeTransferError> {
        let balance = self.native_balance(from);
        let remaining =
            balance
                .checked_sub(amount)
                .ok_or(NativeTransferError::InsufficientFunds {
                    holder: from,
                    balance,
                    amount,
                })?;
        if self.refusing.contains(&to) {
            return Err(NativeTransferError::Refused { recipient: to });
        }
        self.balances.insert(from, remaining);
        let credited = self.balances.entry(to).or_default();
        *credited = credited.saturating_add(amount);
        Ok(())
    }

    fn checkpoint(&mut self) -> Checkpoint {
        let cp = self.checkpoints.len();
        self.checkpoints.push(WorldSnapshot {
            balances: self.balances.clone(),
            events_len: self.events.len(),
        });
        cp
    }

    fn rollback(&mut self, cp: Checkpoint) {
        // Restore the checkpointed snapshot and drop anything nested deeper.
        if let Some(snapshot) = self.checkpoints.drain(cp..).next() {
            self.balances = snapshot.balances;
            self.events.truncate(snapshot.events_len);
        }
    }

    fn commit(&mut self, cp: Checkpoint) {
        self.checkpoints.truncate(cp);
    }

    fn transfer_receiver(&self, addr: Address) -> Option<Rc<dyn TransferReceiver>> {
        self.transfer_receivers.get(&addr).cloned()
    }

    fn approval_receiver(&self, addr: Address) -> Option<Rc<dyn ApprovalReceiver>> {
        self.approval_receivers.get(&addr).cloned()
    }

    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from([byte; 20])
    }

    #[test]
    fn fund_and_query() {
        let mut world = InMemoryWorld::new();
        world.fund(addr(1), U256::from(100));
        assert_eq!(world.native_balance(addr(1)), U256::from(100));
        assert_eq!(world.native_balance(addr(2)), U256::ZERO);
    }

    #[test]
    fn move_native_transfers_value() {
        let mut world = InMemoryWorld::new();
        world.fund(addr(1), U256::from(100));
        world
            .move_native(addr(1), addr(2), U256::from(30))
            .unwrap();
        assert_eq!(world.native_balance(addr(1)), U256::from(70));
        assert_eq!(world.native_balance(addr(2)), U256::from(30));
    }

    #[test]
    fn move_native_insufficient_funds_rejected() {
        let mut world = InMemoryWorld::new();
        world.fund(addr(1), U256::from(10));
        let result = world.move_native(addr(1), addr(2), U256::from(11));
        assert!(matches!(
            result,
            Err(NativeTransferError::InsufficientFunds { .. })
        ));
        // Nothing moved.
        assert_eq!(world.native_balance(addr(1)), U256::from(10));
        assert_eq!(world.native_balance(addr(2)), U256::ZERO);
    }

    #[test]
    fn refusing_recipient_rejects_transfer() {
        let mut world = InMemoryWorld::new();
        world.fund(addr(1), U256::from(10));
        world.refuse_payments_to(addr(2));
        let result = world.move_native(addr(1), addr(2), U256::from(5));
        assert!(matches!(result, Err(NativeTransferError::Refused { .. })));
        assert_eq!(world.native_balance(addr(1)), U256::from(10));
    }

    #[test]
    fn rollback_restores_balances_and_events() {
        let mut world = InMemoryWorld::new();
        world.fund(addr(1), U256::from(100));
        world.emit(Event::Deposit {
            to: addr(1),
            amount: U256::from(100),
        });

        let cp = world.checkpoint();
        world
            .move_native(addr(1), addr(2), U256::from(40))
            .unwrap();
        world.emit(Event::Transfer {
            from: addr(1),
            to: addr(2),
            amount: U256::from(40),
        });
        world.rollback(cp);

        assert_eq!(world.native_balance(addr(1)), U256::from(100));
        assert_eq!(world.native_balance(addr(2)), U256::ZERO);
        assert_eq!(world.events().len(), 1);
    }

    #[test]
    fn commit_retains_changes() {
        let mut world = InMemoryWorld::new();
        world.fund(addr(1), U256::from(100));
        let cp = world.checkpoint();
        world
            .move_native(addr(1), addr(2), U256::from(40))
            .unwrap();
        world.commit(cp);
        assert_eq!(world.native_balance(addr(2)), U256::from(40));
    }

    #[test]
    fn nested_rollback_unwinds_inner_commit() {
        let mut world = InMemoryWorld::new();
        world.fund(addr(1), U256::from(100));

        let outer = world.checkpoint();
        world
            .move_native(addr(1), addr(2), U256::from(10))
            .unwrap();

        let inner = world.checkpoint();
        world
            .move_native(addr(1), addr(3), U256::from(20))
            .unwrap();
        world.commit(inner);

        // Outer failure takes the committed inner movement with it.
        world.rollback(outer);
        assert_eq!(world.native_balance(addr(1)), U256::from(100));
        assert_eq!(world.native_balance(addr(2)), U256::ZERO);
        assert_eq!(world.native_balance(addr(3)), U256::ZERO);
    }

    #[test]
    fn clock_is_manual() {
        let mut world = InMemoryWorld::new();
        world.set_timestamp(1_000);
        world.advance_time(500);
        assert_eq!(world.timestamp(), 1_500);
    }
}
