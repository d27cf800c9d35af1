//! The contract's event vocabulary.
//!
//! Events are the public accounting record: every balance movement and
//! every approval emits exactly one. They are journaled through
//! [`Host::emit`](crate::env::Host::emit) so a rolled-back operation takes
//! its events with it — an observer never sees an event for something that
//! didn't happen.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// A state-change notification emitted by the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Native coin entered custody and `to` was credited.
    Deposit {
        /// The credited account.
        to: Address,
        /// Units minted (equal to the native amount custodied).
        amount: U256,
    },

    /// Units were burned from `from` and native coin paid to `to`.
    Withdrawal {
        /// The debited account.
        from: Address,
        /// The native-coin recipient.
        to: Address,
        /// Units burned (equal to the native amount paid out).
        amount: U256,
    },

    /// An ordinary balance-to-balance move.
    Transfer {
        /// The debited account.
        from: Address,
        /// The credited account.
        to: Address,
        /// Units moved.
        amount: U256,
    },

    /// An allowance was set (overwrite semantics).
    Approval {
        /// The account whose units may be spent.
        owner: Address,
        /// The authorized spender.
        spender: Address,
        /// The new allowance, replacing any prior value.
        amount: U256,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serialization_roundtrip() {
        let event = Event::Withdrawal {
            from: Address::from([1u8; 20]),
            to: Address::from([2u8; 20]),
            amount: U256::from(42),
        };
        let json = serde_json::to_string(&event).unwrap();
        let restored: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, restored);
    }
}
