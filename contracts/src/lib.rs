//! # Specie Wrapped-Coin Contract
//!
//! A value-custody ledger that wraps the network's native coin into a
//! fungible, transferable, delegable accounting token. One token, four
//! intertwined protocols:
//!
//! - **Ledger** — balances and allowances with overwrite-style approvals and
//!   an unlimited-allowance sentinel ([`ledger`]).
//! - **Bridge** — deposit/withdraw between native custody and ledger units,
//!   1:1, the sole source of mint and burn ([`bridge`]).
//! - **Permit** — offline typed-data approvals: a holder signs, anyone
//!   submits, the contract recovers and checks the signer ([`permit`]).
//! - **Callbacks** — "and-call" variants that notify the receiving contract
//!   in the same atomic operation, notify-or-nothing ([`callback`]).
//!
//! The load-bearing invariant: the sum of all ledger balances equals the
//! native coin the contract holds in custody, after every operation, by
//! construction. There is no stored total supply to drift — `total_supply`
//! is the custody balance, full stop.
//!
//! ## Design Principles
//!
//! 1. Monetary arithmetic is checked arithmetic. An overflow or underflow
//!    is a named failure, never a wrap and never a clamp.
//! 2. Every failure aborts the whole enclosing operation; the [`Host`]
//!    checkpoint protocol makes partial state unrepresentable.
//! 3. State mutations land *before* control passes to external code, so a
//!    reentrant call always observes consistent intermediate state.
//! 4. Every public state type is serializable (serde) for wire transport
//!    and persistent storage.

pub mod accounts;
pub mod bridge;
pub mod callback;
pub mod env;
pub mod error;
pub mod events;
pub mod ledger;
pub mod permit;
pub mod receiver;
pub mod token;

pub use accounts::{Account, AccountBook};
pub use env::{Host, InMemoryWorld, NativeTransferError};
pub use error::TokenError;
pub use events::Event;
pub use receiver::{ApprovalReceiver, Rejection, TransferReceiver};
pub use token::{TokenConfig, WrappedToken};
