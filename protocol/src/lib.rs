// Copyright (c) 2026 Specie Labs. MIT License.
// See LICENSE for details.

//! # Specie Protocol — Trusted Primitives
//!
//! The cryptographic bedrock of the Specie wrapped-coin ledger. The contracts
//! layer treats everything in this crate as given: addresses are 20 bytes,
//! keccak-256 is collision resistant, and a recoverable ECDSA signature
//! identifies exactly one signer. If any of those assumptions breaks, no
//! amount of accounting discipline upstairs will save you.
//!
//! ## Architecture
//!
//! - **crypto::hash** — keccak-256, the hash the EVM world agreed on.
//! - **crypto::keys** — secp256k1 keypairs and keccak-derived account
//!   addresses.
//! - **crypto::signatures** — recoverable ECDSA: sign a 32-byte digest, get
//!   `{v, r, s}` back; recover the signing address from any digest and
//!   signature without ever seeing a public key.
//!
//! ## Design Philosophy
//!
//! 1. Thin, type-safe wrappers around audited implementations. Nothing here
//!    does its own field arithmetic.
//! 2. Recovery is a pure function `(digest, signature) -> Address`. No key
//!    registry, no signer polymorphism, no state.
//! 3. If it touches key material, it has tests and it never logs.

pub mod crypto;

pub use crypto::hash::{keccak256, keccak256_concat};
pub use crypto::keys::SpecieKeypair;
pub use crypto::signatures::{recover_address, sign_recoverable, RecoverableSignature};
