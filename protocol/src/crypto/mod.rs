//! # Cryptographic Primitives for Specie
//!
//! Every digest, every keypair, every signature recovery in the ledger flows
//! through this module. We deliberately chose the boring, battle-tested
//! corner of the ecosystem:
//!
//! - **keccak-256** for hashing — addresses and typed-data digests are
//!   keccak-defined, so there is no choice to make.
//! - **secp256k1** for signatures — recoverable ECDSA, because the whole
//!   point of this ledger's permit flow is extracting the signer from the
//!   signature itself.
//!
//! Everything is a thin wrapper over `alloy-primitives` and `k256`. If you
//! feel the urge to optimize or "simplify" these functions, go read about
//! nonce-reuse key extraction first and see if the urge survives.

pub mod hash;
pub mod keys;
pub mod signatures;

// Re-exports so callers don't have to memorize the module hierarchy.
pub use hash::{keccak256, keccak256_concat};
pub use keys::{KeyError, SpecieKeypair};
pub use signatures::{recover_address, sign_recoverable, RecoverableSignature, SignatureError};
