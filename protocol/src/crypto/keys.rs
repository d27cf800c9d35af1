//! # Key Management
//!
//! secp256k1 keypair generation and address derivation for Specie accounts.
//!
//! An account address is the last 20 bytes of the keccak-256 hash of the
//! uncompressed public key (the SEC1 point without its `0x04` tag byte).
//! That keeps state keys compact at 160 bits while the full 256-bit security
//! of the curve still backs every signature.
//!
//! ## Security considerations
//!
//! - Key generation uses the OS RNG (`OsRng`). If your operating system's
//!   entropy source is broken, you have bigger problems than this ledger.
//! - `SpecieKeypair` intentionally does NOT implement `Serialize` or
//!   `Debug` over its key material. Exporting a private key should be a
//!   deliberate act, not a side effect of logging a struct.
//! - Key bytes are never logged, formatted, or serialized. Any patch that
//!   changes this needs a very persuasive commit message.

use alloy_primitives::Address;
use k256::ecdsa::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use thiserror::Error;

use super::hash::keccak256;

/// Errors that can occur during key operations.
///
/// Deliberately vague — error messages must never leak anything about the
/// key material that produced them.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,
}

/// A Specie account keypair wrapping a secp256k1 signing key.
///
/// This is the atomic unit of account ownership: the address every balance
/// is booked under traces back to one of these, and the permit flow's
/// signature recovery resolves to the address derived here.
pub struct SpecieKeypair {
    signing_key: SigningKey,
}

impl SpecieKeypair {
    /// Generate a fresh keypair from the OS cryptographic RNG.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut OsRng);
        Self { signing_key }
    }

    /// Construct a keypair deterministically from a 32-byte seed.
    ///
    /// The seed is used directly as the secp256k1 secret scalar. Useful for
    /// test fixtures that need stable addresses across runs.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidSecretKey`] if the bytes are zero or not a
    /// valid scalar for the curve.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self, KeyError> {
        let signing_key = SigningKey::from_slice(seed).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self { signing_key })
    }

    /// The account address controlled by this keypair.
    pub fn address(&self) -> Address {
        address_of(self.signing_key.verifying_key())
    }

    /// The public half of the keypair, safe to share.
    pub fn verifying_key(&self) -> &VerifyingKey {
        self.signing_key.verifying_key()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

/// Derive the account address for a secp256k1 public key.
///
/// `keccak256(uncompressed_point_without_tag)[12..32]` — the rightmost 20
/// bytes of the hash of the 64-byte public key encoding.
pub fn address_of(verifying_key: &VerifyingKey) -> Address {
    let point = verifying_key.to_encoded_point(false);
    // Skip the 0x04 SEC1 tag byte; the hash covers the raw 64-byte point.
    let digest = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&digest[12..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_distinct_addresses() {
        let a = SpecieKeypair::generate();
        let b = SpecieKeypair::generate();
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn from_seed_is_deterministic() {
        let seed = [7u8; 32];
        let a = SpecieKeypair::from_seed(&seed).unwrap();
        let b = SpecieKeypair::from_seed(&seed).unwrap();
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn zero_seed_rejected() {
        // Zero is not a valid secp256k1 scalar.
        let result = SpecieKeypair::from_seed(&[0u8; 32]);
        assert!(result.is_err());
    }

    #[test]
    fn address_matches_manual_derivation() {
        let kp = SpecieKeypair::from_seed(&[42u8; 32]).unwrap();
        let point = kp.verifying_key().to_encoded_point(false);
        let digest = keccak256(&point.as_bytes()[1..]);
        assert_eq!(kp.address().as_slice(), &digest[12..]);
    }

    #[test]
    fn address_is_not_zero() {
        let kp = SpecieKeypair::generate();
        assert_ne!(kp.address(), Address::ZERO);
    }
}
