//! # Recoverable Signatures
//!
//! Recoverable ECDSA over secp256k1 — the signature scheme where the
//! signature itself tells you who signed. Given a 32-byte digest and a
//! `{v, r, s}` triple, [`recover_address`] resolves the one address whose
//! key produced that signature, with no public key in sight.
//!
//! This is the primitive the ledger's permit flow stands on: a holder signs
//! a typed digest offline, anyone submits it, and the contract compares the
//! recovered address against the claimed owner. Recovery is a pure function
//! of `(digest, signature)` — no registry, no state, no signer objects.
//!
//! ## Strictness
//!
//! We accept both Ethereum-style recovery ids (27/28) and raw ones (0/1),
//! and we do not enforce a low-`s` policy: a high-`s` signature that
//! recovers to the expected address is the same authorization. Replay
//! protection belongs to the caller's nonce scheme, not to signature
//! canonicalization.

use alloy_primitives::{Address, B256};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::keys::{address_of, SpecieKeypair};

/// Errors during signature operations.
///
/// Intentionally terse — a verification oracle that explains itself is a
/// verification oracle that helps the wrong people.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("signature recovery failed")]
    RecoveryFailed,

    #[error("invalid recovery id: expected 0, 1, 27, or 28")]
    InvalidRecoveryId,

    #[error("invalid signature scalars")]
    InvalidScalars,

    #[error("signing failed")]
    SigningFailed,
}

/// A recoverable ECDSA signature in Ethereum's `{v, r, s}` wire layout.
///
/// `r` and `s` are the two curve scalars; `v` carries the recovery id,
/// conventionally offset by 27. Exactly one address recovers from a given
/// `(digest, signature)` pair — flip any bit and you get a different
/// (essentially random) signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverableSignature {
    /// Recovery id, 27 or 28 (0 and 1 are accepted on input).
    pub v: u8,
    /// The `r` scalar, big-endian.
    pub r: B256,
    /// The `s` scalar, big-endian.
    pub s: B256,
}

impl RecoverableSignature {
    /// Assemble a signature from its wire components.
    pub fn from_vrs(v: u8, r: B256, s: B256) -> Self {
        Self { v, r, s }
    }

    fn recovery_id(&self) -> Option<RecoveryId> {
        let raw = match self.v {
            27 | 28 => self.v - 27,
            0 | 1 => self.v,
            _ => return None,
        };
        RecoveryId::from_byte(raw)
    }
}

/// Sign a 32-byte digest, producing a recoverable signature.
///
/// The digest is signed as-is ("prehash" mode) — callers hash their message
/// themselves, which is exactly what typed-data signing requires.
pub fn sign_recoverable(
    keypair: &SpecieKeypair,
    digest: B256,
) -> Result<RecoverableSignature, SignatureError> {
    let (signature, recovery_id) = keypair
        .signing_key()
        .sign_prehash_recoverable(digest.as_slice())
        .map_err(|_| SignatureError::SigningFailed)?;

    let (r, s) = signature.split_bytes();
    Ok(RecoverableSignature {
        v: 27 + recovery_id.to_byte(),
        r: B256::from_slice(&r),
        s: B256::from_slice(&s),
    })
}

/// Recover the signing address from a digest and a recoverable signature.
///
/// Pure function: same inputs, same output, no state consulted. A mismatched
/// digest does not error — it recovers a *different* address, which is how
/// callers detect tampering (the recovered address won't match the one they
/// expected).
///
/// # Errors
///
/// Fails only when the signature is structurally unusable: an out-of-range
/// recovery id, scalars outside the curve order, or a point that cannot be
/// reconstructed.
pub fn recover_address(
    digest: B256,
    signature: &RecoverableSignature,
) -> Result<Address, SignatureError> {
    let recovery_id = signature
        .recovery_id()
        .ok_or(SignatureError::InvalidRecoveryId)?;

    let sig = Signature::from_scalars(signature.r.0, signature.s.0)
        .map_err(|_| SignatureError::InvalidScalars)?;

    let verifying_key = VerifyingKey::recover_from_prehash(digest.as_slice(), &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_of(&verifying_key))
}
