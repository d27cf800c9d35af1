//! # Hashing Utilities
//!
//! keccak-256 and nothing else. The ledger's address derivation and its
//! typed-data signing digests are both defined in terms of keccak, so unlike
//! most projects we don't get to have opinions about hash functions here —
//! compatibility picked for us.
//!
//! Note that keccak-256 is *not* SHA3-256: the padding differs, and the two
//! produce unrelated digests. Everything in this crate is the original
//! keccak as used by the EVM ecosystem.

use alloy_primitives::{Keccak256, B256};

/// Compute the keccak-256 hash of the input data.
///
/// Returns the 32-byte digest as a [`B256`]. This is the single hash
/// function behind account addresses, signing digests, and type hashes.
///
/// # Example
///
/// ```
/// use specie_protocol::crypto::hash::keccak256;
///
/// let digest = keccak256(b"specie");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn keccak256(data: &[u8]) -> B256 {
    alloy_primitives::keccak256(data)
}

/// Hash multiple byte slices together without concatenation overhead.
///
/// Feeds the parts sequentially into one hasher instead of allocating a
/// temporary buffer. The result is identical to hashing the concatenation.
/// Used for composite preimages like `(prefix || separator || struct_hash)`.
pub fn keccak256_concat(parts: &[&[u8]]) -> B256 {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak_empty_known_vector() {
        // keccak-256 of the empty string — the vector every EVM tool agrees on.
        let digest = keccak256(b"");
        let expected =
            hex::decode("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
                .unwrap();
        assert_eq!(digest.as_slice(), expected.as_slice());
    }

    #[test]
    fn keccak_abc_known_vector() {
        let digest = keccak256(b"abc");
        let expected =
            hex::decode("4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45")
                .unwrap();
        assert_eq!(digest.as_slice(), expected.as_slice());
    }

    #[test]
    fn keccak_deterministic() {
        let a = keccak256(b"specie");
        let b = keccak256(b"specie");
        assert_eq!(a, b);
    }

    #[test]
    fn keccak_case_sensitive() {
        let a = keccak256(b"specie");
        let b = keccak256(b"Specie");
        assert_ne!(a, b);
    }

    #[test]
    fn concat_matches_single_pass() {
        let multi = keccak256_concat(&[b"hello", b" ", b"world"]);
        let single = keccak256(b"hello world");
        assert_eq!(multi, single);
    }

    #[test]
    fn concat_empty_parts() {
        let with_empties = keccak256_concat(&[b"", b"data", b""]);
        let plain = keccak256(b"data");
        assert_eq!(with_empties, plain);
    }
}
