//! Offline approvals: the permit protocol.
//!
//! A holder signs a typed message over `(owner, spender, value, nonce,
//! deadline)` bound to this deployment's domain, hands the signature to
//! anyone, and that anyone submits it here. The contract rebuilds the
//! digest from its own state, recovers the signer, and — only if the signer
//! is the claimed owner — bumps the nonce and writes the allowance through
//! the same overwrite path `approve` uses.
//!
//! Replay is bounded to "exactly once, before the deadline, for the exact
//! signed tuple": the nonce in the digest is the owner's *current* nonce,
//! so a consumed permit re-hashes to a digest nobody ever signed, and
//! recovery yields a stranger instead of the owner.

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{sol, SolStruct};
use specie_protocol::crypto::signatures::{recover_address, RecoverableSignature};
use tracing::debug;

use crate::env::Host;
use crate::error::TokenError;
use crate::token::WrappedToken;

sol! {
    /// The EIP-2612 permit message. Field order is load-bearing: it is
    /// hashed into the type hash every wallet and signer agrees on.
    struct Permit {
        address owner;
        address spender;
        uint256 value;
        uint256 nonce;
        uint256 deadline;
    }
}

impl WrappedToken {
    /// The digest a holder must sign for a permit with these parameters.
    ///
    /// Exposed so holders (and tests) can produce signatures offline —
    /// `keccak256("\x19\x01" || domain_separator || struct_hash)` per the
    /// typed-data standard.
    pub fn permit_digest(
        &self,
        owner: Address,
        spender: Address,
        value: U256,
        nonce: U256,
        deadline: U256,
    ) -> B256 {
        let message = Permit {
            owner,
            spender,
            value,
            nonce,
            deadline,
        };
        message.eip712_signing_hash(self.domain())
    }

    /// Apply a signed approval on behalf of `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::ExpiredPermit`] when the deadline has passed,
    /// and [`TokenError::InvalidPermit`] when the signature does not
    /// recover to `owner` — which also covers any tampering with the
    /// submitted fields, since a tampered digest recovers a different
    /// address. A failed permit leaves the nonce untouched.
    pub fn permit(
        &self,
        env: &mut dyn Host,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: U256,
        signature: RecoverableSignature,
    ) -> Result<(), TokenError> {
        debug!(%owner, %spender, %value, %deadline, "permit");
        self.atomic(env, |token, env| {
            let now = env.timestamp();
            if U256::from(now) > deadline {
                return Err(TokenError::ExpiredPermit { deadline, now });
            }

            let nonce = token.book.borrow().nonce(owner);
            let digest = token.permit_digest(owner, spender, value, nonce, deadline);
            let signer =
                recover_address(digest, &signature).map_err(|_| TokenError::InvalidPermit)?;
            if signer != owner {
                return Err(TokenError::InvalidPermit);
            }

            token.bump_nonce(owner);
            token.grant(env, owner, spender, value);
            Ok(())
        })
    }

    /// Advance `owner`'s permit nonce by one.
    fn bump_nonce(&self, owner: Address) {
        let mut book = self.book.borrow_mut();
        let account = book.account_mut(owner);
        // 2^256 successful permits per holder is not a reachable state.
        account.nonce = account.nonce.wrapping_add(U256::from(1));
    }
}
