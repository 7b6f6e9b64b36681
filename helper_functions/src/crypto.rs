//! Injectable cryptographic collaborators: hashing, BLS verification and Merkle-branch
//! verification are kept behind the [`Crypto`] trait so the per-block pipeline can be exercised
//! with a real backend or a deterministic test double, matching the `verify_signatures` flag in
//! `state_processing::context`.

use bls::{AggregatePublicKey, PublicKey, PublicKeyBytes, Signature, SignatureBytes};
use ring::digest::{digest, SHA256};
use ssz::Encode;
use std::convert::TryInto;
use tree_hash::TreeHash;
use types::primitives::{Domain, H256};

/// One signature to verify: an aggregated public key set, the signed message, and the
/// signature to check against it. Lets attester-slashing and attestation verification submit
/// a whole validator set as one batched call.
pub struct SignatureSet<'a> {
    pub signing_keys: Vec<&'a PublicKeyBytes>,
    pub message: Vec<u8>,
    pub signature: &'a SignatureBytes,
    pub domain: Domain,
}

pub trait Crypto {
    fn hash(&self, input: &[u8]) -> Vec<u8>;

    fn hash_tree_root<T: TreeHash>(&self, value: &T) -> H256 {
        H256::from_slice(&value.tree_hash_root())
    }

    /// Canonical-byte-encoding equality, used for eth1-data tally matching and
    /// attester-slashing data inequality instead of native `#[derive(PartialEq)]`.
    fn canonical_eq<T: Encode>(&self, a: &T, b: &T) -> bool {
        a.as_ssz_bytes() == b.as_ssz_bytes()
    }

    fn bls_verify(
        &self,
        pubkey: &PublicKeyBytes,
        message: &[u8],
        signature: &SignatureBytes,
        domain: Domain,
    ) -> Result<bool, CryptoError>;

    fn bls_verify_batch(&self, sets: &[SignatureSet<'_>]) -> Result<bool, CryptoError>;

    fn verify_merkle_branch(
        &self,
        leaf: H256,
        branch: &[H256],
        depth: u64,
        index: u64,
        root: H256,
    ) -> bool;
}

#[derive(thiserror::Error, Debug)]
pub enum CryptoError {
    #[error("malformed BLS key or signature bytes")]
    BadBlsBytes,
}

/// The production backend: SHA-256 via `ring`, BLS via the `bls` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealCrypto;

impl Crypto for RealCrypto {
    fn hash(&self, input: &[u8]) -> Vec<u8> {
        digest(&SHA256, input).as_ref().to_vec()
    }

    fn bls_verify(
        &self,
        pubkey: &PublicKeyBytes,
        message: &[u8],
        signature: &SignatureBytes,
        domain: Domain,
    ) -> Result<bool, CryptoError> {
        let public_key: PublicKey = pubkey.try_into().map_err(|_| CryptoError::BadBlsBytes)?;
        let signature: Signature = signature.try_into().map_err(|_| CryptoError::BadBlsBytes)?;

        Ok(signature.verify(message, domain, &public_key))
    }

    fn bls_verify_batch(&self, sets: &[SignatureSet<'_>]) -> Result<bool, CryptoError> {
        for set in sets {
            let mut aggregate = AggregatePublicKey::new();
            for key_bytes in &set.signing_keys {
                let key: PublicKey = (*key_bytes).try_into().map_err(|_| CryptoError::BadBlsBytes)?;
                aggregate.add(&key);
            }
            // Round-trip through bytes via the raw key, the same way PublicKeyBytes is built
            // from a PublicKey elsewhere in this file.
            let aggregate_bytes = PublicKeyBytes::from_bytes(aggregate.as_raw().as_bytes().as_slice())
                .map_err(|_| CryptoError::BadBlsBytes)?;
            let aggregate_key: PublicKey = (&aggregate_bytes)
                .try_into()
                .map_err(|_| CryptoError::BadBlsBytes)?;

            let signature: Signature = set
                .signature
                .try_into()
                .map_err(|_| CryptoError::BadBlsBytes)?;

            if !signature.verify(&set.message, set.domain, &aggregate_key) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn verify_merkle_branch(
        &self,
        leaf: H256,
        branch: &[H256],
        depth: u64,
        index: u64,
        root: H256,
    ) -> bool {
        crate::predicates::is_valid_merkle_branch(self, &leaf, branch, depth, index, &root)
    }
}
