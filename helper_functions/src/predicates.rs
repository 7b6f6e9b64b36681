//! Pure consensus predicates over validators and attestation data.

use types::primitives::{Epoch, ValidatorIndex, H256};
use types::types::{AttestationData, SlashableAttestation, Validator};

use crate::crypto::Crypto;
use crate::error::Error;

/// A validator not yet penalized, active by `epoch`. Shared by the proposer- and
/// attester-slashing stages.
pub fn is_slashable_validator(validator: &Validator, epoch: Epoch) -> bool {
    validator.penalized_epoch > epoch && validator.activation_epoch <= epoch
}

pub fn is_active_validator(validator: &Validator, epoch: Epoch) -> bool {
    validator.activation_epoch <= epoch && epoch < validator.exit_epoch
}

/// `double_vote OR surround_vote`.
pub fn is_slashable_attestation_data(
    data_1: &AttestationData,
    data_2: &AttestationData,
    epoch_length: u64,
) -> bool {
    is_double_vote(data_1, data_2, epoch_length) || is_surround_vote(data_1, data_2, epoch_length)
}

pub fn is_double_vote(data_1: &AttestationData, data_2: &AttestationData, epoch_length: u64) -> bool {
    crate::misc::compute_epoch_at_slot(data_1.slot, epoch_length)
        == crate::misc::compute_epoch_at_slot(data_2.slot, epoch_length)
}

pub fn is_surround_vote(data_1: &AttestationData, data_2: &AttestationData, epoch_length: u64) -> bool {
    data_1.justified_epoch < data_2.justified_epoch
        && crate::misc::compute_epoch_at_slot(data_2.slot, epoch_length)
            < crate::misc::compute_epoch_at_slot(data_1.slot, epoch_length)
}

/// Slashable-attestation well-formedness, independent of signature checks.
pub fn is_valid_slashable_attestation(
    attestation: &SlashableAttestation,
    max_indices_per_slashable_vote: usize,
) -> Result<(), Error> {
    if attestation.custody_bitfield.iter().all(|&b| b == 0) {
        return Err(Error::AttestationBitsInvalid);
    }

    if attestation.validator_indices.is_empty() {
        return Err(Error::BadValidatorIndicesOrdering);
    }

    if !attestation.validator_indices.windows(2).all(|w| w[0] < w[1]) {
        return Err(Error::BadValidatorIndicesOrdering);
    }

    if attestation.validator_indices.len() > max_indices_per_slashable_vote {
        return Err(Error::MaxIndicesExceeded);
    }

    let expected_bitfield_len = (attestation.validator_indices.len() + 7) / 8;
    if attestation.custody_bitfield.len() != expected_bitfield_len {
        return Err(Error::AttestationBitsInvalid);
    }

    Ok(())
}

/// The intersection of two (already validated, strictly ascending) `validator_indices` slices,
/// restricted to validators not yet penalized as of `epoch`.
pub fn slashable_indices(
    indices_1: &[ValidatorIndex],
    indices_2: &[ValidatorIndex],
    registry: &[Validator],
    epoch: Epoch,
) -> Vec<ValidatorIndex> {
    let mut i = 0;
    let mut j = 0;
    let mut out = Vec::new();

    while i < indices_1.len() && j < indices_2.len() {
        match indices_1[i].cmp(&indices_2[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                let index = indices_1[i];
                if let Some(validator) = registry.get(index as usize) {
                    if validator.penalized_epoch > epoch {
                        out.push(index);
                    }
                }
                i += 1;
                j += 1;
            }
        }
    }

    out
}

pub fn is_valid_merkle_branch<X: Crypto>(
    crypto: &X,
    leaf: &H256,
    branch: &[H256],
    depth: u64,
    index: u64,
    root: &H256,
) -> bool {
    let mut value: H256 = *leaf;

    for i in 0..depth {
        value = if (index >> i) & 1 == 0 {
            H256::from_slice(&crypto.hash(&join_hashes(&value, &branch[i as usize])))
        } else {
            H256::from_slice(&crypto.hash(&join_hashes(&branch[i as usize], &value)))
        };
    }

    value == *root
}

fn join_hashes(hash1: &H256, hash2: &H256) -> Vec<u8> {
    hash1.as_bytes().iter().chain(hash2.as_bytes()).copied().collect()
}
