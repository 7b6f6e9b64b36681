//! Stage 4: attester slashings.

use helper_functions::beacon_state_accessors::{current_epoch, ProposerSelector};
use helper_functions::beacon_state_mutators::penalize_validator;
use helper_functions::crypto::{Crypto, SignatureSet};
use helper_functions::predicates::{is_slashable_attestation_data, is_valid_slashable_attestation, slashable_indices};
use log::trace;
use types::beacon_state::BeaconState;
use types::consts::DOMAIN_ATTESTATION;
use types::types::{AttesterSlashing, SlashableAttestation};

use crate::context::BlockProcessingContext;
use crate::error::{Error, OpKind};

const OP: OpKind = OpKind::AttesterSlashing;

pub fn process_attester_slashings<X: Crypto, P: ProposerSelector>(
    state: &mut BeaconState,
    slashings: &[AttesterSlashing],
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    if slashings.len() > ctx.config.max_attester_slashings {
        return Err(Error::LimitExceeded {
            op_kind: OP,
            n: slashings.len(),
            max: ctx.config.max_attester_slashings,
        });
    }
    trace!("processing {} attester slashing(s)", slashings.len());

    for slashing in slashings {
        process_one(state, slashing, ctx)?;
    }

    Ok(())
}

fn process_one<X: Crypto, P: ProposerSelector>(
    state: &mut BeaconState,
    slashing: &AttesterSlashing,
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    let sa1 = &slashing.slashable_attestation_1;
    let sa2 = &slashing.slashable_attestation_2;

    if ctx.crypto.canonical_eq(&sa1.data, &sa2.data) {
        return Err(Error::ConsensusCheckFailed {
            op_kind: OP,
            reason: "the two slashable attestations vote for the same data",
        });
    }

    if !is_slashable_attestation_data(&sa1.data, &sa2.data, ctx.config.epoch_length) {
        return Err(Error::ConsensusCheckFailed {
            op_kind: OP,
            reason: "the two attestation data are neither a double vote nor a surround vote",
        });
    }

    is_valid_slashable_attestation(sa1, ctx.config.max_indices_per_slashable_vote)
        .map_err(|cause| Error::helper("is_valid_slashable_attestation", cause))?;
    is_valid_slashable_attestation(sa2, ctx.config.max_indices_per_slashable_vote)
        .map_err(|cause| Error::helper("is_valid_slashable_attestation", cause))?;

    if ctx.verify_signatures {
        verify_slashable_attestation_signature(state, sa1, ctx)?;
        verify_slashable_attestation_signature(state, sa2, ctx)?;
    }

    let epoch = current_epoch(state, ctx.config.epoch_length);
    let slashable = slashable_indices(&sa1.validator_indices, &sa2.validator_indices, &state.validator_registry, epoch);

    if slashable.is_empty() {
        return Err(Error::ConsensusCheckFailed {
            op_kind: OP,
            reason: "no validator index is slashable by both attestations",
        });
    }

    for index in slashable {
        penalize_validator(state, index, epoch).map_err(|cause| Error::helper("penalize_validator", cause))?;
    }

    Ok(())
}

fn verify_slashable_attestation_signature<X: Crypto, P: ProposerSelector>(
    state: &BeaconState,
    attestation: &SlashableAttestation,
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    let mut signing_keys = Vec::with_capacity(attestation.validator_indices.len());
    for &index in &attestation.validator_indices {
        let validator = state
            .validator(index)
            .map_err(|cause| Error::helper("validator", cause))?;
        signing_keys.push(&validator.pubkey);
    }

    let message = ctx.crypto.hash_tree_root(&attestation.data);
    let set = SignatureSet {
        signing_keys,
        message: message.as_bytes().to_vec(),
        signature: &attestation.aggregate_signature,
        domain: DOMAIN_ATTESTATION as u64,
    };

    let ok = ctx
        .crypto
        .bls_verify_batch(&[set])
        .map_err(|cause| Error::helper("bls_verify_batch", cause))?;

    if !ok {
        return Err(Error::SignatureInvalid {
            op_kind: OP,
            reason: "slashable attestation aggregate signature does not verify",
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use helper_functions::crypto::RealCrypto;
    use types::config::Config;
    use types::consts::FAR_FUTURE_EPOCH;
    use types::primitives::ValidatorIndex;
    use types::types::{AttestationData, Validator};

    struct FixedProposer(ValidatorIndex);
    impl ProposerSelector for FixedProposer {
        fn beacon_proposer_index(
            &self,
            _state: &BeaconState,
        ) -> Result<ValidatorIndex, helper_functions::error::Error> {
            Ok(self.0)
        }
    }

    fn double_vote_slashing() -> AttesterSlashing {
        AttesterSlashing {
            slashable_attestation_1: SlashableAttestation {
                validator_indices: vec![0, 1],
                data: AttestationData { slot: 10, shard: 0, ..AttestationData::default() },
                custody_bitfield: vec![0b01],
                aggregate_signature: Default::default(),
            },
            slashable_attestation_2: SlashableAttestation {
                validator_indices: vec![0, 1],
                data: AttestationData { slot: 10, shard: 1, ..AttestationData::default() },
                custody_bitfield: vec![0b01],
                aggregate_signature: Default::default(),
            },
        }
    }

    #[test]
    fn penalizes_the_intersection_of_both_validator_index_lists() {
        let config = Config::minimal();
        let mut state = BeaconState::genesis(&config);
        state.validator_registry = vec![
            Validator { penalized_epoch: FAR_FUTURE_EPOCH, ..Validator::default() },
            Validator { penalized_epoch: FAR_FUTURE_EPOCH, ..Validator::default() },
        ];

        let crypto = RealCrypto;
        let selector = FixedProposer(0);
        let ctx = BlockProcessingContext::new(&config, &crypto, &selector, false);

        process_attester_slashings(&mut state, &[double_vote_slashing()], &ctx).unwrap();

        assert_ne!(state.validator_registry[0].penalized_epoch, FAR_FUTURE_EPOCH);
        assert_ne!(state.validator_registry[1].penalized_epoch, FAR_FUTURE_EPOCH);
    }

    #[test]
    fn rejects_attestation_data_that_is_neither_double_nor_surround_vote() {
        let config = Config::minimal();
        let mut state = BeaconState::genesis(&config);
        state.validator_registry = vec![Validator::default(), Validator::default()];

        let slashing = AttesterSlashing {
            slashable_attestation_1: SlashableAttestation {
                validator_indices: vec![0, 1],
                data: AttestationData { slot: 10, justified_epoch: 2, ..AttestationData::default() },
                custody_bitfield: vec![0b01],
                aggregate_signature: Default::default(),
            },
            slashable_attestation_2: SlashableAttestation {
                validator_indices: vec![0, 1],
                data: AttestationData { slot: 500, justified_epoch: 1, ..AttestationData::default() },
                custody_bitfield: vec![0b01],
                aggregate_signature: Default::default(),
            },
        };

        let crypto = RealCrypto;
        let selector = FixedProposer(0);
        let ctx = BlockProcessingContext::new(&config, &crypto, &selector, false);

        let err = process_attester_slashings(&mut state, &[slashing], &ctx).unwrap_err();
        assert!(matches!(err, Error::ConsensusCheckFailed { op_kind: OP, .. }));
    }

    #[test]
    fn rejects_when_no_index_is_slashable_by_both() {
        let config = Config::minimal();
        let mut state = BeaconState::genesis(&config);
        state.validator_registry = vec![
            Validator { penalized_epoch: 0, ..Validator::default() },
            Validator { penalized_epoch: 0, ..Validator::default() },
        ];

        let crypto = RealCrypto;
        let selector = FixedProposer(0);
        let ctx = BlockProcessingContext::new(&config, &crypto, &selector, false);

        let err = process_attester_slashings(&mut state, &[double_vote_slashing()], &ctx).unwrap_err();
        assert_eq!(
            err,
            Error::ConsensusCheckFailed {
                op_kind: OP,
                reason: "no validator index is slashable by both attestations",
            }
        );
    }
}
