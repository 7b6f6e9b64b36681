//! Stage 2: randao reveal verification + mix update.

use helper_functions::beacon_state_accessors::ProposerSelector;
use helper_functions::crypto::Crypto;
use helper_functions::misc::repeat_hash;
use log::trace;
use types::beacon_state::BeaconState;
use types::primitives::H256;

use crate::context::BlockProcessingContext;
use crate::error::{Error, OpKind};

pub fn process_randao<X: Crypto, P: ProposerSelector>(
    state: &mut BeaconState,
    randao_reveal: H256,
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    let proposer_index = ctx
        .proposer_selector
        .beacon_proposer_index(state)
        .map_err(|cause| Error::helper("beacon_proposer_index", cause))?;

    let proposer = state
        .validator(proposer_index)
        .map_err(|cause| Error::helper("validator", cause))?;

    let expected = repeat_hash(ctx.crypto, randao_reveal, proposer.randao_layers);
    if expected != proposer.randao_commitment {
        return Err(Error::ConsensusCheckFailed {
            op_kind: OpKind::Randao,
            reason: "randao reveal does not hash-chain to the proposer's commitment",
        });
    }

    let mix_index = (state.slot % state.latest_randao_mixes.len() as u64) as usize;
    let current_mix = state.latest_randao_mixes[mix_index];
    state.latest_randao_mixes[mix_index] = xor(current_mix, randao_reveal);

    let proposer = state
        .validator_mut(proposer_index)
        .map_err(|cause| Error::helper("validator", cause))?;
    proposer.randao_commitment = randao_reveal;
    proposer.randao_layers = 0;
    trace!("randao mix at slot {} rotated by proposer {}", state.slot, proposer_index);

    Ok(())
}

fn xor(a: H256, b: H256) -> H256 {
    let mut out = [0u8; 32];
    for i in 0..32 {
        out[i] = a.as_bytes()[i] ^ b.as_bytes()[i];
    }
    H256::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use helper_functions::crypto::RealCrypto;
    use types::config::Config;
    use types::primitives::ValidatorIndex;
    use types::types::Validator;

    struct FixedProposer(ValidatorIndex);
    impl ProposerSelector for FixedProposer {
        fn beacon_proposer_index(
            &self,
            _state: &BeaconState,
        ) -> Result<ValidatorIndex, helper_functions::error::Error> {
            Ok(self.0)
        }
    }

    #[test]
    fn xor_is_its_own_inverse() {
        let a = H256::repeat_byte(0xaa);
        let b = H256::repeat_byte(0x55);
        assert_eq!(xor(xor(a, b), b), a);
    }

    #[test]
    fn accepts_a_reveal_matching_the_proposer_commitment_at_layer_zero() {
        let config = Config::minimal();
        let mut state = BeaconState::genesis(&config);
        let reveal = H256::repeat_byte(0x42);
        state.validator_registry = vec![Validator {
            randao_commitment: reveal,
            randao_layers: 0,
            ..Validator::default()
        }];

        let crypto = RealCrypto;
        let selector = FixedProposer(0);
        let ctx = BlockProcessingContext::new(&config, &crypto, &selector, true);

        let mix_index = (state.slot % state.latest_randao_mixes.len() as u64) as usize;
        let mix_before = state.latest_randao_mixes[mix_index];

        process_randao(&mut state, reveal, &ctx).unwrap();

        assert_eq!(state.latest_randao_mixes[mix_index], xor(mix_before, reveal));
        assert_eq!(state.validator_registry[0].randao_commitment, reveal);
        assert_eq!(state.validator_registry[0].randao_layers, 0);
    }

    #[test]
    fn rejects_a_reveal_that_does_not_hash_chain_to_the_commitment() {
        let config = Config::minimal();
        let mut state = BeaconState::genesis(&config);
        state.validator_registry = vec![Validator {
            randao_commitment: H256::repeat_byte(0x99),
            randao_layers: 1,
            ..Validator::default()
        }];

        let crypto = RealCrypto;
        let selector = FixedProposer(0);
        let ctx = BlockProcessingContext::new(&config, &crypto, &selector, true);

        let err = process_randao(&mut state, H256::repeat_byte(0x42), &ctx).unwrap_err();
        assert_eq!(
            err,
            Error::ConsensusCheckFailed {
                op_kind: OpKind::Randao,
                reason: "randao reveal does not hash-chain to the proposer's commitment",
            }
        );
    }
}
