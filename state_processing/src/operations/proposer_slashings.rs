//! Stage 3: proposer slashings.

use helper_functions::beacon_state_accessors::{current_epoch, ProposerSelector};
use helper_functions::beacon_state_mutators::penalize_validator;
use helper_functions::crypto::Crypto;
use log::trace;
use types::beacon_state::BeaconState;
use types::consts::DOMAIN_BEACON_PROPOSER;
use types::types::ProposerSlashing;

use crate::context::BlockProcessingContext;
use crate::error::{Error, OpKind};

const OP: OpKind = OpKind::ProposerSlashing;

pub fn process_proposer_slashings<X: Crypto, P: ProposerSelector>(
    state: &mut BeaconState,
    slashings: &[ProposerSlashing],
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    if slashings.len() > ctx.config.max_proposer_slashings {
        return Err(Error::LimitExceeded {
            op_kind: OP,
            n: slashings.len(),
            max: ctx.config.max_proposer_slashings,
        });
    }
    trace!("processing {} proposer slashing(s)", slashings.len());

    for slashing in slashings {
        process_one(state, slashing, ctx)?;
    }

    Ok(())
}

fn process_one<X: Crypto, P: ProposerSelector>(
    state: &mut BeaconState,
    slashing: &ProposerSlashing,
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    let d1 = &slashing.proposal_data_1;
    let d2 = &slashing.proposal_data_2;

    if d1.slot != d2.slot || d1.shard != d2.shard {
        return Err(Error::ConsensusCheckFailed {
            op_kind: OP,
            reason: "the two proposals are not for the same slot and shard",
        });
    }
    if d1.block_root == d2.block_root {
        return Err(Error::ConsensusCheckFailed {
            op_kind: OP,
            reason: "the two proposals reference the same block root",
        });
    }

    let proposer = state
        .validator(slashing.proposer_index)
        .map_err(|cause| Error::helper("validator", cause))?
        .clone();

    if ctx.verify_signatures {
        for (data, signature) in [
            (d1, &slashing.proposal_signature_1),
            (d2, &slashing.proposal_signature_2),
        ] {
            let message = ctx.crypto.hash_tree_root(data);
            let ok = ctx
                .crypto
                .bls_verify(&proposer.pubkey, message.as_bytes(), signature, DOMAIN_BEACON_PROPOSER as u64)
                .map_err(|cause| Error::helper("bls_verify", cause))?;
            if !ok {
                return Err(Error::SignatureInvalid {
                    op_kind: OP,
                    reason: "proposal signature does not verify under the proposer's pubkey",
                });
            }
        }
    }

    let epoch = current_epoch(state, ctx.config.epoch_length);
    if proposer.penalized_epoch > epoch {
        penalize_validator(state, slashing.proposer_index, epoch)
            .map_err(|cause| Error::helper("penalize_validator", cause))?;
    }

    Ok(())
}
