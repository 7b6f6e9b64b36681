//! Stage 7: voluntary exits.

use helper_functions::beacon_state_accessors::{current_epoch, entry_exit_effect_epoch, ProposerSelector};
use helper_functions::beacon_state_mutators::initiate_validator_exit;
use helper_functions::crypto::Crypto;
use helper_functions::predicates::is_active_validator;
use log::debug;
use types::beacon_state::BeaconState;
use types::consts::DOMAIN_VOLUNTARY_EXIT;
use types::types::VoluntaryExit;

use crate::context::BlockProcessingContext;
use crate::error::{Error, OpKind};

const OP: OpKind = OpKind::VoluntaryExit;

pub fn process_exits<X: Crypto, P: ProposerSelector>(
    state: &mut BeaconState,
    exits: &[VoluntaryExit],
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    if exits.len() > ctx.config.max_exits {
        return Err(Error::LimitExceeded {
            op_kind: OP,
            n: exits.len(),
            max: ctx.config.max_exits,
        });
    }

    for exit in exits {
        process_one(state, exit, ctx)?;
    }

    Ok(())
}

fn process_one<X: Crypto, P: ProposerSelector>(
    state: &mut BeaconState,
    exit: &VoluntaryExit,
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    let epoch = current_epoch(state, ctx.config.epoch_length);

    let validator = state
        .validator(exit.validator_index)
        .map_err(|cause| Error::helper("validator", cause))?;

    if !is_active_validator(validator, epoch) {
        return Err(Error::ConsensusCheckFailed {
            op_kind: OP,
            reason: "validator is not active",
        });
    }
    if validator.exit_epoch <= entry_exit_effect_epoch(epoch) {
        return Err(Error::ConsensusCheckFailed {
            op_kind: OP,
            reason: "validator has already been scheduled to exit",
        });
    }
    if epoch < exit.epoch {
        return Err(Error::ConsensusCheckFailed {
            op_kind: OP,
            reason: "exit epoch has not yet arrived",
        });
    }

    if ctx.verify_signatures {
        let message = ctx.crypto.hash_tree_root(exit);
        let ok = ctx
            .crypto
            .bls_verify(&validator.pubkey, message.as_bytes(), &exit.signature, DOMAIN_VOLUNTARY_EXIT as u64)
            .map_err(|cause| Error::helper("bls_verify", cause))?;
        if !ok {
            return Err(Error::SignatureInvalid {
                op_kind: OP,
                reason: "exit signature does not verify under the validator's pubkey",
            });
        }
    }

    initiate_validator_exit(state, exit.validator_index, epoch)
        .map_err(|cause| Error::helper("initiate_validator_exit", cause))?;
    debug!("validator {} exit initiated at epoch {}", exit.validator_index, epoch);

    Ok(())
}
