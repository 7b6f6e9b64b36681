//! Stage 5: block attestations.

use helper_functions::beacon_state_accessors::{block_root, current_epoch, start_slot, ProposerSelector};
use helper_functions::crypto::{Crypto, SignatureSet};
use log::trace;
use types::beacon_state::BeaconState;
use types::consts::{DOMAIN_ATTESTATION, ZERO_HASH};
use types::types::{Attestation, PendingAttestationRecord};

use crate::context::BlockProcessingContext;
use crate::error::{Error, OpKind};

const OP: OpKind = OpKind::Attestation;

pub fn process_attestations<X: Crypto, P: ProposerSelector>(
    state: &mut BeaconState,
    attestations: &[Attestation],
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    if attestations.len() > ctx.config.max_attestations {
        return Err(Error::LimitExceeded {
            op_kind: OP,
            n: attestations.len(),
            max: ctx.config.max_attestations,
        });
    }
    trace!("processing {} attestation(s)", attestations.len());

    let mut accumulated = Vec::with_capacity(attestations.len());
    for attestation in attestations {
        verify_one(state, attestation, ctx)?;
        accumulated.push(PendingAttestationRecord {
            data: attestation.data,
            aggregation_bitfield: attestation.aggregation_bitfield.clone(),
            custody_bitfield: attestation.custody_bitfield.clone(),
            slot_included: state.slot,
        });
    }

    // Replaces `latest_attestations` rather than appending to it.
    state.latest_attestations = accumulated;

    Ok(())
}

fn verify_one<X: Crypto, P: ProposerSelector>(
    state: &BeaconState,
    attestation: &Attestation,
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    let data = &attestation.data;
    let epoch_length = ctx.config.epoch_length;

    if !(data.slot + ctx.config.min_attestation_inclusion_delay <= state.slot
        && data.slot + epoch_length >= state.slot)
    {
        return Err(Error::ConsensusCheckFailed {
            op_kind: OP,
            reason: "attestation slot falls outside the inclusion window",
        });
    }

    let current_epoch_start = start_slot(current_epoch(state, epoch_length), epoch_length);
    let expected_justified_epoch = if data.slot >= current_epoch_start {
        state.justified_epoch
    } else {
        state.previous_justified_epoch
    };
    if data.justified_epoch != expected_justified_epoch {
        return Err(Error::ConsensusCheckFailed {
            op_kind: OP,
            reason: "justified epoch does not match the epoch-appropriate state field",
        });
    }

    let expected_justified_root = block_root(state, start_slot(data.justified_epoch, epoch_length))
        .map_err(|cause| Error::helper("block_root", cause))?;
    if data.justified_block_root != expected_justified_root {
        return Err(Error::ConsensusCheckFailed {
            op_kind: OP,
            reason: "justified block root does not match the state's history at that slot",
        });
    }

    let crosslink = state
        .crosslink(data.shard)
        .map_err(|cause| Error::helper("crosslink", cause))?;
    if data.latest_crosslink_root != crosslink.shard_block_root && data.shard_block_root != crosslink.shard_block_root {
        return Err(Error::ConsensusCheckFailed {
            op_kind: OP,
            reason: "neither the crosslink root nor the shard block root matches the latest crosslink",
        });
    }

    if data.shard_block_root != ZERO_HASH {
        return Err(Error::MalformedOperation {
            op_kind: OP,
            reason: "phase-0 shard block root must be the empty hash",
        });
    }

    if ctx.verify_signatures {
        verify_signature(state, attestation, ctx)?;
    }

    Ok(())
}

fn verify_signature<X: Crypto, P: ProposerSelector>(
    state: &BeaconState,
    attestation: &Attestation,
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    let committee = ctx
        .proposer_selector
        .crosslink_committee(state, attestation.data.shard, attestation.data.slot)
        .map_err(|cause| Error::helper("crosslink_committee", cause))?;

    let mut signing_keys = Vec::new();
    for (position, &index) in committee.iter().enumerate() {
        if !bit_set(&attestation.aggregation_bitfield, position) {
            continue;
        }
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
            reason: "attestation aggregate signature does not verify against the participating committee",
        });
    }

    Ok(())
}

/// Little-endian packed bit read, matching the custody bitfield's wire layout.
fn bit_set(bitfield: &[u8], index: usize) -> bool {
    match bitfield.get(index / 8) {
        Some(byte) => (byte >> (index % 8)) & 1 == 1,
        None => false,
    }
}
