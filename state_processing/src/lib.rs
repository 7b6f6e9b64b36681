//! Per-block operations pipeline: given a prior `BeaconState` and an incoming `BeaconBlock`,
//! validates the block's operational payload and produces the next `BeaconState`.
//!
//! The seven stages run in a fixed order, each depending on the previous stage's mutations;
//! the proposer signature gate runs first. Any failure aborts the whole block — the caller
//! treats the pre-block state as authoritative.

pub mod context;
pub mod error;
pub mod operations;

use helper_functions::beacon_state_accessors::ProposerSelector;
use helper_functions::crypto::Crypto;
use log::info;
use types::beacon_state::BeaconState;
use types::consts::DOMAIN_BEACON_PROPOSER;
use types::types::BeaconBlock;

pub use context::BlockProcessingContext;
pub use error::{Error, OpKind};

pub fn process_block<X: Crypto, P: ProposerSelector>(
    state: &mut BeaconState,
    block: Option<&BeaconBlock>,
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    let block = block.ok_or(Error::MalformedOperation {
        op_kind: OpKind::ProposerSignature,
        reason: "block is null",
    })?;

    verify_proposer_signature(state, block, ctx)?;
    info!("processing block at slot {}", block.slot);

    let body = &block.body;

    operations::eth1_data::process_eth1_data(state, &body.eth1_data, ctx.crypto);
    operations::randao::process_randao(state, body.randao_reveal, ctx)?;
    operations::proposer_slashings::process_proposer_slashings(state, &body.proposer_slashings, ctx)?;
    operations::attester_slashings::process_attester_slashings(state, &body.attester_slashings, ctx)?;
    operations::attestations::process_attestations(state, &body.attestations, ctx)?;
    operations::deposits::process_deposits(state, &body.deposits, ctx)?;
    operations::exits::process_exits(state, &body.exits, ctx)?;

    Ok(())
}

fn verify_proposer_signature<X: Crypto, P: ProposerSelector>(
    state: &BeaconState,
    block: &BeaconBlock,
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    if !ctx.verify_signatures {
        return Ok(());
    }

    let proposer_index = ctx
        .proposer_selector
        .beacon_proposer_index(state)
        .map_err(|cause| Error::helper("beacon_proposer_index", cause))?;
    let proposer = state
        .validator(proposer_index)
        .map_err(|cause| Error::helper("validator", cause))?;

    let mut unsigned = block.clone();
    unsigned.signature = Default::default();
    let message = ctx.crypto.hash_tree_root(&unsigned);

    let ok = ctx
        .crypto
        .bls_verify(&proposer.pubkey, message.as_bytes(), &block.signature, DOMAIN_BEACON_PROPOSER as u64)
        .map_err(|cause| Error::helper("bls_verify", cause))?;

    if !ok {
        return Err(Error::SignatureInvalid {
            op_kind: OpKind::ProposerSignature,
            reason: "block signature does not verify under the proposer's pubkey",
        });
    }

    Ok(())
}
