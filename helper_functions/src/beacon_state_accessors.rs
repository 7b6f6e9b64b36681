//! Pure read-only queries over `BeaconState`, minus `beacon_proposer_index` — that one needs
//! validator-shuffling machinery out of scope here, so it stays an injected capability; see
//! `ProposerSelector` below.

use types::beacon_state::BeaconState;
use types::consts::GENESIS_EPOCH;
use types::primitives::{Epoch, Shard, Slot, ValidatorIndex, H256};

use crate::error::Error;
use crate::misc::{compute_epoch_at_slot, compute_start_slot_of_epoch};

pub fn current_epoch(state: &BeaconState, epoch_length: u64) -> Epoch {
    compute_epoch_at_slot(state.slot, epoch_length)
}

pub fn previous_epoch(state: &BeaconState, epoch_length: u64) -> Epoch {
    let current = current_epoch(state, epoch_length);
    if current > GENESIS_EPOCH {
        current - 1
    } else {
        GENESIS_EPOCH
    }
}

pub fn start_slot(epoch: Epoch, epoch_length: u64) -> Slot {
    compute_start_slot_of_epoch(epoch, epoch_length)
}

pub fn entry_exit_effect_epoch(epoch: Epoch) -> Epoch {
    crate::misc::compute_entry_exit_effect_epoch(epoch)
}

/// Reads `state.block_roots[slot % len]`, requiring `slot` to fall in the retained window.
/// A pure read over the state's own history buffer, unlike the shuffling-dependent
/// `beacon_proposer_index`.
pub fn block_root(state: &BeaconState, slot: Slot) -> Result<H256, Error> {
    let len = state.block_roots.len() as u64;
    if len == 0 || !(slot < state.slot && state.slot <= slot + len) {
        return Err(Error::SlotOutOfRange);
    }
    state
        .block_roots
        .get((slot % len) as usize)
        .copied()
        .ok_or(Error::IndexOutOfRange)
}

/// `beacon_proposer_index` requires the full active-validator shuffling/committee-assignment
/// algorithm, which is out of scope for this crate. The pipeline consumes it as an injected
/// pure function instead of reimplementing shuffling here.
///
/// `crosslink_committee` has the same dependency: the set of validators entitled to sign a
/// given shard's attestation at a given slot comes out of the same shuffling. The attestation
/// stage needs it only to know which pubkeys an aggregate signature was made against, so it is
/// offered as a second method on the same injected capability rather than a separate trait.
/// Default returns empty, so existing `ProposerSelector` implementors are unaffected until they
/// opt in.
pub trait ProposerSelector {
    fn beacon_proposer_index(&self, state: &BeaconState) -> Result<ValidatorIndex, Error>;

    fn crosslink_committee(
        &self,
        _state: &BeaconState,
        _shard: Shard,
        _slot: Slot,
    ) -> Result<Vec<ValidatorIndex>, Error> {
        Ok(Vec::new())
    }
}
