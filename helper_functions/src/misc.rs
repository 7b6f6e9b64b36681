//! Epoch/slot arithmetic and the randao hash-chain.

use types::primitives::{Epoch, Slot, H256};

use crate::crypto::Crypto;

pub fn compute_epoch_at_slot(slot: Slot, epoch_length: u64) -> Epoch {
    slot / epoch_length
}

pub fn compute_start_slot_of_epoch(epoch: Epoch, epoch_length: u64) -> Slot {
    epoch * epoch_length
}

/// Earliest epoch a newly-initiated exit can take effect: one full epoch of delay past the
/// current one.
pub fn compute_entry_exit_effect_epoch(epoch: Epoch) -> Epoch {
    epoch + 1
}

/// `repeat_hash(x, 0) = x`, `repeat_hash(x, n) = hash(repeat_hash(x, n-1))`.
pub fn repeat_hash<X: Crypto>(crypto: &X, input: H256, layers: u64) -> H256 {
    let mut value = input;
    for _ in 0..layers {
        value = H256::from_slice(&crypto.hash(value.as_bytes()));
    }
    value
}
