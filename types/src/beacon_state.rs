//! The mutable consensus state operated on by the per-block pipeline.

use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

use crate::config::Config;
use crate::consts::GENESIS_SLOT;
use crate::error::Error;
use crate::primitives::{Epoch, Slot, H256};
use crate::types::{Crosslink, Eth1Data, Eth1DataVote, Fork, PendingAttestationRecord, Validator};

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct BeaconState {
    pub slot: Slot,
    pub fork: Fork,

    pub validator_registry: Vec<Validator>,

    pub block_roots: Vec<H256>,
    pub latest_randao_mixes: Vec<H256>,
    pub latest_crosslinks: Vec<Crosslink>,
    pub latest_attestations: Vec<PendingAttestationRecord>,

    pub latest_eth1_data: Eth1Data,
    pub eth1_data_votes: Vec<Eth1DataVote>,

    pub justified_epoch: Epoch,
    pub previous_justified_epoch: Epoch,
}

impl BeaconState {
    /// Builds a well-formed empty state for the given config: history buffers sized and
    /// zero-filled per `latest_randao_mixes_length`/`shard_count`, everything else at genesis
    /// defaults. Callers needing a specific validator set or randao history still mutate the
    /// result directly; this only establishes the fixed-size invariants the pipeline assumes.
    pub fn genesis(config: &Config) -> Self {
        Self {
            slot: GENESIS_SLOT,
            fork: Fork::default(),
            validator_registry: Vec::new(),
            block_roots: vec![H256::zero(); config.slots_per_historical_root as usize],
            latest_randao_mixes: vec![H256::zero(); config.latest_randao_mixes_length as usize],
            latest_crosslinks: vec![Crosslink::default(); config.shard_count as usize],
            latest_attestations: Vec::new(),
            latest_eth1_data: Eth1Data::default(),
            eth1_data_votes: Vec::new(),
            justified_epoch: 0,
            previous_justified_epoch: 0,
        }
    }

    /// The randao mix recorded `latest_randao_mixes_length` slots deep in `epoch`'s history,
    /// used by the randao-reveal check.
    pub fn randao_mix(&self, epoch: Epoch) -> Result<H256, Error> {
        let len = self.latest_randao_mixes.len() as u64;
        if len == 0 {
            return Err(Error::SlotOutOfRange);
        }
        let index = epoch % len;
        self.latest_randao_mixes
            .get(index as usize)
            .copied()
            .ok_or(Error::IndexOutOfRange)
    }

    pub fn validator(&self, index: u64) -> Result<&Validator, Error> {
        self.validator_registry
            .get(index as usize)
            .ok_or(Error::IndexOutOfRange)
    }

    pub fn validator_mut(&mut self, index: u64) -> Result<&mut Validator, Error> {
        self.validator_registry
            .get_mut(index as usize)
            .ok_or(Error::IndexOutOfRange)
    }

    pub fn crosslink(&self, shard: u64) -> Result<&Crosslink, Error> {
        self.latest_crosslinks
            .get(shard as usize)
            .ok_or(Error::IndexOutOfRange)
    }
}
