use serde::{Deserialize, Serialize};

/// Runtime configuration for the per-block operations pipeline.
///
/// Modelled as plain runtime fields rather than compile-time type parameters: these limits are
/// configurable and must be loaded consistently with peers, which is a property of a value
/// loaded from a network config file, not of a type parameter. See DESIGN.md for the tradeoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub max_proposer_slashings: usize,
    pub max_attester_slashings: usize,
    pub max_attestations: usize,
    pub max_deposits: usize,
    pub max_exits: usize,
    pub max_indices_per_slashable_vote: usize,
    pub latest_randao_mixes_length: u64,
    pub min_attestation_inclusion_delay: u64,
    pub epoch_length: u64,
    pub deposit_contract_tree_depth: u64,
    pub shard_count: u64,
    /// Size of `BeaconState.block_roots`'s ring buffer, backing the `block_root` helper query.
    pub slots_per_historical_root: u64,
}

impl Config {
    /// Mainnet-scale limits for this phase-0 dialect.
    pub fn mainnet() -> Self {
        Self {
            max_proposer_slashings: 16,
            max_attester_slashings: 1,
            max_attestations: 128,
            max_deposits: 16,
            max_exits: 16,
            max_indices_per_slashable_vote: 4_096,
            latest_randao_mixes_length: 8_192,
            min_attestation_inclusion_delay: 4,
            epoch_length: 64,
            deposit_contract_tree_depth: 32,
            shard_count: 1_024,
            slots_per_historical_root: 8_192,
        }
    }

    /// Small limits for fast unit and property tests.
    pub fn minimal() -> Self {
        Self {
            max_proposer_slashings: 16,
            max_attester_slashings: 1,
            max_attestations: 128,
            max_deposits: 16,
            max_exits: 16,
            max_indices_per_slashable_vote: 4_096,
            latest_randao_mixes_length: 64,
            min_attestation_inclusion_delay: 2,
            epoch_length: 8,
            deposit_contract_tree_depth: 32,
            shard_count: 8,
            slots_per_historical_root: 64,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::mainnet()
    }
}
