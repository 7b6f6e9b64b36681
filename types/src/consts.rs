use ethereum_types::H256;

use crate::primitives::{DomainType, Epoch, Slot};

pub const GENESIS_EPOCH: Epoch = 0;
pub const GENESIS_SLOT: Slot = 0;
pub const FAR_FUTURE_EPOCH: Epoch = u64::max_value();

/// The phase-0 empty-shard-block placeholder.
pub const ZERO_HASH: H256 = H256([0; 32]);

pub const DOMAIN_BEACON_PROPOSER: DomainType = 0;
pub const DOMAIN_RANDAO: DomainType = 1;
pub const DOMAIN_ATTESTATION: DomainType = 2;
pub const DOMAIN_DEPOSIT: DomainType = 3;
pub const DOMAIN_VOLUNTARY_EXIT: DomainType = 4;
