//! Operation and registry types for the per-block pipeline: proposer slashings, attester
//! slashings, attestations, deposits, voluntary exits, and the containing block/body. This
//! models an early phase-0 dialect with a hash-chain randao reveal rather than a BLS-signature
//! randao reveal, and per-shard rather than committee-indexed attestations.

use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

use crate::primitives::{
    AggregateSignatureBytes, Epoch, Gwei, PublicKeyBytes, Shard, SignatureBytes, Slot,
    ValidatorIndex, Version, H256,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Fork {
    pub previous_version: Version,
    pub current_version: Version,
    pub epoch: Epoch,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Eth1Data {
    pub deposit_root: H256,
    pub deposit_count: u64,
    pub block_hash: H256,
}

/// One tally entry in `BeaconState.eth1_data_votes`: an observed `eth1_data` value paired with
/// how many proposers have voted for it so far.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Eth1DataVote {
    pub eth1_data: Eth1Data,
    pub vote_count: u64,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Validator {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: H256,
    pub activation_epoch: Epoch,
    pub exit_epoch: Epoch,
    pub penalized_epoch: Epoch,
    pub randao_commitment: H256,
    pub randao_layers: u64,
    pub effective_balance: Gwei,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            pubkey: PublicKeyBytes::empty(),
            withdrawal_credentials: H256::zero(),
            activation_epoch: 0,
            exit_epoch: crate::consts::FAR_FUTURE_EPOCH,
            penalized_epoch: crate::consts::FAR_FUTURE_EPOCH,
            randao_commitment: H256::zero(),
            randao_layers: 0,
            effective_balance: 0,
        }
    }
}

/// A shard checkpoint: the last accepted shard block root for one shard.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Crosslink {
    pub shard_block_root: H256,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct AttestationData {
    pub slot: Slot,
    pub shard: Shard,
    pub justified_epoch: Epoch,
    pub justified_block_root: H256,
    pub latest_crosslink_root: H256,
    pub shard_block_root: H256,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Attestation {
    pub data: AttestationData,
    pub aggregation_bitfield: Vec<u8>,
    pub custody_bitfield: Vec<u8>,
    pub aggregate_signature: AggregateSignatureBytes,
}

/// A slashable vote: same `data` as `Attestation`, but carrying the individual `validator_indices`
/// instead of a committee-relative `aggregation_bitfield`.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct SlashableAttestation {
    pub validator_indices: Vec<ValidatorIndex>,
    pub data: AttestationData,
    pub custody_bitfield: Vec<u8>,
    pub aggregate_signature: AggregateSignatureBytes,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct AttesterSlashing {
    pub slashable_attestation_1: SlashableAttestation,
    pub slashable_attestation_2: SlashableAttestation,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct ProposalSignedData {
    pub slot: Slot,
    pub shard: Shard,
    pub block_root: H256,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct ProposerSlashing {
    pub proposer_index: ValidatorIndex,
    pub proposal_data_1: ProposalSignedData,
    pub proposal_data_2: ProposalSignedData,
    pub proposal_signature_1: SignatureBytes,
    pub proposal_signature_2: SignatureBytes,
}

/// A pending attestation record, appended to `BeaconState.latest_attestations`.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct PendingAttestationRecord {
    pub data: AttestationData,
    pub aggregation_bitfield: Vec<u8>,
    pub custody_bitfield: Vec<u8>,
    pub slot_included: Slot,
}

/// The decoded contents of a deposit's `deposit_data` blob, after skipping the leading 16 bytes
/// (value and timestamp).
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct DepositInput {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: H256,
    pub proof_of_possession: SignatureBytes,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Deposit {
    pub merkle_branch: Vec<H256>,
    pub merkle_tree_index: u64,
    /// Raw wire blob: `[0..8)` value, `[8..16)` timestamp, `[16..)` a serialized `DepositInput`.
    pub deposit_data: Vec<u8>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct VoluntaryExit {
    pub epoch: Epoch,
    pub validator_index: ValidatorIndex,
    pub signature: SignatureBytes,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct BeaconBlockBody {
    pub proposer_slashings: Vec<ProposerSlashing>,
    pub attester_slashings: Vec<AttesterSlashing>,
    pub attestations: Vec<Attestation>,
    pub deposits: Vec<Deposit>,
    pub exits: Vec<VoluntaryExit>,
    pub eth1_data: Eth1Data,
    /// The preimage revealed for this slot, or its hash-chain ancestor layers deep.
    pub randao_reveal: H256,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct BeaconBlock {
    pub slot: Slot,
    pub parent_root: H256,
    pub state_root: H256,
    pub body: BeaconBlockBody,
    pub signature: SignatureBytes,
}
