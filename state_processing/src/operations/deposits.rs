//! Stage 6: validator deposits.

use ssz::Decode;

use helper_functions::beacon_state_accessors::ProposerSelector;
use helper_functions::beacon_state_mutators::{build_validator_index_map, process_deposit};
use helper_functions::crypto::Crypto;
use helper_functions::math::bytes_to_u64_be;
use log::trace;
use types::beacon_state::BeaconState;
use types::types::{Deposit, DepositInput};

use crate::context::BlockProcessingContext;
use crate::error::{Error, OpKind};

const OP: OpKind = OpKind::Deposit;

pub fn process_deposits<X: Crypto, P: ProposerSelector>(
    state: &mut BeaconState,
    deposits: &[Deposit],
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    if deposits.len() > ctx.config.max_deposits {
        return Err(Error::LimitExceeded {
            op_kind: OP,
            n: deposits.len(),
            max: ctx.config.max_deposits,
        });
    }
    trace!("processing {} deposit(s)", deposits.len());

    let mut index_map = build_validator_index_map(state);

    for (deposit_index, deposit) in deposits.iter().enumerate() {
        process_one(state, &mut index_map, deposit_index, deposit, ctx)?;
    }

    Ok(())
}

fn process_one<X: Crypto, P: ProposerSelector>(
    state: &mut BeaconState,
    index_map: &mut helper_functions::beacon_state_mutators::ValidatorIndexMap,
    deposit_index: usize,
    deposit: &Deposit,
    ctx: &BlockProcessingContext<X, P>,
) -> Result<(), Error> {
    if deposit.deposit_data.len() < 16 {
        return Err(Error::MalformedOperation {
            op_kind: OP,
            reason: "deposit_data is shorter than the 16-byte value/timestamp header",
        });
    }

    let input = DepositInput::from_ssz_bytes(&deposit.deposit_data[16..]).map_err(|_| Error::MalformedOperation {
        op_kind: OP,
        reason: "deposit_data tail does not decode as a DepositInput",
    })?;

    let leaf = ctx.crypto.hash(&deposit.deposit_data);
    let leaf = types::primitives::H256::from_slice(&leaf);
    let verified = ctx.crypto.verify_merkle_branch(
        leaf,
        &deposit.merkle_branch,
        ctx.config.deposit_contract_tree_depth,
        deposit.merkle_tree_index,
        state.latest_eth1_data.deposit_root,
    );
    if !verified {
        return Err(Error::MerkleVerifyFailed {
            deposit_index,
            root: state.latest_eth1_data.deposit_root,
        });
    }

    let value = bytes_to_u64_be(&deposit.deposit_data[0..8]).ok_or(Error::MalformedOperation {
        op_kind: OP,
        reason: "deposit value header is not a valid 8-byte big-endian integer",
    })?;

    process_deposit(
        state,
        index_map,
        input.pubkey,
        value,
        input.proof_of_possession,
        input.withdrawal_credentials,
    )
    .map_err(|cause| Error::helper("process_deposit", cause))
}
