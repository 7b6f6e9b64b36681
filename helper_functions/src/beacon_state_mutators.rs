//! Validator registry mutations invoked by the pipeline; their internal policy lives entirely
//! here. This crate provides the minimal, concrete policy the pipeline needs to exercise
//! against — balance accounting and withdrawal-queue placement beyond what's written here
//! remain out of scope.

use std::collections::HashMap;

use log::debug;
use ssz::Encode;
use types::beacon_state::BeaconState;
use types::primitives::{Epoch, Gwei, PublicKeyBytes, SignatureBytes, ValidatorIndex, H256};
use types::types::Validator;

use crate::beacon_state_accessors::entry_exit_effect_epoch;
use crate::error::Error;

/// Keyed by a validator's SSZ-encoded pubkey, so `process_deposit` can look up an existing
/// registry entry without scanning. Precomputed once per block for amortized lookup across
/// all of a block's deposits.
pub type ValidatorIndexMap = HashMap<Vec<u8>, ValidatorIndex>;

pub fn build_validator_index_map(state: &BeaconState) -> ValidatorIndexMap {
    state
        .validator_registry
        .iter()
        .enumerate()
        .map(|(index, validator)| (validator.pubkey.as_ssz_bytes(), index as ValidatorIndex))
        .collect()
}

pub fn penalize_validator(
    state: &mut BeaconState,
    index: ValidatorIndex,
    current_epoch: Epoch,
) -> Result<(), Error> {
    let validator = state.validator_mut(index)?;
    validator.penalized_epoch = current_epoch;
    debug!("validator {} penalized at epoch {}", index, current_epoch);
    Ok(())
}

pub fn initiate_validator_exit(
    state: &mut BeaconState,
    index: ValidatorIndex,
    current_epoch: Epoch,
) -> Result<(), Error> {
    let effective_exit_epoch = entry_exit_effect_epoch(current_epoch);
    let validator = state.validator_mut(index)?;

    if validator.exit_epoch <= effective_exit_epoch {
        return Err(Error::ValidatorExitAlreadyInitiated);
    }

    validator.exit_epoch = effective_exit_epoch;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn process_deposit(
    state: &mut BeaconState,
    index_map: &mut ValidatorIndexMap,
    pubkey: PublicKeyBytes,
    value: Gwei,
    _proof_of_possession: SignatureBytes,
    withdrawal_credentials: H256,
) -> Result<(), Error> {
    let key = pubkey.as_ssz_bytes();

    if let Some(&index) = index_map.get(&key) {
        let validator = state.validator_mut(index)?;
        validator.effective_balance += value;
        debug!("validator {} topped up by {}", index, value);
        return Ok(());
    }

    let index = state.validator_registry.len() as ValidatorIndex;
    state.validator_registry.push(Validator {
        pubkey,
        withdrawal_credentials,
        effective_balance: value,
        ..Validator::default()
    });
    index_map.insert(key, index);
    debug!("validator {} registered with balance {}", index, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::config::Config;
    use types::consts::FAR_FUTURE_EPOCH;

    fn genesis_with_validators(n: usize) -> BeaconState {
        let mut state = BeaconState::genesis(&Config::minimal());
        state.validator_registry = (0..n).map(|_| Validator::default()).collect();
        state
    }

    #[test]
    fn penalize_validator_sets_penalized_epoch() {
        let mut state = genesis_with_validators(1);
        penalize_validator(&mut state, 0, 5).unwrap();
        assert_eq!(state.validator_registry[0].penalized_epoch, 5);
    }

    #[test]
    fn initiate_validator_exit_sets_exit_epoch_one_past_current() {
        let mut state = genesis_with_validators(1);
        initiate_validator_exit(&mut state, 0, 10).unwrap();
        assert_eq!(state.validator_registry[0].exit_epoch, 11);
    }

    #[test]
    fn initiate_validator_exit_rejects_an_already_scheduled_exit() {
        let mut state = genesis_with_validators(1);
        state.validator_registry[0].exit_epoch = 5;
        assert_eq!(
            initiate_validator_exit(&mut state, 0, 10).unwrap_err(),
            Error::ValidatorExitAlreadyInitiated
        );
    }

    #[test]
    fn process_deposit_registers_a_new_validator() {
        let mut state = BeaconState::genesis(&Config::minimal());
        let mut index_map = build_validator_index_map(&state);
        let pubkey = PublicKeyBytes::empty();

        process_deposit(
            &mut state,
            &mut index_map,
            pubkey.clone(),
            32_000_000_000,
            SignatureBytes::empty(),
            H256::zero(),
        )
        .unwrap();

        assert_eq!(state.validator_registry.len(), 1);
        assert_eq!(state.validator_registry[0].effective_balance, 32_000_000_000);
        assert_ne!(state.validator_registry[0].exit_epoch, FAR_FUTURE_EPOCH.wrapping_sub(1));
    }

    #[test]
    fn process_deposit_tops_up_an_existing_validator() {
        let mut state = genesis_with_validators(1);
        let pubkey = PublicKeyBytes::empty();
        state.validator_registry[0].pubkey = pubkey.clone();
        state.validator_registry[0].effective_balance = 32_000_000_000;
        let mut index_map = build_validator_index_map(&state);

        process_deposit(
            &mut state,
            &mut index_map,
            pubkey,
            1_000_000_000,
            SignatureBytes::empty(),
            H256::zero(),
        )
        .unwrap();

        assert_eq!(state.validator_registry.len(), 1);
        assert_eq!(state.validator_registry[0].effective_balance, 33_000_000_000);
    }
}
