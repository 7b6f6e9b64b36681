//! Stage 1: ETH1 data vote tally. Never fails.

use helper_functions::crypto::Crypto;
use types::beacon_state::BeaconState;
use types::types::{Eth1Data, Eth1DataVote};

pub fn process_eth1_data<X: Crypto>(state: &mut BeaconState, eth1_data: &Eth1Data, crypto: &X) {
    let existing = state
        .eth1_data_votes
        .iter_mut()
        .find(|vote| crypto.canonical_eq(&vote.eth1_data, eth1_data));

    match existing {
        Some(vote) => vote.vote_count += 1,
        None => state.eth1_data_votes.push(Eth1DataVote {
            eth1_data: eth1_data.clone(),
            vote_count: 1,
        }),
    }
}
