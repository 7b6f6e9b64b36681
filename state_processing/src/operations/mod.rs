pub mod attestations;
pub mod attester_slashings;
pub mod deposits;
pub mod eth1_data;
pub mod exits;
pub mod proposer_slashings;
pub mod randao;
