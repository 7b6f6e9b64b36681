use helper_functions::beacon_state_accessors::ProposerSelector;
use helper_functions::crypto::Crypto;
use types::config::Config;

/// Everything a single `process_block` call needs beyond the state and block themselves:
/// the loaded constants, the cryptographic backend, the (shuffling-dependent, hence injected)
/// proposer selector, and the explicit signature-verification flag, passed as an explicit
/// parameter rather than a global.
pub struct BlockProcessingContext<'a, X, P> {
    pub config: &'a Config,
    pub crypto: &'a X,
    pub proposer_selector: &'a P,
    pub verify_signatures: bool,
}

impl<'a, X: Crypto, P: ProposerSelector> BlockProcessingContext<'a, X, P> {
    pub fn new(config: &'a Config, crypto: &'a X, proposer_selector: &'a P, verify_signatures: bool) -> Self {
        Self { config, crypto, proposer_selector, verify_signatures }
    }
}
