use thiserror::Error;

/// Failures from the helper-query and registry-mutation layer. The per-block pipeline wraps
/// every variant into its own `HelperFailed{name, cause}` at the crate boundary rather than
/// matching on these further.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("slot is outside the retained history window")]
    SlotOutOfRange,
    #[error("index is out of range for the backing collection")]
    IndexOutOfRange,
    #[error("attestation aggregation/custody bitfield is malformed")]
    AttestationBitsInvalid,
    #[error("validator_indices exceeds the configured maximum per slashable vote")]
    MaxIndicesExceeded,
    #[error("validator_indices is not strictly ascending")]
    BadValidatorIndicesOrdering,
    #[error("validator has already initiated an exit")]
    ValidatorExitAlreadyInitiated,
}
