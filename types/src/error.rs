use thiserror::Error;

/// Errors raised by [`crate::beacon_state::BeaconState`]'s own read helpers — out-of-range slot
/// or index lookups against the fixed-size history buffers. Mirrors the shape of the
/// `helper_functions` error enum one layer up, kept separate because these are structural
/// bounds checks on the state itself rather than consensus-rule violations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("slot is outside the retained history window")]
    SlotOutOfRange,
    #[error("index is out of range for the backing collection")]
    IndexOutOfRange,
}
