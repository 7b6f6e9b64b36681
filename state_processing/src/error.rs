use thiserror::Error;
use types::primitives::H256;

/// Which of the seven pipeline stages (or the proposer signature gate) an error originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    ProposerSignature,
    Eth1Data,
    Randao,
    ProposerSlashing,
    AttesterSlashing,
    Attestation,
    Deposit,
    VoluntaryExit,
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OpKind::ProposerSignature => "proposer_signature",
            OpKind::Eth1Data => "eth1_data",
            OpKind::Randao => "randao",
            OpKind::ProposerSlashing => "proposer_slashing",
            OpKind::AttesterSlashing => "attester_slashing",
            OpKind::Attestation => "attestation",
            OpKind::Deposit => "deposit",
            OpKind::VoluntaryExit => "voluntary_exit",
        };
        f.write_str(name)
    }
}

/// Any variant aborts the whole block; the caller treats the pre-block state as authoritative
/// (no partial application, no retries).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{op_kind}: {n} entries exceeds the configured maximum of {max}")]
    LimitExceeded { op_kind: OpKind, n: usize, max: usize },

    #[error("{op_kind}: malformed operation ({reason})")]
    MalformedOperation { op_kind: OpKind, reason: &'static str },

    #[error("{op_kind}: consensus check failed ({reason})")]
    ConsensusCheckFailed { op_kind: OpKind, reason: &'static str },

    #[error("deposit {deposit_index}: Merkle branch does not verify against root {root:?}")]
    MerkleVerifyFailed { deposit_index: usize, root: H256 },

    #[error("{op_kind}: signature invalid ({reason})")]
    SignatureInvalid { op_kind: OpKind, reason: &'static str },

    #[error("helper {name} failed: {cause}")]
    HelperFailed { name: &'static str, cause: String },
}

impl Error {
    pub(crate) fn helper(name: &'static str, cause: impl std::fmt::Display) -> Self {
        Error::HelperFailed { name, cause: cause.to_string() }
    }
}
