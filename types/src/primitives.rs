pub use bls::{PublicKeyBytes, SignatureBytes};
pub use ethereum_types::H256;

pub type AggregateSignatureBytes = SignatureBytes;
pub type Epoch = u64;
pub type Gwei = u64;
pub type Shard = u64;
pub type Slot = u64;
pub type ValidatorIndex = u64;
pub type DomainType = u32;
pub type Domain = u64;

/// A fork-versioning identifier. Real consensus clients derive this from `BeaconState.fork`;
/// this crate only needs it as an opaque 4-byte tag to mix into `Domain` computation.
pub type Version = [u8; 4];
