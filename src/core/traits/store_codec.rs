use crate::core::models::store_entry::{StoreEntry, StoreFormat};

/// Why a codec rejected its input.
///
/// The manager attaches the file path and turns these into `KeystoreError`s.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The password-keyed integrity check or decryption failed.
    #[error("integrity check failed")]
    IntegrityMismatch,

    /// The bytes are structurally wrong for this format.
    #[error("{0}")]
    Malformed(String),
}

/// Port for keystore container formats.
///
/// Implementations live in `adapters::codecs` (JKS, PKCS#12). The manager
/// only depends on this trait, never on a concrete format.
pub trait StoreCodec: Send + Sync {
    /// The format this codec reads and writes.
    fn format(&self) -> StoreFormat;

    /// Cheap check on the leading bytes, without a password.
    fn recognizes(&self, bytes: &[u8]) -> bool;

    /// Decode a whole container into entries, in the container's own order.
    fn decode(&self, bytes: &[u8], password: &str)
    -> Result<Vec<(String, StoreEntry)>, CodecError>;

    /// Encode `entries` into a container protected by `password`.
    fn encode(&self, entries: &[(String, StoreEntry)], password: &str)
    -> Result<Vec<u8>, CodecError>;
}
