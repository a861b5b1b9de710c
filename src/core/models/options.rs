use serde::Deserialize;

/// Cipher used for PKCS#12 bag encryption on export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Pkcs12Encryption {
    /// PBES2 with HMAC-SHA256 and AES-256-CBC.
    #[default]
    #[serde(rename = "aes256")]
    Aes256,
    /// Legacy PBE with SHA-1 and 3-key triple DES, for old JVMs.
    #[serde(rename = "3des")]
    TripleDes,
}

/// Integrity MAC written into exported PKCS#12 files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pkcs12Mac {
    #[default]
    Sha256,
    Sha1,
}

/// Tunables handed to the codecs when a manager is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManagerOptions {
    pub pkcs12_encryption: Pkcs12Encryption,
    pub pkcs12_mac: Pkcs12Mac,
}
