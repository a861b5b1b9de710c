use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::models::certificate_record::CertificateRecord;

/// Binary container formats a keystore can be backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    /// The traditional JVM keystore (`JKS`).
    Jks,
    /// PKCS#12 / PFX.
    Pkcs12,
}

impl StoreFormat {
    /// Map an alias to the key the format actually stores it under.
    ///
    /// JKS aliases are case-insensitive and kept lower-cased; PKCS#12
    /// friendly names are compared verbatim.
    pub fn normalize_alias(self, alias: &str) -> String {
        match self {
            Self::Jks => alias.to_lowercase(),
            Self::Pkcs12 => alias.to_string(),
        }
    }
}

impl std::fmt::Display for StoreFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jks => write!(f, "JKS"),
            Self::Pkcs12 => write!(f, "PKCS12"),
        }
    }
}

/// One entry of a loaded keystore.
#[derive(Debug, Clone)]
pub enum StoreEntry {
    /// A public certificate with no private key attached.
    Certificate(TrustedCertificate),
    /// Key material, carried through untouched on export.
    Key(KeyMaterial),
}

impl StoreEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Certificate(_) => EntryKind::Certificate,
            Self::Key(KeyMaterial::Jks(_)) => EntryKind::PrivateKey,
            Self::Key(KeyMaterial::Pkcs12(p12_keystore::KeyStoreEntry::PrivateKeyChain(_))) => {
                EntryKind::PrivateKey
            }
            Self::Key(KeyMaterial::Pkcs12(_)) => EntryKind::Secret,
        }
    }

    pub fn as_certificate(&self) -> Option<&TrustedCertificate> {
        match self {
            Self::Certificate(cert) => Some(cert),
            Self::Key(_) => None,
        }
    }
}

/// Coarse classification of an entry, used when reporting skipped rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Certificate,
    PrivateKey,
    Secret,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Certificate => write!(f, "certificate"),
            Self::PrivateKey => write!(f, "private key"),
            Self::Secret => write!(f, "secret key"),
        }
    }
}

/// A trusted certificate entry together with its display record.
///
/// The record is rebuilt every time the entry is constructed, so it never
/// drifts from `der`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedCertificate {
    pub der: Vec<u8>,
    pub record: CertificateRecord,
    pub created_at: Option<DateTime<Utc>>,
}

/// Opaque key entries. keywiz never decrypts or inspects key material.
///
/// PKCS#12 certificate bags are always decoded into
/// [`StoreEntry::Certificate`], so `Pkcs12` only ever holds private key
/// chains and secrets.
#[derive(Clone)]
pub enum KeyMaterial {
    Jks(JksKeyEntry),
    Pkcs12(p12_keystore::KeyStoreEntry),
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jks(entry) => f
                .debug_struct("Jks")
                .field("created_at", &entry.created_at)
                .field("protected_key_len", &entry.protected_key.len())
                .field("chain_len", &entry.chain.len())
                .finish(),
            Self::Pkcs12(_) => f.write_str("Pkcs12(..)"),
        }
    }
}

/// A JKS private key entry: the password-protected key blob and its chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JksKeyEntry {
    pub created_at: DateTime<Utc>,
    pub protected_key: Vec<u8>,
    pub chain: Vec<ChainCertificate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainCertificate {
    pub cert_type: String,
    pub der: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jks_aliases_are_case_insensitive() {
        assert_eq!(StoreFormat::Jks.normalize_alias("MyServer"), "myserver");
        assert_eq!(StoreFormat::Pkcs12.normalize_alias("MyServer"), "MyServer");
    }

    #[test]
    fn jks_key_entry_classifies_as_private_key() {
        let entry = StoreEntry::Key(KeyMaterial::Jks(JksKeyEntry {
            created_at: Utc::now(),
            protected_key: vec![1, 2, 3],
            chain: Vec::new(),
        }));
        assert_eq!(entry.kind(), EntryKind::PrivateKey);
        assert!(entry.as_certificate().is_none());
    }

    #[test]
    fn key_material_debug_hides_bytes() {
        let material = KeyMaterial::Jks(JksKeyEntry {
            created_at: Utc::now(),
            protected_key: vec![0xAB; 4],
            chain: Vec::new(),
        });
        let rendered = format!("{material:?}");
        assert!(rendered.contains("protected_key_len: 4"));
        assert!(!rendered.contains("171"));
    }
}
