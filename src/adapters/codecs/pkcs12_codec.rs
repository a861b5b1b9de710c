use p12_keystore::error::Error as P12Error;
use p12_keystore::{Certificate, EncryptionAlgorithm, KeyStore, KeyStoreEntry, MacAlgorithm};

use crate::core::models::options::{ManagerOptions, Pkcs12Encryption, Pkcs12Mac};
use crate::core::models::store_entry::{KeyMaterial, StoreEntry, StoreFormat};
use crate::core::traits::store_codec::{CodecError, StoreCodec};

/// PKCS#12 keystores, backed by the `p12-keystore` crate.
///
/// Certificate bags become trusted certificate entries; private key chains
/// and secret bags are carried through as-is.
pub struct Pkcs12Codec {
    encryption: Pkcs12Encryption,
    mac: Pkcs12Mac,
}

impl Pkcs12Codec {
    pub fn new(options: &ManagerOptions) -> Self {
        Self {
            encryption: options.pkcs12_encryption,
            mac: options.pkcs12_mac,
        }
    }

    fn encryption_algorithm(&self) -> EncryptionAlgorithm {
        match self.encryption {
            Pkcs12Encryption::Aes256 => EncryptionAlgorithm::PbeWithHmacSha256AndAes256,
            Pkcs12Encryption::TripleDes => EncryptionAlgorithm::PbeWithShaAnd3KeyTripleDesCbc,
        }
    }

    fn mac_algorithm(&self) -> MacAlgorithm {
        match self.mac {
            Pkcs12Mac::Sha256 => MacAlgorithm::HmacSha256,
            Pkcs12Mac::Sha1 => MacAlgorithm::HmacSha1,
        }
    }
}

impl StoreCodec for Pkcs12Codec {
    fn format(&self) -> StoreFormat {
        StoreFormat::Pkcs12
    }

    /// `PFX ::= SEQUENCE { version INTEGER (3), ... }`
    fn recognizes(&self, bytes: &[u8]) -> bool {
        let Some((&0x30, rest)) = bytes.split_first() else {
            return false;
        };
        skip_der_length(rest).is_some_and(|content| content.starts_with(&[0x02, 0x01, 0x03]))
    }

    fn decode(
        &self,
        bytes: &[u8],
        password: &str,
    ) -> Result<Vec<(String, StoreEntry)>, CodecError> {
        let store = KeyStore::from_pkcs12(bytes, password)
            .map_err(|e| classify(e, pfx_field_count(bytes) == Some(2)))?;

        let mut entries = Vec::new();
        for (alias, entry) in store.entries() {
            let entry = match entry {
                KeyStoreEntry::Certificate(cert) => {
                    super::certificate_entry(alias, cert.as_der(), None)?
                }
                other => StoreEntry::Key(KeyMaterial::Pkcs12(other.clone())),
            };
            entries.push((alias.to_string(), entry));
        }
        Ok(entries)
    }

    fn encode(
        &self,
        entries: &[(String, StoreEntry)],
        password: &str,
    ) -> Result<Vec<u8>, CodecError> {
        let mut store = KeyStore::new();
        for (alias, entry) in entries {
            let p12_entry = match entry {
                StoreEntry::Certificate(cert) => {
                    let cert = Certificate::from_der(&cert.der).map_err(|e| {
                        CodecError::Malformed(format!("certificate '{alias}': {e}"))
                    })?;
                    KeyStoreEntry::Certificate(cert)
                }
                StoreEntry::Key(KeyMaterial::Pkcs12(entry)) => entry.clone(),
                StoreEntry::Key(KeyMaterial::Jks(_)) => {
                    return Err(CodecError::Malformed(format!(
                        "entry '{alias}' holds a JKS-protected key and cannot be written as PKCS#12"
                    )));
                }
            };
            store.add_entry(alias, p12_entry);
        }

        store
            .writer(password)
            .encryption_algorithm(self.encryption_algorithm())
            .mac_algorithm(self.mac_algorithm())
            .write()
            .map_err(|e| CodecError::Malformed(e.to_string()))
    }
}

/// Step over a DER length field, returning the content that follows.
fn skip_der_length(bytes: &[u8]) -> Option<&[u8]> {
    let (&first, rest) = bytes.split_first()?;
    match first {
        0x00..=0x7F => Some(rest),
        // indefinite length (BER), as written by some older tools
        0x80 => Some(rest),
        0x81..=0x84 => rest.get(usize::from(first & 0x7F)..),
        _ => None,
    }
}

/// Number of top-level fields in a definite-length PFX: three when it
/// carries `macData`, two when it does not.
fn pfx_field_count(bytes: &[u8]) -> Option<usize> {
    let (0x30, mut rest, _) = read_tlv(bytes)? else {
        return None;
    };
    let mut count = 0;
    while !rest.is_empty() {
        let (_, _, tail) = read_tlv(rest)?;
        rest = tail;
        count += 1;
    }
    Some(count)
}

/// Split one definite-length DER element into `(tag, content, remainder)`.
fn read_tlv(bytes: &[u8]) -> Option<(u8, &[u8], &[u8])> {
    let (&tag, rest) = bytes.split_first()?;
    let (&first, rest) = rest.split_first()?;
    let (len, rest) = match first {
        0x00..=0x7F => (usize::from(first), rest),
        0x81..=0x84 => {
            let width = usize::from(first & 0x7F);
            let len = rest
                .get(..width)?
                .iter()
                .fold(0usize, |acc, &b| (acc << 8) | usize::from(b));
            (len, rest.get(width..)?)
        }
        _ => return None,
    };
    Some((tag, rest.get(..len)?, rest.get(len..)?))
}

/// Map a `p12-keystore` failure to a credential or corruption error.
///
/// A wrong password fails the MAC when there is one. Without a MAC it only
/// shows up once the bags are decrypted: as a padding or PKCS#5 failure, or
/// as garbage plaintext that does not parse.
fn classify(err: P12Error, unauthenticated: bool) -> CodecError {
    match err {
        P12Error::MacError(_) | P12Error::UnpadError | P12Error::Pkcs5Error(_) => {
            CodecError::IntegrityMismatch
        }
        P12Error::DerError(_) | P12Error::X509Error(_) | P12Error::InvalidData
            if unauthenticated =>
        {
            CodecError::IntegrityMismatch
        }
        other => CodecError::Malformed(other.to_string()),
    }
}
