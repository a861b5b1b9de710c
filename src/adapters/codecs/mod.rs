pub mod jks_codec;
pub mod pkcs12_codec;

use chrono::{DateTime, Utc};

use crate::core::errors::KeystoreError;
use crate::core::models::options::ManagerOptions;
use crate::core::models::store_entry::StoreEntry;
use crate::core::services::certificate_converter;
use crate::core::traits::store_codec::{CodecError, StoreCodec};

use jks_codec::JksCodec;
use pkcs12_codec::Pkcs12Codec;

/// Every codec keywiz ships, in detection order.
pub fn default_codecs(options: &ManagerOptions) -> Vec<Box<dyn StoreCodec>> {
    vec![Box::new(JksCodec), Box::new(Pkcs12Codec::new(options))]
}

/// Explain why no codec recognized `bytes`.
pub fn describe_unrecognized(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        "file is empty".into()
    } else if JksCodec::is_jceks(bytes) {
        "JCEKS keystores are not supported; convert with keytool -importkeystore".into()
    } else {
        "not a JKS or PKCS#12 keystore".into()
    }
}

/// Turn a certificate stored inside a container into an entry, reporting
/// parse failures as container corruption.
fn certificate_entry(
    alias: &str,
    der: &[u8],
    created_at: Option<DateTime<Utc>>,
) -> Result<StoreEntry, CodecError> {
    certificate_converter::trusted_certificate(alias, der, created_at)
        .map(StoreEntry::Certificate)
        .map_err(|e| match e {
            KeystoreError::MalformedCertificate { reason } => {
                CodecError::Malformed(format!("certificate '{alias}' cannot be parsed: {reason}"))
            }
            other => CodecError::Malformed(other.to_string()),
        })
}
