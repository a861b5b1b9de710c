use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use x509_parser::pem::parse_x509_pem;
use x509_parser::prelude::{ASN1Time, FromDer, X509Certificate};

use crate::core::errors::{KeystoreError, Result};
use crate::core::models::certificate_record::{CertificateRecord, EntryDetail};
use crate::core::models::store_entry::TrustedCertificate;

/// PEM labels accepted for certificate input.
const PEM_LABELS: &[&str] = &["CERTIFICATE", "X509 CERTIFICATE"];

/// Normalize certificate input to exactly the DER bytes of one certificate.
///
/// Accepts raw DER or PEM text; for PEM only the first block is read.
/// Bytes trailing the DER structure are dropped.
pub fn certificate_der(bytes: &[u8]) -> Result<Vec<u8>> {
    let trimmed = bytes.trim_ascii_start();
    if !trimmed.starts_with(b"-----BEGIN") {
        return exact_der(bytes);
    }

    let (_, pem) = parse_x509_pem(trimmed).map_err(|e| malformed(format!("invalid PEM: {e}")))?;
    if !PEM_LABELS.contains(&pem.label.as_str()) {
        return Err(malformed(format!(
            "PEM block is labelled '{}', expected CERTIFICATE",
            pem.label
        )));
    }
    exact_der(&pem.contents)
}

fn exact_der(bytes: &[u8]) -> Result<Vec<u8>> {
    let (rest, _) = X509Certificate::from_der(bytes).map_err(|e| malformed(e.to_string()))?;
    Ok(bytes[..bytes.len() - rest.len()].to_vec())
}

/// Build the display record for `alias` from DER certificate bytes.
pub fn to_record(alias: &str, der: &[u8]) -> Result<CertificateRecord> {
    let (_, cert) = X509Certificate::from_der(der).map_err(|e| malformed(e.to_string()))?;
    let validity = cert.validity();

    Ok(CertificateRecord {
        alias: alias.to_string(),
        issuer: cert.issuer().to_string(),
        subject: cert.subject().to_string(),
        not_before: instant(&validity.not_before)?,
        not_after: instant(&validity.not_after)?,
    })
}

/// Parse certificate input and wrap it as a trusted certificate entry.
pub fn trusted_certificate(
    alias: &str,
    bytes: &[u8],
    created_at: Option<DateTime<Utc>>,
) -> Result<TrustedCertificate> {
    let der = certificate_der(bytes)?;
    let record = to_record(alias, &der)?;
    Ok(TrustedCertificate {
        der,
        record,
        created_at,
    })
}

/// Extra fields shown on the entry detail view.
pub fn entry_detail(cert: &TrustedCertificate) -> Result<EntryDetail> {
    let (_, parsed) =
        X509Certificate::from_der(&cert.der).map_err(|e| malformed(e.to_string()))?;

    Ok(EntryDetail {
        record: cert.record.clone(),
        serial: parsed.raw_serial_as_string(),
        sha256_fingerprint: fingerprint(&cert.der),
        created_at: cert.created_at,
    })
}

/// Colon-separated upper-case SHA-256 of the DER encoding.
pub fn fingerprint(der: &[u8]) -> String {
    Sha256::digest(der)
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}

fn instant(time: &ASN1Time) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(time.timestamp(), 0)
        .ok_or_else(|| malformed(format!("validity bound out of range: {time}")))
}

fn malformed(reason: String) -> KeystoreError {
    KeystoreError::MalformedCertificate { reason }
}
