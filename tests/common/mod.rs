#![allow(dead_code)]

use std::path::Path;

use chrono::{DateTime, Utc};
use rcgen::{Certificate, CertificateParams, DistinguishedName, DnType, date_time_ymd};

use p12_keystore::{Certificate as P12Certificate, KeyStoreEntry, PrivateKeyChain};

use keywiz::adapters::codecs::jks_codec::JksCodec;
use keywiz::adapters::codecs::pkcs12_codec::Pkcs12Codec;
use keywiz::core::models::options::ManagerOptions;
use keywiz::core::models::store_entry::{ChainCertificate, JksKeyEntry, KeyMaterial, StoreEntry};
use keywiz::core::services::certificate_converter;
use keywiz::core::traits::store_codec::StoreCodec;

pub const PASSWORD: &str = "changeit";

fn params(cn: &str) -> CertificateParams {
    let mut params = CertificateParams::new(Vec::<String>::new());
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, cn);
    params.distinguished_name = dn;
    params.not_before = date_time_ymd(2024, 1, 1);
    params.not_after = date_time_ymd(2025, 1, 1);
    params
}

/// Self-signed certificate valid 2024-01-01..2025-01-01.
pub fn self_signed(cn: &str) -> Vec<u8> {
    Certificate::from_params(params(cn))
        .unwrap()
        .serialize_der()
        .unwrap()
}

/// `CN=<cn>` issued by `CN=CA`, valid 2024-01-01..2025-01-01.
pub fn issued_by_ca(cn: &str) -> Vec<u8> {
    let ca = Certificate::from_params(params("CA")).unwrap();
    Certificate::from_params(params(cn))
        .unwrap()
        .serialize_der_with_signer(&ca)
        .unwrap()
}

/// Same as [`issued_by_ca`], PEM encoded.
pub fn issued_by_ca_pem(cn: &str) -> String {
    let ca = Certificate::from_params(params("CA")).unwrap();
    Certificate::from_params(params(cn))
        .unwrap()
        .serialize_pem_with_signer(&ca)
        .unwrap()
}

pub fn trusted(alias: &str, der: &[u8]) -> (String, StoreEntry) {
    let cert = certificate_converter::trusted_certificate(alias, der, None).unwrap();
    (alias.to_string(), StoreEntry::Certificate(cert))
}

/// JKS private key entry with an opaque key blob.
pub fn jks_key(alias: &str) -> (String, StoreEntry) {
    let created_at: DateTime<Utc> = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
    let entry = JksKeyEntry {
        created_at,
        protected_key: vec![0x30, 0x82, 0x00, 0x04, 0xDE, 0xAD, 0xBE, 0xEF],
        chain: vec![ChainCertificate {
            cert_type: "X.509".into(),
            der: self_signed("signer"),
        }],
    };
    (alias.to_string(), StoreEntry::Key(KeyMaterial::Jks(entry)))
}

/// PKCS#12 private key entry: an rcgen key pair with its self-signed leaf.
pub fn p12_key(alias: &str, cn: &str) -> (String, StoreEntry) {
    let cert = Certificate::from_params(params(cn)).unwrap();
    let leaf = P12Certificate::from_der(&cert.serialize_der().unwrap()).unwrap();
    let chain = PrivateKeyChain::new(cert.serialize_private_key_der(), alias.as_bytes(), [leaf]);
    (
        alias.to_string(),
        StoreEntry::Key(KeyMaterial::Pkcs12(KeyStoreEntry::PrivateKeyChain(chain))),
    )
}

pub fn write_jks(path: &Path, entries: &[(String, StoreEntry)], password: &str) {
    std::fs::write(path, JksCodec.encode(entries, password).unwrap()).unwrap();
}

pub fn write_p12(path: &Path, entries: &[(String, StoreEntry)], password: &str) {
    let codec = Pkcs12Codec::new(&ManagerOptions::default());
    std::fs::write(path, codec.encode(entries, password).unwrap()).unwrap();
}
