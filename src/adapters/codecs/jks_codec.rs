use chrono::{DateTime, Utc};
use sha1::{Digest, Sha1};

use crate::core::models::store_entry::{
    ChainCertificate, JksKeyEntry, KeyMaterial, StoreEntry, StoreFormat,
};
use crate::core::traits::store_codec::{CodecError, StoreCodec};

const MAGIC: u32 = 0xFEED_FEED;
const JCEKS_MAGIC: u32 = 0xCECE_CECE;
const VERSION_1: u32 = 1;
const VERSION_2: u32 = 2;
const TAG_PRIVATE_KEY: u32 = 1;
const TAG_TRUSTED_CERT: u32 = 2;
const DIGEST_LEN: usize = 20;
/// Appended to the password before hashing, as the JDK does.
const DIGEST_SALT: &[u8] = b"Mighty Aphrodite";
const X509: &str = "X.509";
/// Magic, version and entry count.
const HEADER_LEN: usize = 12;

/// Reads and writes the JVM `JKS` keystore format.
///
/// Layout (big-endian):
/// ```text
/// u32 magic 0xFEEDFEED | u32 version | u32 count
/// count × entry:
///   u32 tag | utf alias | i64 created (ms)
///   tag 1: blob protected key | u32 n | n × ([utf type] blob cert)
///   tag 2: [utf type] blob cert
/// 20-byte SHA-1(password as UTF-16BE ‖ "Mighty Aphrodite" ‖ everything above)
/// ```
/// `utf` is a u16 length followed by Java modified UTF-8; `blob` is a u32
/// length followed by raw bytes. Certificate type strings exist only in
/// version 2. Private keys stay encrypted and are carried as opaque blobs.
pub struct JksCodec;

impl JksCodec {
    /// JCEKS shares the layout but adds secret-key entries we cannot carry.
    pub fn is_jceks(bytes: &[u8]) -> bool {
        leading_u32(bytes) == Some(JCEKS_MAGIC)
    }
}

impl StoreCodec for JksCodec {
    fn format(&self) -> StoreFormat {
        StoreFormat::Jks
    }

    fn recognizes(&self, bytes: &[u8]) -> bool {
        leading_u32(bytes) == Some(MAGIC)
    }

    fn decode(
        &self,
        bytes: &[u8],
        password: &str,
    ) -> Result<Vec<(String, StoreEntry)>, CodecError> {
        if bytes.len() < HEADER_LEN + DIGEST_LEN {
            return Err(CodecError::Malformed(format!(
                "file is {} bytes, shorter than an empty keystore",
                bytes.len()
            )));
        }

        let (body, stored_digest) = bytes.split_at(bytes.len() - DIGEST_LEN);
        if integrity_digest(password, body).as_slice() != stored_digest {
            return Err(CodecError::IntegrityMismatch);
        }

        let mut reader = Reader::new(body);
        if reader.u32()? != MAGIC {
            return Err(CodecError::Malformed("bad JKS magic".into()));
        }
        let version = reader.u32()?;
        if version != VERSION_1 && version != VERSION_2 {
            return Err(CodecError::Malformed(format!(
                "unsupported JKS version {version}"
            )));
        }

        let count = reader.u32()?;
        let mut entries = Vec::new();
        for index in 0..count {
            let tag = reader.u32()?;
            let alias = StoreFormat::Jks.normalize_alias(&reader.utf()?);
            let created_at = from_millis(reader.i64()?)?;

            let entry = match tag {
                TAG_PRIVATE_KEY => {
                    let protected_key = reader.blob()?.to_vec();
                    let chain_len = reader.u32()?;
                    let mut chain = Vec::new();
                    for _ in 0..chain_len {
                        let cert_type = reader.cert_type(version)?;
                        let der = reader.blob()?.to_vec();
                        chain.push(ChainCertificate { cert_type, der });
                    }
                    StoreEntry::Key(KeyMaterial::Jks(JksKeyEntry {
                        created_at,
                        protected_key,
                        chain,
                    }))
                }
                TAG_TRUSTED_CERT => {
                    let cert_type = reader.cert_type(version)?;
                    if cert_type != X509 {
                        return Err(CodecError::Malformed(format!(
                            "entry '{alias}' holds a {cert_type} certificate; only X.509 is supported"
                        )));
                    }
                    super::certificate_entry(&alias, reader.blob()?, Some(created_at))?
                }
                other => {
                    return Err(CodecError::Malformed(format!(
                        "entry {index} has unknown tag {other}"
                    )));
                }
            };
            entries.push((alias, entry));
        }

        if reader.remaining() != 0 {
            return Err(CodecError::Malformed(format!(
                "{} unexpected bytes after the last entry",
                reader.remaining()
            )));
        }

        Ok(entries)
    }

    fn encode(
        &self,
        entries: &[(String, StoreEntry)],
        password: &str,
    ) -> Result<Vec<u8>, CodecError> {
        let mut writer = Writer::default();
        writer.u32(MAGIC);
        writer.u32(VERSION_2);
        writer.u32(length_u32(entries.len(), "entry count")?);

        for (alias, entry) in entries {
            match entry {
                StoreEntry::Certificate(cert) => {
                    writer.u32(TAG_TRUSTED_CERT);
                    writer.utf(alias)?;
                    writer.i64(cert.created_at.unwrap_or_else(Utc::now).timestamp_millis());
                    writer.utf(X509)?;
                    writer.blob(&cert.der)?;
                }
                StoreEntry::Key(KeyMaterial::Jks(key)) => {
                    writer.u32(TAG_PRIVATE_KEY);
                    writer.utf(alias)?;
                    writer.i64(key.created_at.timestamp_millis());
                    writer.blob(&key.protected_key)?;
                    writer.u32(length_u32(key.chain.len(), "certificate chain")?);
                    for cert in &key.chain {
                        writer.utf(&cert.cert_type)?;
                        writer.blob(&cert.der)?;
                    }
                }
                StoreEntry::Key(KeyMaterial::Pkcs12(_)) => {
                    return Err(CodecError::Malformed(format!(
                        "entry '{alias}' holds PKCS#12 key material and cannot be written as JKS"
                    )));
                }
            }
        }

        let mut bytes = writer.into_inner();
        let digest = integrity_digest(password, &bytes);
        bytes.extend_from_slice(&digest);
        Ok(bytes)
    }
}

fn integrity_digest(password: &str, body: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha1::new();
    for unit in password.encode_utf16() {
        hasher.update(unit.to_be_bytes());
    }
    hasher.update(DIGEST_SALT);
    hasher.update(body);
    hasher.finalize().into()
}

fn leading_u32(bytes: &[u8]) -> Option<u32> {
    let head: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    Some(u32::from_be_bytes(head))
}

fn from_millis(millis: i64) -> Result<DateTime<Utc>, CodecError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| CodecError::Malformed(format!("creation date {millis} out of range")))
}

fn length_u32(len: usize, what: &str) -> Result<u32, CodecError> {
    u32::try_from(len).map_err(|_| CodecError::Malformed(format!("{what} too large: {len}")))
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        if len > self.remaining() {
            return Err(CodecError::Malformed(format!(
                "truncated at offset {}: needed {len} bytes, {} left",
                self.pos,
                self.remaining()
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_be_bytes(self.array()?))
    }

    fn u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    fn i64(&mut self) -> Result<i64, CodecError> {
        Ok(i64::from_be_bytes(self.array()?))
    }

    fn utf(&mut self) -> Result<String, CodecError> {
        let len = usize::from(self.u16()?);
        decode_modified_utf8(self.take(len)?)
    }

    fn blob(&mut self) -> Result<&'a [u8], CodecError> {
        let len = self.u32()? as usize;
        self.take(len)
    }

    fn cert_type(&mut self, version: u32) -> Result<String, CodecError> {
        if version == VERSION_2 {
            self.utf()
        } else {
            Ok(X509.to_string())
        }
    }
}

#[derive(Default)]
struct Writer {
    bytes: Vec<u8>,
}

impl Writer {
    fn u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    fn i64(&mut self, value: i64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    fn utf(&mut self, value: &str) -> Result<(), CodecError> {
        let encoded = encode_modified_utf8(value);
        let len = u16::try_from(encoded.len()).map_err(|_| {
            CodecError::Malformed(format!("string longer than 65535 bytes: '{value}'"))
        })?;
        self.bytes.extend_from_slice(&len.to_be_bytes());
        self.bytes.extend_from_slice(&encoded);
        Ok(())
    }

    fn blob(&mut self, value: &[u8]) -> Result<(), CodecError> {
        self.u32(length_u32(value.len(), "blob")?);
        self.bytes.extend_from_slice(value);
        Ok(())
    }

    fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

/// Java `DataOutput.writeUTF` encoding: UTF-16 units, NUL as two bytes.
fn encode_modified_utf8(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for unit in value.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                out.push(0xC0 | (unit >> 6) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xE0 | (unit >> 12) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    out
}

fn decode_modified_utf8(bytes: &[u8]) -> Result<String, CodecError> {
    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let lead = bytes[i];
        let (unit, width) = match lead {
            0x00..=0x7F => (u16::from(lead), 1),
            0xC0..=0xDF => {
                let low = continuation(bytes, i + 1)?;
                ((u16::from(lead & 0x1F) << 6) | low, 2)
            }
            0xE0..=0xEF => {
                let mid = continuation(bytes, i + 1)?;
                let low = continuation(bytes, i + 2)?;
                ((u16::from(lead & 0x0F) << 12) | (mid << 6) | low, 3)
            }
            _ => return Err(invalid_utf()),
        };
        units.push(unit);
        i += width;
    }
    String::from_utf16(&units).map_err(|_| invalid_utf())
}

fn continuation(bytes: &[u8], index: usize) -> Result<u16, CodecError> {
    match bytes.get(index) {
        Some(&b) if b & 0xC0 == 0x80 => Ok(u16::from(b & 0x3F)),
        _ => Err(invalid_utf()),
    }
}

fn invalid_utf() -> CodecError {
    CodecError::Malformed("invalid modified UTF-8 string".into())
}
