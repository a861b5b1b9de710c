use std::path::Path;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::adapters::codecs;
use crate::adapters::storage::atomic_file;
use crate::core::errors::{KeystoreError, Result};
use crate::core::models::certificate_record::{CertificateRecord, EntryDetail, EntryListing};
use crate::core::models::keystore_handle::KeystoreHandle;
use crate::core::models::options::ManagerOptions;
use crate::core::models::outcome::{Change, ExportOutcome, LoadOutcome, MutationOutcome};
use crate::core::models::store_entry::{StoreEntry, StoreFormat};
use crate::core::services::certificate_converter;
use crate::core::traits::store_codec::{CodecError, StoreCodec};

/// Sole owner of the currently loaded keystore.
///
/// Starts out unloaded. A successful [`load`](Self::load) installs a new
/// handle and discards the old one; a failed load leaves the previous state
/// exactly as it was. Every other operation needs a loaded handle and fails
/// with [`KeystoreError::NotLoaded`] otherwise.
///
/// Mutating operations take `&mut self`, so one manager cannot be mutated
/// from two places at once. Use one manager per open keystore.
pub struct KeystoreManager {
    codecs: Vec<Box<dyn StoreCodec>>,
    current: Option<KeystoreHandle>,
}

impl Default for KeystoreManager {
    fn default() -> Self {
        Self::new(&ManagerOptions::default())
    }
}

impl KeystoreManager {
    /// Manager with the built-in JKS and PKCS#12 codecs.
    pub fn new(options: &ManagerOptions) -> Self {
        Self::with_codecs(codecs::default_codecs(options))
    }

    pub fn with_codecs(codecs: Vec<Box<dyn StoreCodec>>) -> Self {
        Self {
            codecs,
            current: None,
        }
    }

    /// Open `path` and make it the current keystore.
    pub fn load(&mut self, path: impl AsRef<Path>, password: &str) -> Result<LoadOutcome> {
        let path = path.as_ref();
        let bytes = atomic_file::read_source(path)?;

        let codec = self
            .codecs
            .iter()
            .find(|c| c.recognizes(&bytes))
            .ok_or_else(|| KeystoreError::UnreadableSource {
                path: path.to_path_buf(),
                reason: codecs::describe_unrecognized(&bytes),
            })?;

        let decoded = codec.decode(&bytes, password).map_err(|e| match e {
            CodecError::IntegrityMismatch => KeystoreError::InvalidCredential {
                path: path.to_path_buf(),
            },
            CodecError::Malformed(detail) => KeystoreError::CorruptData {
                path: path.to_path_buf(),
                detail,
            },
        })?;

        let handle = KeystoreHandle::new(
            path.to_path_buf(),
            codec.format(),
            SecretString::from(password.to_string()),
            decoded,
        );
        let certificate_count = handle.certificate_count();
        let outcome = LoadOutcome {
            path: path.to_path_buf(),
            format: handle.format(),
            certificate_count,
            key_count: handle.len() - certificate_count,
            replaced_previous: self.current.is_some(),
        };

        info!(
            path = %path.display(),
            format = %outcome.format,
            certificates = outcome.certificate_count,
            keys = outcome.key_count,
            "keystore loaded"
        );
        self.current = Some(handle);
        Ok(outcome)
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Path the current keystore was loaded from.
    pub fn current_path(&self) -> Result<&Path> {
        Ok(self.handle()?.path())
    }

    pub fn format(&self) -> Result<StoreFormat> {
        Ok(self.handle()?.format())
    }

    /// Certificate entries in the store's order, with key entries reported
    /// in `skipped` rather than converted.
    pub fn list_entries(&self) -> Result<EntryListing> {
        let listing = self.handle()?.listing();
        for skipped in &listing.skipped {
            warn!(
                alias = %skipped.alias,
                kind = %skipped.kind,
                "entry is not a certificate entry; excluded from listing"
            );
        }
        Ok(listing)
    }

    /// Record for one certificate entry, `None` if absent or a key entry.
    pub fn find_entry(&self, alias: &str) -> Result<Option<CertificateRecord>> {
        let handle = self.handle()?;
        let alias = handle.format().normalize_alias(alias);
        Ok(handle
            .get(&alias)
            .and_then(StoreEntry::as_certificate)
            .map(|cert| cert.record.clone()))
    }

    /// Full detail for one certificate entry.
    pub fn entry_detail(&self, alias: &str) -> Result<Option<EntryDetail>> {
        let handle = self.handle()?;
        let alias = handle.format().normalize_alias(alias);
        handle
            .get(&alias)
            .and_then(StoreEntry::as_certificate)
            .map(certificate_converter::entry_detail)
            .transpose()
    }

    /// Store a certificate under `alias`, replacing whatever was there.
    pub fn add_certificate(&mut self, alias: &str, certificate_bytes: &[u8]) -> Result<MutationOutcome> {
        let handle = self.handle_mut()?;
        if alias.trim().is_empty() {
            return Err(KeystoreError::InvalidAlias {
                alias: alias.to_string(),
            });
        }
        let alias = handle.format().normalize_alias(alias);

        let cert = certificate_converter::trusted_certificate(&alias, certificate_bytes, Some(Utc::now()))?;
        let change = match handle.insert(alias.clone(), StoreEntry::Certificate(cert)) {
            Some(_) => Change::Replaced,
            None => Change::Added,
        };

        debug!(alias = %alias, ?change, "certificate stored");
        Ok(MutationOutcome {
            alias,
            change,
            listing: handle.listing(),
        })
    }

    /// Remove `alias`. A missing alias is not an error: the outcome reports
    /// [`Change::Absent`] and the store is untouched.
    pub fn delete_entry(&mut self, alias: &str) -> Result<MutationOutcome> {
        let handle = self.handle_mut()?;
        let alias = handle.format().normalize_alias(alias);

        let change = match handle.remove(&alias) {
            Some(_) => Change::Removed,
            None => Change::Absent,
        };

        debug!(alias = %alias, ?change, "delete requested");
        Ok(MutationOutcome {
            alias,
            change,
            listing: handle.listing(),
        })
    }

    /// Serialize every entry in the store's own format under `password` and
    /// write it to `path` atomically.
    pub fn export_keystore(&self, path: impl AsRef<Path>, password: &str) -> Result<ExportOutcome> {
        let handle = self.handle()?;
        self.write_handle(handle, path.as_ref(), password)
    }

    /// Write the current keystore back to where it was loaded from, under
    /// the password it was loaded with.
    pub fn save(&self) -> Result<ExportOutcome> {
        let handle = self.handle()?;
        self.write_handle(handle, handle.path(), handle.credential().expose_secret())
    }

    /// Drop the current keystore. Returns whether one was loaded.
    pub fn reset(&mut self) -> bool {
        let was_loaded = self.current.take().is_some();
        if was_loaded {
            debug!("keystore handle released");
        }
        was_loaded
    }

    fn write_handle(&self, handle: &KeystoreHandle, path: &Path, password: &str) -> Result<ExportOutcome> {
        let format = handle.format();
        let codec = self
            .codecs
            .iter()
            .find(|c| c.format() == format)
            .ok_or_else(|| KeystoreError::EncodingFailure {
                reason: format!("no codec registered for {format}"),
            })?;

        if handle.is_empty() {
            warn!(path = %path.display(), "exporting a keystore with no entries");
        }
        let bytes = codec
            .encode(handle.entries(), password)
            .map_err(|e| KeystoreError::EncodingFailure {
                reason: e.to_string(),
            })?;
        atomic_file::write_atomically(path, &bytes)?;

        info!(
            path = %path.display(),
            format = %format,
            entries = handle.len(),
            bytes = bytes.len(),
            "keystore exported"
        );
        Ok(ExportOutcome {
            path: path.to_path_buf(),
            format,
            entry_count: handle.len(),
            bytes_written: bytes.len(),
        })
    }

    fn handle(&self) -> Result<&KeystoreHandle> {
        self.current.as_ref().ok_or(KeystoreError::NotLoaded)
    }

    fn handle_mut(&mut self) -> Result<&mut KeystoreHandle> {
        self.current.as_mut().ok_or(KeystoreError::NotLoaded)
    }
}
