use std::path::{Path, PathBuf};

use secrecy::SecretString;

use crate::core::models::certificate_record::{EntryListing, SkippedEntry};
use crate::core::models::store_entry::{StoreEntry, StoreFormat};

/// In-memory state of one opened keystore.
///
/// Entries keep the order they were decoded in; replacing an alias keeps
/// its slot, new aliases go to the end.
pub struct KeystoreHandle {
    path: PathBuf,
    format: StoreFormat,
    credential: SecretString,
    entries: Vec<(String, StoreEntry)>,
}

impl KeystoreHandle {
    pub fn new(
        path: PathBuf,
        format: StoreFormat,
        credential: SecretString,
        decoded: Vec<(String, StoreEntry)>,
    ) -> Self {
        let mut handle = Self {
            path,
            format,
            credential,
            entries: Vec::with_capacity(decoded.len()),
        };
        for (alias, entry) in decoded {
            handle.insert(alias, entry);
        }
        handle
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> StoreFormat {
        self.format
    }

    pub fn credential(&self) -> &SecretString {
        &self.credential
    }

    pub fn entries(&self) -> &[(String, StoreEntry)] {
        &self.entries
    }

    pub fn get(&self, alias: &str) -> Option<&StoreEntry> {
        self.entries
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, entry)| entry)
    }

    /// Insert or overwrite `alias`, returning the entry it replaced.
    pub fn insert(&mut self, alias: String, entry: StoreEntry) -> Option<StoreEntry> {
        match self.entries.iter_mut().find(|(a, _)| *a == alias) {
            Some((_, slot)) => Some(std::mem::replace(slot, entry)),
            None => {
                self.entries.push((alias, entry));
                None
            }
        }
    }

    pub fn remove(&mut self, alias: &str) -> Option<StoreEntry> {
        let index = self.entries.iter().position(|(a, _)| a == alias)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn certificate_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, e)| e.as_certificate().is_some())
            .count()
    }

    /// Split the entries into display records and skipped key entries.
    pub fn listing(&self) -> EntryListing {
        let mut listing = EntryListing::default();
        for (alias, entry) in &self.entries {
            match entry.as_certificate() {
                Some(cert) => listing.records.push(cert.record.clone()),
                None => listing.skipped.push(SkippedEntry {
                    alias: alias.clone(),
                    kind: entry.kind(),
                }),
            }
        }
        listing
    }
}
