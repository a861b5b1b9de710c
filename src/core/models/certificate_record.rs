use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::models::store_entry::EntryKind;

/// Display-ready view of one certificate entry.
///
/// Built from the certificate's issuer/subject distinguished names and its
/// validity window; immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateRecord {
    pub alias: String,
    pub issuer: String,
    pub subject: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

impl CertificateRecord {
    /// The single format used to render validity bounds.
    pub const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%SZ";

    /// Start of the validity window, rendered for display.
    pub fn valid_from(&self) -> String {
        self.not_before.format(Self::TIMESTAMP_FORMAT).to_string()
    }

    /// End of the validity window, rendered for display.
    pub fn valid_until(&self) -> String {
        self.not_after.format(Self::TIMESTAMP_FORMAT).to_string()
    }

    /// Whether `at` falls inside the validity window (bounds inclusive).
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        self.not_before <= at && at <= self.not_after
    }
}

/// An entry left out of a listing because it is not a plain certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub alias: String,
    pub kind: EntryKind,
}

/// Result of enumerating a keystore, in the store's own order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryListing {
    pub records: Vec<CertificateRecord>,
    pub skipped: Vec<SkippedEntry>,
}

impl EntryListing {
    pub fn aliases(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.alias.as_str()).collect()
    }

    pub fn get(&self, alias: &str) -> Option<&CertificateRecord> {
        self.records.iter().find(|r| r.alias == alias)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.skipped.is_empty()
    }
}

/// Extended view of a single certificate entry for the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryDetail {
    pub record: CertificateRecord,
    pub serial: String,
    pub sha256_fingerprint: String,
    pub created_at: Option<DateTime<Utc>>,
}
