use std::path::PathBuf;

use serde::Serialize;

use crate::core::models::certificate_record::EntryListing;
use crate::core::models::store_entry::StoreFormat;

/// A keystore was decoded and became the current handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    pub path: PathBuf,
    pub format: StoreFormat,
    pub certificate_count: usize,
    pub key_count: usize,
    /// True when a previously loaded keystore was discarded.
    pub replaced_previous: bool,
}

/// What a mutation did to the entry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    Added,
    Replaced,
    Removed,
    /// `delete_entry` on an alias that was not present.
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationOutcome {
    pub alias: String,
    pub change: Change,
    /// Listing after the mutation was applied.
    pub listing: EntryListing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub format: StoreFormat,
    pub entry_count: usize,
    pub bytes_written: usize,
}
