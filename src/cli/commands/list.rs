use keywiz::config::app_config::AppConfig;
use keywiz::core::errors::{KeystoreError, Result};
use keywiz::core::models::navigation::NavigationSignal;

use crate::cli::views::{self, ViewContent};
use crate::cli::{StoreArgs, context, output};

/// Execute the `keywiz list` command.
pub fn execute(config: &AppConfig, store: &StoreArgs, json: bool) -> Result<()> {
    let manager = context::open(config, store)?;
    let listing = manager.list_entries()?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&listing).map_err(|e| KeystoreError::EncodingFailure {
                reason: e.to_string(),
            })?;
        println!("{rendered}");
        return Ok(());
    }

    output::header(&format!(
        "{} ({}, {} certificate(s))",
        store.keystore.display(),
        manager.format()?,
        listing.records.len()
    ));
    views::render(NavigationSignal::keystore_details(), ViewContent::Listing(&listing));
    Ok(())
}
