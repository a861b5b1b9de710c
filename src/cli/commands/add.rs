use std::path::Path;

use keywiz::config::app_config::AppConfig;
use keywiz::core::errors::Result;
use keywiz::core::models::navigation::NavigationSignal;
use keywiz::core::models::outcome::Change;

use crate::cli::views::{self, ViewContent};
use crate::cli::{StoreArgs, WriteArgs, context, output};

/// Execute the `keywiz add` command.
///
/// Reads the certificate file, stores it under `alias` (replacing any
/// existing entry) and writes the keystore back.
pub fn execute(
    config: &AppConfig,
    store: &StoreArgs,
    alias: &str,
    certificate: &Path,
    write: &WriteArgs,
) -> Result<()> {
    let bytes = std::fs::read(certificate)?;

    let mut manager = context::open(config, store)?;
    let outcome = manager.add_certificate(alias, &bytes)?;
    let written = context::write_back(&manager, store, write)?;

    match outcome.change {
        Change::Replaced => output::success(&format!("Replaced '{}'", outcome.alias)),
        _ => output::success(&format!("Added '{}'", outcome.alias)),
    }
    output::success(&format!("Saved {}", written.path.display()));
    views::render(NavigationSignal::from(&outcome), ViewContent::Listing(&outcome.listing));
    Ok(())
}
