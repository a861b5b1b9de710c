use std::path::Path;

use keywiz::config::app_config::AppConfig;
use keywiz::core::errors::Result;

use crate::cli::{StoreArgs, context, output};

/// Execute the `keywiz export` command.
pub fn execute(
    config: &AppConfig,
    store: &StoreArgs,
    destination: &Path,
    out_password: Option<&str>,
) -> Result<()> {
    let manager = context::open(config, store)?;
    let password = out_password.unwrap_or(store.password.as_str());
    let outcome = manager.export_keystore(destination, password)?;

    output::success(&format!(
        "Exported {} entries to {} ({}, {} bytes)",
        outcome.entry_count,
        outcome.path.display(),
        outcome.format,
        outcome.bytes_written
    ));
    Ok(())
}
