use keywiz::config::app_config::AppConfig;
use keywiz::core::errors::Result;
use keywiz::core::models::navigation::NavigationSignal;

use crate::cli::views::{self, ViewContent};
use crate::cli::{StoreArgs, context, output};

/// Execute the `keywiz show` command.
pub fn execute(config: &AppConfig, store: &StoreArgs, alias: &str) -> Result<()> {
    let manager = context::open(config, store)?;

    match manager.entry_detail(alias)? {
        Some(detail) => views::render(NavigationSignal::from(&detail), ViewContent::Entry(&detail)),
        None => output::warning(&format!("No certificate entry named '{alias}'")),
    }
    Ok(())
}
