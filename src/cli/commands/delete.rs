use keywiz::config::app_config::AppConfig;
use keywiz::core::errors::Result;
use keywiz::core::models::navigation::NavigationSignal;
use keywiz::core::models::outcome::Change;

use crate::cli::views::{self, ViewContent};
use crate::cli::{StoreArgs, WriteArgs, context, output};

/// Execute the `keywiz delete` command.
///
/// Deleting an alias that does not exist only warns and writes nothing.
pub fn execute(config: &AppConfig, store: &StoreArgs, alias: &str, write: &WriteArgs) -> Result<()> {
    let mut manager = context::open(config, store)?;
    let outcome = manager.delete_entry(alias)?;

    if outcome.change == Change::Absent {
        output::warning(&format!("No entry named '{}'; nothing to delete", outcome.alias));
        return Ok(());
    }

    let written = context::write_back(&manager, store, write)?;
    output::success(&format!("Deleted '{}'", outcome.alias));
    output::success(&format!("Saved {}", written.path.display()));
    views::render(NavigationSignal::from(&outcome), ViewContent::Listing(&outcome.listing));
    Ok(())
}
