mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::views::{self, ViewContent};
use cli::{Cli, Commands};
use keywiz::config::app_config::AppConfig;
use keywiz::core::errors::KeystoreError;
use keywiz::core::models::navigation::NavigationSignal;

fn main() {
    let args = Cli::parse();

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            cli::output::error(&format!("Error: {e}"));
            std::process::exit(1);
        }
    };

    init_logging(&config, args.verbose);

    let result = match &args.command {
        Commands::List { store, json } => cli::commands::list::execute(&config, store, *json),
        Commands::Show { store, alias } => cli::commands::show::execute(&config, store, alias),
        Commands::Add {
            store,
            alias,
            certificate,
            write,
        } => cli::commands::add::execute(&config, store, alias, certificate, write),
        Commands::Delete {
            store,
            alias,
            write,
        } => cli::commands::delete::execute(&config, store, alias, write),
        Commands::Export {
            store,
            destination,
            out_password,
        } => cli::commands::export::execute(&config, store, destination, out_password.as_deref()),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        if matches!(
            e,
            KeystoreError::InvalidCredential { .. }
                | KeystoreError::UnreadableSource { .. }
                | KeystoreError::CorruptData { .. }
        ) {
            views::render(NavigationSignal::keystore_load(), ViewContent::Prompt);
        }
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `--verbose`, then the configured level, then `warn`.
fn init_logging(config: &AppConfig, verbose: bool) {
    let fallback = if verbose {
        "debug"
    } else {
        config.logging.level.as_deref().unwrap_or("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
