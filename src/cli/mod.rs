pub mod commands;
pub mod context;
pub mod output;
pub mod views;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Open, inspect, edit and re-export Java keystores.
#[derive(Parser, Debug)]
#[command(name = "keywiz", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to alternative config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the certificate entries of a keystore
    List {
        #[command(flatten)]
        store: StoreArgs,
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one certificate entry in full
    Show {
        #[command(flatten)]
        store: StoreArgs,
        /// Alias of the entry
        alias: String,
    },

    /// Add or replace a trusted certificate (DER or PEM)
    Add {
        #[command(flatten)]
        store: StoreArgs,
        /// Alias to store the certificate under
        alias: String,
        /// Certificate file
        certificate: PathBuf,
        #[command(flatten)]
        write: WriteArgs,
    },

    /// Delete an entry
    Delete {
        #[command(flatten)]
        store: StoreArgs,
        /// Alias of the entry
        alias: String,
        #[command(flatten)]
        write: WriteArgs,
    },

    /// Write the keystore to a new file
    Export {
        #[command(flatten)]
        store: StoreArgs,
        /// Destination file
        destination: PathBuf,
        /// Password for the exported file (default: the keystore password)
        #[arg(long)]
        out_password: Option<String>,
    },
}

/// Which keystore to open, and how.
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// JKS or PKCS#12 keystore file
    pub keystore: PathBuf,

    /// Keystore password
    #[arg(long, env = "KEYWIZ_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Where a mutated keystore is written.
#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Write to this file instead of updating the keystore in place
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Password for the written file (default: the keystore password)
    #[arg(long)]
    pub out_password: Option<String>,
}
