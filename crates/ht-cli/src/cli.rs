//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ht_core::profile::Role;
use ht_filter::{ALL_STREAMS, ALL_SUBJECTS};

#[derive(Parser, Debug)]
#[command(name = "hometutions", version)]
#[command(about = "Resolve and filter Home Tutions student and tutor profiles", long_about = None)]
pub struct Cli {
    /// JSON configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overriding the configuration.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a JSON object of `{ key: document }` into a role's collection.
    Import { role: Role, file: PathBuf },

    /// Resolve an identity to its profile card.
    Resolve {
        role: Role,
        identity_key: String,
        #[arg(long)]
        email: Option<String>,
    },

    /// List tutors matching a filter.
    Tutors {
        #[arg(long, default_value = ALL_STREAMS)]
        stream: String,
        #[arg(long, default_value = ALL_SUBJECTS)]
        subject: String,
        #[arg(long, default_value = "")]
        location: String,
    },

    /// Check a stored profile against the registration rules.
    Validate { role: Role, identity_key: String },
}
