//! hometutions: command-line front end for the Home Tutions profile directory.

mod cli;
mod commands;
mod logging;
mod state;

use anyhow::Result;
use clap::Parser;
use ht_core::config::AppConfig;

use cli::Cli;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(db) = cli.db {
        config.database_path = Some(db);
    }

    logging::init(&config.log_level);
    logging::install_panic_hook();

    let state = AppState::open(config)?;
    let output = commands::run(&state, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
