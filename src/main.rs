//! plmigrate - Migrate a playlist and its media files into a self-contained directory

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod error;
mod migrate;
mod playlist;
mod utils;

use cli::{Cli, Commands};
use utils::ProgressAwareStderr;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "plmigrate=debug"
    } else {
        "plmigrate=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(ProgressAwareStderr),
        )
        .init();

    match cli.command {
        Commands::Migrate(args) => {
            cli::commands::migrate(args, cli.config.as_deref())?;
        }
        Commands::Completion { shell } => {
            cli::commands::completion(shell);
        }
    }

    Ok(())
}
