//! CLI module for plmigrate

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser, Debug)]
#[command(name = "plmigrate", about = "Migrate a playlist and its media files into one directory")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ~/.config/plmigrate/config.json)
    #[arg(long, global = true, env = "PLMIGRATE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy a playlist's media files and write a playlist pointing at the copies
    Migrate(MigrateArgs),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Source m3u / m3u8 playlist file
    #[arg(short, long, value_name = "FILE")]
    pub src: PathBuf,

    /// Destination directory, defaults to the source file name without extension
    #[arg(short, long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Destination playlist file name, defaults to the source file name
    #[arg(long, value_name = "NAME")]
    pub dest_playlist: Option<String>,

    /// Leave records whose copy failed out of the new playlist
    #[arg(long)]
    pub skip_failed: bool,

    /// Exit with an error if any file failed to copy
    #[arg(long)]
    pub strict: bool,

    /// Resolve relative track paths against the playlist's directory
    #[arg(long)]
    pub relative_to_playlist: bool,

    /// Dry run - show what would be copied without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Don't draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}
