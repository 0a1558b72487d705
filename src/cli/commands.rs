//! CLI command handlers

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::generate;
use colored::Colorize;
use std::io;
use std::path::Path;

use super::{Cli, MigrateArgs};
use crate::migrate::{
    FailedRecordPolicy, MigrateConfig, MigrationEngine, MigrationOptions, MigrationPlan,
    MigrationResult,
};

/// Handle the `migrate` command
pub fn migrate(args: MigrateArgs, config_path: Option<&Path>) -> Result<()> {
    let config = MigrateConfig::load(config_path)?;

    let options = MigrationOptions {
        failed_records: if args.skip_failed {
            FailedRecordPolicy::Skip
        } else {
            config.failed_records
        },
        relative_to_playlist: args.relative_to_playlist || config.relative_to_playlist,
        show_progress: !args.no_progress && config.show_progress,
    };
    let strict = args.strict || config.strict;

    let plan = MigrationPlan::resolve(args.src, args.dest, args.dest_playlist)?;

    println!(
        "Migrating: {} -> {}",
        plan.source_playlist.display().to_string().green(),
        plan.dest_dir.display()
    );

    let engine = MigrationEngine::new(plan, options);

    if args.dry_run {
        return dry_run(&engine);
    }

    let result = engine.run().context("Migration failed")?;

    print_summary(&result);

    if strict && !result.failures.is_empty() {
        anyhow::bail!(
            "{} of {} files failed to copy",
            result.failures.len(),
            result.records_found
        );
    }

    Ok(())
}

/// Print what a migration would do without touching the filesystem
fn dry_run(engine: &MigrationEngine) -> Result<()> {
    let records = engine
        .load_records()
        .context("Failed to load source playlist")?;

    println!();
    println!("{}", "[DRY RUN] Would copy:".yellow());
    for record in &records {
        println!(
            "  {} -> {}",
            record.source_path(),
            engine.destination_for(record).display()
        );
    }
    println!(
        "{} {} ({} entries)",
        "[DRY RUN] Would write playlist:".yellow(),
        engine.plan().playlist_path().display(),
        records.len()
    );

    Ok(())
}

fn print_summary(result: &MigrationResult) {
    println!();
    if result.failures.is_empty() {
        println!("{}", "Migration complete!".green().bold());
    } else {
        println!("{}", "Migration complete with errors".yellow().bold());
    }
    println!("  Tracks found: {}", result.records_found);
    println!("  Files copied: {}", result.files_copied);
    println!(
        "  Total size: {:.1} MB",
        result.bytes_copied as f64 / 1_048_576.0
    );
    println!(
        "  Playlist: {} ({} entries)",
        result.playlist_path.display(),
        result.entries_written
    );

    if !result.failures.is_empty() {
        println!("  {}", format!("Failed: {}", result.failures.len()).red());
        for failure in &result.failures {
            println!("    - {}", failure);
        }
    }
}

/// Handle the `completion` command
pub fn completion(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "plmigrate", &mut io::stdout());
}
