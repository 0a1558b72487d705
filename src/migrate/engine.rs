//! Migration engine orchestration

use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

use super::config::FailedRecordPolicy;
use super::plan::MigrationPlan;
use super::storage::DestinationStorage;
use crate::error::{MigrateError, Result};
use crate::playlist::{read_playlist, write_playlist, TrackRecord};
use crate::utils::set_active_progress;

/// Options that change how a run treats its records
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// Whether failed copies still appear in the new playlist
    pub failed_records: FailedRecordPolicy,
    /// Resolve relative sources against the playlist's directory
    pub relative_to_playlist: bool,
    /// Draw a progress bar while copying
    pub show_progress: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            failed_records: FailedRecordPolicy::Include,
            relative_to_playlist: false,
            show_progress: true,
        }
    }
}

/// A record whose media file could not be copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFailure {
    pub source_path: String,
    pub destination: PathBuf,
    pub reason: String,
}

impl fmt::Display for CopyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error copying {} to {}: {}",
            self.source_path,
            self.destination.display(),
            self.reason
        )
    }
}

/// Result of a migration run
#[derive(Debug, Default)]
pub struct MigrationResult {
    pub records_found: usize,
    pub files_copied: usize,
    pub bytes_copied: u64,
    /// Records that failed to copy, in playlist order
    pub failures: Vec<CopyFailure>,
    pub playlist_path: PathBuf,
    pub entries_written: usize,
}

/// Migration engine that coordinates parsing, copying, and rewriting
pub struct MigrationEngine {
    plan: MigrationPlan,
    storage: DestinationStorage,
    options: MigrationOptions,
}

impl MigrationEngine {
    /// Create a new migration engine
    pub fn new(plan: MigrationPlan, options: MigrationOptions) -> Self {
        let storage = DestinationStorage::new(plan.dest_dir.clone());
        Self {
            plan,
            storage,
            options,
        }
    }

    pub fn plan(&self) -> &MigrationPlan {
        &self.plan
    }

    /// Where a record's media file ends up
    pub fn destination_for(&self, record: &TrackRecord) -> PathBuf {
        self.storage.track_path(record)
    }

    /// Parse the source playlist
    pub fn load_records(&self) -> Result<Vec<TrackRecord>> {
        let records = read_playlist(&self.plan.source_playlist)?;
        info!("Found {} music files", records.len());
        Ok(records)
    }

    /// Execute the migration
    ///
    /// Copy failures are collected, not returned; the playlist is written
    /// after every copy has been attempted. Parsing, directory, and playlist
    /// write failures abort the run.
    pub fn run(&self) -> Result<MigrationResult> {
        let records = self.load_records()?;

        self.storage.prepare()?;
        info!("Migrating into {}", self.storage.root().display());

        let mut result = MigrationResult {
            records_found: records.len(),
            ..Default::default()
        };

        let copied = self.copy_all(&records, &mut result)?;

        let policy = self.options.failed_records;
        let entries = records
            .iter()
            .zip(&copied)
            .filter(|(_, ok)| policy.keeps(**ok))
            .map(|(record, _)| record);

        result.playlist_path = self.plan.playlist_path();
        result.entries_written = write_playlist(&result.playlist_path, entries)?;

        info!(
            "Wrote {} ({} entries, {} copy failures)",
            result.playlist_path.display(),
            result.entries_written,
            result.failures.len()
        );

        Ok(result)
    }

    /// Copy every record in order, returning whether each one succeeded
    fn copy_all(
        &self,
        records: &[TrackRecord],
        result: &mut MigrationResult,
    ) -> Result<Vec<bool>> {
        let base = self
            .options
            .relative_to_playlist
            .then(|| self.plan.playlist_dir());

        let progress = self.progress_bar(records.len());
        set_active_progress(Some(progress.clone()));

        let mut copied = Vec::with_capacity(records.len());
        for record in records {
            progress.set_message(record.dest_name().to_string());

            match self.storage.copy_track(record, base.as_deref()) {
                Ok(bytes) => {
                    result.files_copied += 1;
                    result.bytes_copied += bytes;
                    copied.push(true);
                }
                Err(MigrateError::Copy {
                    source_path,
                    destination,
                    cause,
                }) => {
                    let failure = CopyFailure {
                        source_path,
                        destination,
                        reason: cause.to_string(),
                    };
                    warn!("{}", failure);
                    result.failures.push(failure);
                    copied.push(false);
                }
                Err(e) => {
                    progress.finish_and_clear();
                    set_active_progress(None);
                    return Err(e);
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();
        set_active_progress(None);
        Ok(copied)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.options.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(len as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const EXAMPLE: &str = "#EXTM3U\r#EXTINF:100,SongA\rsongA.mp3\r#EXTINF:100,SongB\rsongB.mp3\r";

    fn options(failed_records: FailedRecordPolicy) -> MigrationOptions {
        MigrationOptions {
            failed_records,
            relative_to_playlist: true,
            show_progress: false,
        }
    }

    fn engine(dir: &Path, failed_records: FailedRecordPolicy) -> MigrationEngine {
        let plan = MigrationPlan::resolve(
            dir.join("mix.m3u"),
            Some(dir.join("out")),
            None,
        )
        .unwrap();
        MigrationEngine::new(plan, options(failed_records))
    }

    #[test]
    fn test_run_example() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("mix.m3u"), EXAMPLE).unwrap();
        fs::write(dir.path().join("songA.mp3"), b"AAAA").unwrap();
        fs::write(dir.path().join("songB.mp3"), b"BBBBBB").unwrap();

        let result = engine(dir.path(), FailedRecordPolicy::Include).run().unwrap();

        assert_eq!(result.records_found, 2);
        assert_eq!(result.files_copied, 2);
        assert_eq!(result.bytes_copied, 10);
        assert!(result.failures.is_empty());
        assert_eq!(result.entries_written, 2);

        let out = dir.path().join("out");
        assert_eq!(fs::read(out.join("00001.mp3")).unwrap(), b"AAAA");
        assert_eq!(fs::read(out.join("00002.mp3")).unwrap(), b"BBBBBB");
        assert_eq!(result.playlist_path, out.join("mix.m3u"));
        assert_eq!(
            fs::read_to_string(out.join("mix.m3u")).unwrap(),
            "#EXTM3U\r#EXTINF:100,SongA\r00001.mp3\r#EXTINF:100,SongB\r00002.mp3\r"
        );
    }

    #[test]
    fn test_missing_source_does_not_abort() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("mix.m3u"), EXAMPLE).unwrap();
        fs::write(dir.path().join("songB.mp3"), b"BBBBBB").unwrap();

        let result = engine(dir.path(), FailedRecordPolicy::Include).run().unwrap();

        assert_eq!(result.files_copied, 1);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].source_path, "songA.mp3");
        assert_eq!(result.failures[0].destination, dir.path().join("out").join("00001.mp3"));
        assert!(result.failures[0]
            .to_string()
            .starts_with("Error copying songA.mp3 to "));

        let out = dir.path().join("out");
        assert!(!out.join("00001.mp3").exists());
        assert_eq!(fs::read(out.join("00002.mp3")).unwrap(), b"BBBBBB");

        // Failed record is still referenced
        let playlist = fs::read_to_string(out.join("mix.m3u")).unwrap();
        assert!(playlist.contains("\r00001.mp3\r"));
        assert!(playlist.contains("\r00002.mp3\r"));
        assert_eq!(result.entries_written, 2);
    }

    #[test]
    fn test_skip_policy_drops_failed_records() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("mix.m3u"), EXAMPLE).unwrap();
        fs::write(dir.path().join("songB.mp3"), b"BBBBBB").unwrap();

        let result = engine(dir.path(), FailedRecordPolicy::Skip).run().unwrap();

        assert_eq!(result.entries_written, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("out").join("mix.m3u")).unwrap(),
            "#EXTM3U\r#EXTINF:100,SongB\r00002.mp3\r"
        );
    }

    #[test]
    fn test_destination_file_aborts_before_copy() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("mix.m3u"), EXAMPLE).unwrap();
        fs::write(dir.path().join("songA.mp3"), b"AAAA").unwrap();
        fs::write(dir.path().join("out"), b"i am a file").unwrap();

        let err = engine(dir.path(), FailedRecordPolicy::Include).run().unwrap_err();
        assert!(matches!(err, MigrateError::NotADirectory(_)));
        assert_eq!(fs::read(dir.path().join("out")).unwrap(), b"i am a file");
    }

    #[test]
    fn test_truncated_playlist_aborts_before_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("mix.m3u"), "#EXTM3U\r#EXTINF:100,SongA").unwrap();

        let err = engine(dir.path(), FailedRecordPolicy::Include).run().unwrap_err();
        assert!(matches!(err, MigrateError::TruncatedRecord { .. }));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_missing_playlist_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = engine(dir.path(), FailedRecordPolicy::Include).run().unwrap_err();
        assert!(matches!(err, MigrateError::Read { .. }));
    }

    #[test]
    fn test_empty_playlist_writes_header_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("mix.m3u"), "#EXTM3U\r").unwrap();

        let result = engine(dir.path(), FailedRecordPolicy::Include).run().unwrap();
        assert_eq!(result.records_found, 0);
        assert_eq!(
            fs::read_to_string(dir.path().join("out").join("mix.m3u")).unwrap(),
            "#EXTM3U\r"
        );
    }

    #[test]
    fn test_remigrate_into_same_directory_keeps_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("mix.m3u"), EXAMPLE).unwrap();
        fs::write(dir.path().join("songA.mp3"), b"AAAA").unwrap();
        fs::write(dir.path().join("songB.mp3"), b"BBBBBB").unwrap();
        engine(dir.path(), FailedRecordPolicy::Include).run().unwrap();

        let out = dir.path().join("out");
        let plan = MigrationPlan::resolve(out.join("mix.m3u"), Some(out.clone()), None).unwrap();
        let result = MigrationEngine::new(plan, options(FailedRecordPolicy::Include))
            .run()
            .unwrap();

        assert!(result.failures.is_empty());
        assert_eq!(fs::read(out.join("00001.mp3")).unwrap(), b"AAAA");
        assert_eq!(fs::read(out.join("00002.mp3")).unwrap(), b"BBBBBB");
        assert_eq!(
            fs::read_to_string(out.join("mix.m3u")).unwrap(),
            "#EXTM3U\r#EXTINF:100,SongA\r00001.mp3\r#EXTINF:100,SongB\r00002.mp3\r"
        );
    }

    #[test]
    fn test_destination_for() {
        let dir = TempDir::new().unwrap();
        let engine = engine(dir.path(), FailedRecordPolicy::Include);
        let record = TrackRecord::new(7, 5, "#EXTINF:1,X", "x.wav");
        assert_eq!(engine.destination_for(&record), dir.path().join("out").join("00007.wav"));
    }
}
