//! Resolution of migration inputs and their defaults

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{MigrateError, Result};

/// Where a migration reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPlan {
    /// Playlist being migrated
    pub source_playlist: PathBuf,
    /// Directory receiving the media copies and the new playlist
    pub dest_dir: PathBuf,
    /// Filename of the new playlist inside `dest_dir`
    pub dest_playlist_name: OsString,
}

impl MigrationPlan {
    /// Fill in defaults for the optional inputs
    ///
    /// The destination directory defaults to the playlist's filename without
    /// its final extension, relative to the working directory. The playlist
    /// name defaults to the source playlist's filename. Empty values count as
    /// missing.
    pub fn resolve(
        source_playlist: PathBuf,
        dest_dir: Option<PathBuf>,
        dest_playlist_name: Option<String>,
    ) -> Result<Self> {
        let file_name = source_playlist
            .file_name()
            .ok_or_else(|| MigrateError::NoFileName(source_playlist.clone()))?
            .to_os_string();

        let dest_dir = match dest_dir.filter(|d| !d.as_os_str().is_empty()) {
            Some(dir) => dir,
            None => PathBuf::from(source_playlist.file_stem().unwrap_or(file_name.as_os_str())),
        };

        let dest_playlist_name = dest_playlist_name
            .filter(|n| !n.is_empty())
            .map(OsString::from)
            .unwrap_or(file_name);

        Ok(Self {
            source_playlist,
            dest_dir,
            dest_playlist_name,
        })
    }

    /// Full path of the playlist that will be written
    pub fn playlist_path(&self) -> PathBuf {
        self.dest_dir.join(&self.dest_playlist_name)
    }

    /// Directory containing the source playlist
    pub fn playlist_dir(&self) -> PathBuf {
        self.source_playlist
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_source() {
        let plan = MigrationPlan::resolve(PathBuf::from("/lists/Road Trip.m3u8"), None, None).unwrap();
        assert_eq!(plan.dest_dir, PathBuf::from("Road Trip"));
        assert_eq!(plan.dest_playlist_name, OsString::from("Road Trip.m3u8"));
        assert_eq!(plan.playlist_path(), PathBuf::from("Road Trip/Road Trip.m3u8"));
        assert_eq!(plan.playlist_dir(), PathBuf::from("/lists"));
    }

    #[test]
    fn test_explicit_values() {
        let plan = MigrationPlan::resolve(
            PathBuf::from("mix.m3u"),
            Some(PathBuf::from("/mnt/player/mix")),
            Some("index.m3u".to_string()),
        )
        .unwrap();
        assert_eq!(plan.playlist_path(), PathBuf::from("/mnt/player/mix/index.m3u"));
        assert_eq!(plan.playlist_dir(), PathBuf::new());
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let plan = MigrationPlan::resolve(
            PathBuf::from("mix.m3u"),
            Some(PathBuf::new()),
            Some(String::new()),
        )
        .unwrap();
        assert_eq!(plan.dest_dir, PathBuf::from("mix"));
        assert_eq!(plan.dest_playlist_name, OsString::from("mix.m3u"));
    }

    #[test]
    fn test_only_final_extension_is_dropped() {
        let plan = MigrationPlan::resolve(PathBuf::from("best.of.2024.m3u"), None, None).unwrap();
        assert_eq!(plan.dest_dir, PathBuf::from("best.of.2024"));
    }

    #[test]
    fn test_hidden_name_kept_whole() {
        let plan = MigrationPlan::resolve(PathBuf::from(".m3u"), None, None).unwrap();
        assert_eq!(plan.dest_dir, PathBuf::from(".m3u"));
    }

    #[test]
    fn test_source_without_file_name() {
        let err = MigrationPlan::resolve(PathBuf::from("/"), None, None).unwrap_err();
        assert!(matches!(err, MigrateError::NoFileName(_)));
    }
}
