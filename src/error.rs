//! Error types for playlist migration

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing, copying, or writing a playlist
#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Failed to read playlist {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Playlist path has no file name: {}", .0.display())]
    NoFileName(PathBuf),

    #[error("Truncated record at line {line}: '{metadata}' has no following source path")]
    TruncatedRecord { line: usize, metadata: String },

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error copying {source_path} to {}: {cause}", destination.display())]
    Copy {
        source_path: String,
        destination: PathBuf,
        #[source]
        cause: io::Error,
    },

    #[error("Failed to write playlist {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = MigrateError> = std::result::Result<T, E>;
