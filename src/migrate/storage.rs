//! Destination directory operations

use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

use crate::error::{MigrateError, Result};
use crate::playlist::TrackRecord;

/// Manages file operations inside the destination directory
pub struct DestinationStorage {
    root: PathBuf,
}

impl DestinationStorage {
    /// Create a new storage manager rooted at `dest_dir`
    pub fn new(dest_dir: PathBuf) -> Self {
        Self { root: dest_dir }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a record's media file is copied to
    pub fn track_path(&self, record: &TrackRecord) -> PathBuf {
        self.root.join(record.dest_name())
    }

    /// Create the destination directory if it is missing
    ///
    /// An existing path that is not a directory is rejected.
    pub fn prepare(&self) -> Result<()> {
        match fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => {
                debug!("Using existing directory {}", self.root.display());
                Ok(())
            }
            Ok(_) => Err(MigrateError::NotADirectory(self.root.clone())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::create_dir_all(&self.root).map_err(|source| MigrateError::CreateDir {
                    path: self.root.clone(),
                    source,
                })?;
                debug!("Created directory {}", self.root.display());
                Ok(())
            }
            Err(source) => Err(MigrateError::CreateDir {
                path: self.root.clone(),
                source,
            }),
        }
    }

    /// Copy a record's source file to its destination name
    ///
    /// Relative sources are resolved against `base` when given, otherwise
    /// against the working directory. Returns the number of bytes copied.
    pub fn copy_track(&self, record: &TrackRecord, base: Option<&Path>) -> Result<u64> {
        let destination = self.track_path(record);

        let bytes = resolve_source(record.source_path(), base)
            .and_then(|source| copy_file(&source, &destination))
            .map_err(|cause| MigrateError::Copy {
                source_path: record.source_path().to_string(),
                destination: destination.clone(),
                cause,
            })?;

        debug!("Copied {} -> {} ({} bytes)", record.source_path(), destination.display(), bytes);
        Ok(bytes)
    }
}

/// Turn a playlist source line into a local path
///
/// `file://` URIs are decoded to paths; any other scheme is refused.
fn resolve_source(source: &str, base: Option<&Path>) -> io::Result<PathBuf> {
    let source = source.trim();

    if source.contains("://") {
        let url = Url::parse(source).map_err(|e| io::Error::new(ErrorKind::InvalidInput, e))?;
        if url.scheme() != "file" {
            return Err(io::Error::new(
                ErrorKind::Unsupported,
                format!("remote source scheme '{}' is not supported", url.scheme()),
            ));
        }
        return url
            .to_file_path()
            .map_err(|()| io::Error::new(ErrorKind::InvalidInput, "file URI does not name a local path"));
    }

    let path = Path::new(source);
    Ok(match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    })
}

/// Copy a regular file, holding both handles only for the copy itself
fn copy_file(src: &Path, dst: &Path) -> io::Result<u64> {
    let meta = fs::metadata(src)?;
    if !meta.is_file() {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("{} is not a regular file", src.display()),
        ));
    }

    if is_same_file(src, dst) {
        debug!("{} is already in place", dst.display());
        return Ok(meta.len());
    }

    let mut source = File::open(src)?;
    let mut destination = File::create(dst)?;
    io::copy(&mut source, &mut destination)
}

/// Whether `dst` already exists and is the same file as `src`
///
/// Creating `dst` would truncate `src` before it is read.
fn is_same_file(src: &Path, dst: &Path) -> bool {
    match (fs::canonicalize(src), fs::canonicalize(dst)) {
        (Ok(src), Ok(dst)) => src == dst,
        _ => false,
    }
}
