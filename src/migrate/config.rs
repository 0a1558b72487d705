//! Migration configuration persistence
//!
//! Defaults live in ~/.config/plmigrate/config.json. Command-line flags can
//! switch options on over whatever the file says.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What the rewritten playlist does with records whose copy failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailedRecordPolicy {
    /// Keep every record, so the playlist describes the intended final state
    #[default]
    Include,
    /// Leave failed records out of the playlist
    Skip,
}

impl FailedRecordPolicy {
    /// Whether a record with the given copy outcome is written
    pub fn keeps(self, copied: bool) -> bool {
        match self {
            Self::Include => true,
            Self::Skip => copied,
        }
    }
}

/// Persistent migration defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrateConfig {
    /// Config format version
    pub version: u32,
    /// Handling of records whose copy failed
    pub failed_records: FailedRecordPolicy,
    /// Exit with an error when any copy failed
    pub strict: bool,
    /// Resolve relative sources against the playlist's directory
    pub relative_to_playlist: bool,
    /// Draw a progress bar while copying
    pub show_progress: bool,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            version: 1,
            failed_records: FailedRecordPolicy::default(),
            strict: false,
            relative_to_playlist: false,
            show_progress: true,
        }
    }
}

impl MigrateConfig {
    /// Load config from `path`, or from the default location
    ///
    /// A missing file at the default location yields the defaults; an
    /// explicitly given file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = Self::config_path()?;
                if !default.exists() {
                    debug!("No config found, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {:?}", path))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("plmigrate").join("config.json"))
    }
}
