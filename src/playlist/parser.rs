//! Extended M3U playlist parsing

use std::fs;
use std::path::Path;
use tracing::debug;

use super::record::{index_width, TrackRecord};
use super::{LINE_SEPARATOR, METADATA_MARKER};
use crate::error::{MigrateError, Result};

/// Read and parse the playlist at `path`
pub fn read_playlist(path: &Path) -> Result<Vec<TrackRecord>> {
    let content = fs::read_to_string(path).map_err(|source| MigrateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_playlist(&content)?;
    debug!("Parsed {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse playlist text into records, in playlist order
///
/// Every `#EXTINF` line pairs with the line right after it, which is taken
/// verbatim as the source path. All other lines are skipped.
pub fn parse_playlist(content: &str) -> Result<Vec<TrackRecord>> {
    let lines: Vec<&str> = split_lines(content).collect();

    let mut pairs: Vec<(&str, &str)> = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let line = lines[cursor];
        if !line.starts_with(METADATA_MARKER) {
            cursor += 1;
            continue;
        }

        let source = *lines
            .get(cursor + 1)
            .ok_or_else(|| MigrateError::TruncatedRecord {
                line: cursor + 1,
                metadata: line.to_string(),
            })?;

        pairs.push((line, source));
        cursor += 2;
    }

    let width = index_width(pairs.len());
    Ok(pairs
        .into_iter()
        .enumerate()
        .map(|(idx, (metadata, source))| TrackRecord::new(idx + 1, width, metadata, source))
        .collect())
}

/// Split on `\r`, dropping the `\n` half of a CRLF pair
///
/// The separator terminates lines, so a trailing one does not open an
/// empty final line.
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let content = content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix(LINE_SEPARATOR))
        .unwrap_or(content);

    content
        .split(LINE_SEPARATOR)
        .enumerate()
        .map(|(idx, line)| if idx > 0 { line.strip_prefix('\n').unwrap_or(line) } else { line })
}
