//! Extended M3U playlist generation

use std::fs;
use std::path::Path;
use tracing::debug;

use super::record::TrackRecord;
use super::{HEADER, LINE_SEPARATOR};
use crate::error::{MigrateError, Result};

/// Generate playlist content pointing at each record's destination name
///
/// Every line, the header included, ends with a carriage return.
pub fn render_playlist<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a TrackRecord>,
{
    let mut content = String::from(HEADER);
    content.push(LINE_SEPARATOR);
    for record in records {
        content.push_str(record.metadata_line());
        content.push(LINE_SEPARATOR);
        content.push_str(record.dest_name());
        content.push(LINE_SEPARATOR);
    }
    content
}

/// Create or truncate `path` and write the rendered playlist to it
pub fn write_playlist<'a, I>(path: &Path, records: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a TrackRecord>,
{
    let mut count = 0;
    let content = render_playlist(records.into_iter().inspect(|_| count += 1));

    fs::write(path, content).map_err(|source| MigrateError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Wrote playlist: {} ({} tracks)", path.display(), count);
    Ok(count)
}
