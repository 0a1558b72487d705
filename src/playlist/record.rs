//! Track records and destination name normalization

/// Minimum zero-padded width of the sequence part of a destination name
pub const MIN_INDEX_WIDTH: usize = 5;

/// One playlist entry: the `#EXTINF` line, the source path that followed it,
/// and the normalized filename assigned at parse time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    source_path: String,
    dest_name: String,
    metadata_line: String,
}

impl TrackRecord {
    /// Build a record for the 1-based `index`, padding the index to `width`
    pub fn new(index: usize, width: usize, metadata_line: &str, source_path: &str) -> Self {
        Self {
            source_path: source_path.to_string(),
            dest_name: dest_name(index, width, source_path),
            metadata_line: metadata_line.to_string(),
        }
    }

    /// Source location exactly as it appeared in the playlist
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Normalized filename inside the destination directory
    pub fn dest_name(&self) -> &str {
        &self.dest_name
    }

    /// Verbatim metadata line that preceded the source path
    pub fn metadata_line(&self) -> &str {
        &self.metadata_line
    }
}

/// Width needed so every index up to `count` sorts lexicographically
pub fn index_width(count: usize) -> usize {
    let digits = count.checked_ilog10().map_or(1, |d| d as usize + 1);
    digits.max(MIN_INDEX_WIDTH)
}

/// Compose `00001.ext` from a sequence index and the source's extension
///
/// Sources without an extension get the bare index.
pub fn dest_name(index: usize, width: usize, source_path: &str) -> String {
    match extension(source_path) {
        Some(ext) => format!("{:0width$}.{}", index, ext, width = width),
        None => format!("{:0width$}", index, width = width),
    }
}

/// Extension of the last path segment of a source line, without the dot
///
/// URI query strings and fragments are ignored. A segment whose only dot is
/// leading (`.hidden`) or trailing (`song.`) has no extension.
pub fn extension(source_path: &str) -> Option<&str> {
    let mut path = source_path.trim();

    if path.contains("://") {
        if let Some(end) = path.find(['?', '#']) {
            path = &path[..end];
        }
    }

    let segment = path.rsplit(['/', '\\']).next().unwrap_or(path);

    match segment.rfind('.') {
        Some(0) | None => None,
        Some(dot) if dot + 1 == segment.len() => None,
        Some(dot) => Some(&segment[dot + 1..]),
    }
}
