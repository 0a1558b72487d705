//! Extended M3U playlist model, parser, and writer
//!
//! Playlists use a single carriage return as the line separator. The first
//! line is the `#EXTM3U` header, followed by `#EXTINF` / path line pairs.

mod parser;
mod record;
mod writer;

pub use parser::read_playlist;
pub use record::TrackRecord;
pub use writer::write_playlist;

/// Format identifier written as the first line
pub const HEADER: &str = "#EXTM3U";

/// Prefix of the metadata line that precedes every source path
pub const METADATA_MARKER: &str = "#EXTINF";

pub const LINE_SEPARATOR: char = '\r';
