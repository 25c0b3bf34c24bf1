use std::path::PathBuf;
use std::time::Duration;

/// One playable audio file discovered by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    /// Human-readable "Artist - Title" label derived from the filename.
    pub display: String,
    /// Playing time as reported by the file's tags, when it could be read.
    pub duration: Option<Duration>,
}
