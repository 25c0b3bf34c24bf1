use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::AudioFile;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::format_name;
use super::model::Track;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("could not create music folder {}: {source}", .path.display())]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read music folder {}: {source}", .path.display())]
    ReadFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub(super) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => Some(tagged.properties().duration()),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no duration for track");
            None
        }
    }
}

/// Scan `dir` (not recursively) for songs, creating the folder first if it
/// does not exist yet.
///
/// Tracks come back in directory-listing order. An empty folder is `Ok` with
/// an empty playlist.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Result<Vec<Track>, ScanError> {
    if !dir.is_dir() {
        fs::create_dir_all(dir).map_err(|source| ScanError::CreateFolder {
            path: dir.to_path_buf(),
            source,
        })?;
        info!(folder = %dir.display(), "created music folder");
    }

    let mut tracks: Vec<Track> = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(settings.follow_links);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Depth 0 means the folder itself could not be listed.
            Err(e) if e.depth() == 0 => {
                return Err(ScanError::ReadFolder {
                    path: dir.to_path_buf(),
                    source: e.into(),
                });
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable folder entry");
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file()
            || (!settings.include_hidden && is_hidden(path))
            || !is_audio_file(path, settings)
        {
            continue;
        }

        let duration = if settings.read_durations {
            probe_duration(path)
        } else {
            None
        };

        tracks.push(Track {
            path: path.to_path_buf(),
            display: format_name(path, &settings.display_separator),
            duration,
        });
    }

    info!(folder = %dir.display(), count = tracks.len(), "scanned music folder");
    Ok(tracks)
}
