//! Engine boundary types.
//!
//! The playback controller talks to audio output only through the
//! `AudioEngine` trait so it can run against `rodio` in the binary and a
//! scripted engine in tests.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Notifications the engine queues up for its owner to poll.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The loaded track played through to its end.
    TrackEnded,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no audio output device: {0}")]
    Device(String),

    #[error("could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },
}

/// Audio output as seen by the playback controller.
pub trait AudioEngine {
    /// Replace whatever is loaded with `path` and start playing it.
    ///
    /// On error the previously loaded track keeps its current state.
    fn load_and_play(&mut self, path: &Path) -> Result<(), EngineError>;
    fn pause(&mut self);
    fn resume(&mut self);
    /// Drop the loaded track.
    fn stop(&mut self);
    /// True while a loaded track is audibly playing.
    fn is_playing(&self) -> bool;
    /// Drain pending events without blocking.
    fn poll_events(&mut self) -> Vec<EngineEvent>;

    /// Release the output at process exit, fading out over `fade_out` when
    /// the engine supports it.
    fn shutdown(&mut self, fade_out: Duration) {
        let _ = fade_out;
        self.stop();
    }
}

/// Latches the "sink ran dry" condition so a finished track is reported once.
#[derive(Debug, Default)]
pub(crate) struct EndLatch {
    reported: bool,
}

impl EndLatch {
    /// Feed the current "finished" observation; returns true exactly once per
    /// finished track.
    pub(crate) fn observe(&mut self, finished: bool) -> bool {
        if finished && !self.reported {
            self.reported = true;
            return true;
        }
        false
    }

    /// Arm the latch again for a newly loaded track.
    pub(crate) fn reset(&mut self) {
        self.reported = false;
    }
}
