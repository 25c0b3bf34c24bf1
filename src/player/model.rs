//! Controller state and operation outcomes.

use std::fmt;

/// Where the controller stands with respect to the playlist.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No playlist loaded, or the loaded one has no tracks.
    #[default]
    Empty,
    /// Tracks are loaded but nothing is sounding. Remembers the last
    /// selection, if any, so play/pause can restart it.
    Stopped(Option<usize>),
    Playing(usize),
    Paused(usize),
}

impl PlaybackState {
    /// The selected playlist index, if any.
    pub fn current_index(self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Stopped(index) => index,
            Self::Playing(index) | Self::Paused(index) => Some(index),
        }
    }
}

/// What an operation did to the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The track at this index was loaded and started from the top.
    Started(usize),
    Paused(usize),
    Resumed(usize),
    Stopped(usize),
    /// Nothing changed; the call did not apply in the current state.
    Unchanged(NoOp),
}

/// Why an operation left the controller untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoOp {
    EmptyPlaylist,
    NotPlaying,
    AlreadyPaused,
    NotPaused,
}

impl fmt::Display for NoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::EmptyPlaylist => "Playlist is empty",
            Self::NotPlaying => "No music is playing",
            Self::AlreadyPaused => "Music is already paused",
            Self::NotPaused => "Music is not paused",
        };
        f.write_str(msg)
    }
}
