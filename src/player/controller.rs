use std::time::Duration;

use tracing::{debug, info, warn};

use crate::audio::{AudioEngine, EngineEvent};
use crate::library::Track;

use super::error::PlayerError;
use super::model::{NoOp, Outcome, PlaybackState};

/// Owns the playlist, the selection, and the audio engine.
///
/// Every engine command goes through here, so `state` always reflects what
/// the engine was last told to do.
pub struct Player<E: AudioEngine> {
    engine: E,
    playlist: Vec<Track>,
    state: PlaybackState,
}

impl<E: AudioEngine> Player<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            playlist: Vec::new(),
            state: PlaybackState::Empty,
        }
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// The selected track, if any.
    pub fn current_track(&self) -> Option<&Track> {
        self.state
            .current_index()
            .and_then(|i| self.playlist.get(i))
    }

    /// Replace the playlist.
    ///
    /// A selection whose file is still present follows it to its new index;
    /// otherwise playback stops and the selection is dropped.
    pub fn load(&mut self, tracks: Vec<Track>) {
        let previous = self.current_track().map(|t| t.path.clone());
        self.playlist = tracks;

        let remapped = previous.and_then(|p| self.playlist.iter().position(|t| t.path == p));
        let sounding = matches!(
            self.state,
            PlaybackState::Playing(_) | PlaybackState::Paused(_)
        );

        self.state = match (self.state, remapped) {
            _ if self.playlist.is_empty() => PlaybackState::Empty,
            (PlaybackState::Playing(_), Some(i)) => PlaybackState::Playing(i),
            (PlaybackState::Paused(_), Some(i)) => PlaybackState::Paused(i),
            (PlaybackState::Stopped(Some(_)), Some(i)) => PlaybackState::Stopped(Some(i)),
            _ => PlaybackState::Stopped(None),
        };

        if sounding && self.state.current_index().is_none() {
            self.engine.stop();
        }

        info!(
            tracks = self.playlist.len(),
            state = ?self.state,
            "playlist loaded"
        );
    }

    /// Load and start the track at `index`.
    pub fn play_at(&mut self, index: usize) -> Result<Outcome, PlayerError> {
        if self.playlist.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        let len = self.playlist.len();
        let track = self
            .playlist
            .get(index)
            .ok_or(PlayerError::InvalidIndex { index, len })?;

        if let Err(e) = self.engine.load_and_play(&track.path) {
            warn!(path = %track.path.display(), error = %e, "engine refused track");
            return Err(e.into());
        }

        info!(index, track = %track.display, "playing");
        self.state = PlaybackState::Playing(index);
        Ok(Outcome::Started(index))
    }

    /// Play the following track, wrapping to the first after the last.
    pub fn next(&mut self) -> Result<Outcome, PlayerError> {
        let len = self.playlist.len();
        if len == 0 {
            return Ok(Outcome::Unchanged(NoOp::EmptyPlaylist));
        }
        let target = match self.state.current_index() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.play_at(target)
    }

    /// Play the preceding track, wrapping to the last before the first.
    pub fn previous(&mut self) -> Result<Outcome, PlayerError> {
        let len = self.playlist.len();
        if len == 0 {
            return Ok(Outcome::Unchanged(NoOp::EmptyPlaylist));
        }
        let target = match self.state.current_index() {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        self.play_at(target)
    }

    pub fn pause(&mut self) -> Outcome {
        match self.state {
            PlaybackState::Playing(i) => {
                self.engine.pause();
                self.state = PlaybackState::Paused(i);
                debug!(index = i, "paused");
                Outcome::Paused(i)
            }
            PlaybackState::Paused(_) => Outcome::Unchanged(NoOp::AlreadyPaused),
            PlaybackState::Stopped(_) | PlaybackState::Empty => {
                Outcome::Unchanged(NoOp::NotPlaying)
            }
        }
    }

    pub fn resume(&mut self) -> Outcome {
        match self.state {
            PlaybackState::Paused(i) => {
                self.engine.resume();
                self.state = PlaybackState::Playing(i);
                debug!(index = i, "resumed");
                Outcome::Resumed(i)
            }
            _ => Outcome::Unchanged(NoOp::NotPaused),
        }
    }

    /// Pause, resume or start playback depending on the current state.
    ///
    /// A stopped or silent player restarts its last selection, or the first
    /// track when nothing was ever selected.
    pub fn toggle_play_pause(&mut self) -> Result<Outcome, PlayerError> {
        match self.state {
            PlaybackState::Paused(_) => Ok(self.resume()),
            // The track ran out but the end has not been polled yet.
            PlaybackState::Playing(i) if !self.engine.is_playing() => self.play_at(i),
            PlaybackState::Playing(_) => Ok(self.pause()),
            PlaybackState::Stopped(Some(i)) => self.play_at(i),
            PlaybackState::Stopped(None) => self.play_at(0),
            PlaybackState::Empty => Ok(Outcome::Unchanged(NoOp::EmptyPlaylist)),
        }
    }

    /// Silence the engine but keep the selection for a later restart.
    pub fn stop(&mut self) -> Outcome {
        match self.state {
            PlaybackState::Playing(i) | PlaybackState::Paused(i) => {
                self.engine.stop();
                self.state = PlaybackState::Stopped(Some(i));
                debug!(index = i, "stopped");
                Outcome::Stopped(i)
            }
            PlaybackState::Stopped(_) | PlaybackState::Empty => {
                Outcome::Unchanged(NoOp::NotPlaying)
            }
        }
    }

    /// Check the engine for a finished track and move on to the next one.
    ///
    /// Never blocks. Returns `Ok(None)` when nothing finished. At most one
    /// advance happens per call, however many events were queued. If the
    /// next track cannot be started the player stops on the finished one.
    pub fn poll_track_end(&mut self) -> Result<Option<Outcome>, PlayerError> {
        let ended = self
            .engine
            .poll_events()
            .into_iter()
            .any(|e| e == EngineEvent::TrackEnded);
        if !ended {
            return Ok(None);
        }

        let PlaybackState::Playing(finished) = self.state else {
            debug!(state = ?self.state, "ignoring track end outside playback");
            return Ok(None);
        };

        info!(index = finished, "track finished, advancing");
        match self.next() {
            Ok(outcome) => Ok(Some(outcome)),
            Err(e) => {
                self.engine.stop();
                self.state = PlaybackState::Stopped(Some(finished));
                Err(e)
            }
        }
    }

    /// Release the engine at exit.
    pub fn shutdown(&mut self, fade_out: Duration) {
        self.engine.shutdown(fade_out);
        if let Some(i) = self.state.current_index() {
            self.state = PlaybackState::Stopped(Some(i));
        }
    }
}
