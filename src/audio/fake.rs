//! Scripted engine for exercising the controller without an audio device.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::{AudioEngine, EngineError, EngineEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Load(PathBuf),
    Pause,
    Resume,
    Stop,
    Shutdown,
}

#[derive(Debug, Default)]
pub(crate) struct FakeEngine {
    pub calls: Vec<Call>,
    pub loaded: Option<PathBuf>,
    pub paused: bool,
    pending: VecDeque<EngineEvent>,
    failing: HashSet<PathBuf>,
    track_polls: Option<usize>,
    polls_since_load: usize,
}

impl FakeEngine {
    /// Make every later `load_and_play` of `path` fail with a decode error.
    pub fn fail_on(&mut self, path: impl Into<PathBuf>) {
        self.failing.insert(path.into());
    }

    /// Queue an end-of-track event, as if the loaded song just finished.
    pub fn finish_track(&mut self) {
        self.pending.push_back(EngineEvent::TrackEnded);
    }

    /// Let every loaded track run out after `polls` unpaused polls.
    pub fn tracks_last(&mut self, polls: usize) {
        self.track_polls = Some(polls);
    }

    pub fn loads(&self) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Load(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }
}

impl AudioEngine for FakeEngine {
    fn load_and_play(&mut self, path: &Path) -> Result<(), EngineError> {
        if self.failing.contains(path) {
            return Err(EngineError::Decode {
                path: path.to_path_buf(),
                reason: "scripted failure".to_string(),
            });
        }
        self.calls.push(Call::Load(path.to_path_buf()));
        self.loaded = Some(path.to_path_buf());
        self.paused = false;
        self.polls_since_load = 0;
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
        self.paused = true;
    }

    fn resume(&mut self) {
        self.calls.push(Call::Resume);
        self.paused = false;
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
        self.loaded = None;
        self.paused = false;
    }

    fn is_playing(&self) -> bool {
        self.loaded.is_some() && !self.paused
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        if let Some(length) = self.track_polls {
            if self.is_playing() {
                self.polls_since_load += 1;
                if self.polls_since_load == length {
                    self.pending.push_back(EngineEvent::TrackEnded);
                }
            }
        }
        self.pending.drain(..).collect()
    }

    fn shutdown(&mut self, _fade_out: Duration) {
        self.calls.push(Call::Shutdown);
        self.loaded = None;
    }
}
