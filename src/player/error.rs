use thiserror::Error;

use crate::audio::EngineError;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("track index {index} is out of range (playlist has {len} tracks)")]
    InvalidIndex { index: usize, len: usize },

    #[error("playlist is empty")]
    EmptyPlaylist,

    #[error(transparent)]
    Engine(#[from] EngineError),
}
