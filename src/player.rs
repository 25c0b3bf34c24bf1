//! Playback controller: the playlist/selection state machine in front of the
//! audio engine.
//!
//! `Player` is the only thing that issues commands to the engine; the menu
//! loop drives it and polls it for auto-advance once per iteration.

mod controller;
mod error;
mod model;

pub use controller::Player;
pub use error::PlayerError;
pub use model::{Outcome, PlaybackState};

#[cfg(test)]
mod tests;
