//! Audio subsystem: the engine boundary and its `rodio` implementation.

mod engine;
mod sink;
mod types;

pub use engine::RodioEngine;
pub use types::{AudioEngine, EngineError, EngineEvent};

#[cfg(test)]
pub(crate) mod fake;
