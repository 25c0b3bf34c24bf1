use std::path::Path;
use std::thread;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, info};

use super::sink::create_sink;
use super::types::{AudioEngine, EndLatch, EngineError, EngineEvent};

/// `AudioEngine` backed by the default `rodio` output device.
///
/// One sink holds the current track; rodio mixes it on its own thread, and
/// end-of-track is detected by polling whether the sink has run dry.
pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    end: EndLatch,
}

impl RodioEngine {
    /// Open the default output device.
    pub fn open() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::Device(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would land
        // in the middle of the menu output.
        stream.log_on_drop(false);
        info!("opened default audio output");

        Ok(Self {
            stream,
            sink: None,
            end: EndLatch::default(),
        })
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

impl AudioEngine for RodioEngine {
    fn load_and_play(&mut self, path: &Path) -> Result<(), EngineError> {
        let new_sink = create_sink(&self.stream, path)?;

        if let Some(old) = self.sink.take() {
            old.stop();
        }

        new_sink.play();
        self.sink = Some(new_sink);
        self.end.reset();
        debug!(path = %path.display(), "engine loaded track");
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.play();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.end.reset();
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|s| !s.is_paused() && !s.empty())
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        let finished = self
            .sink
            .as_ref()
            .is_some_and(|s| !s.is_paused() && s.empty());

        if self.end.observe(finished) {
            vec![EngineEvent::TrackEnded]
        } else {
            Vec::new()
        }
    }

    fn shutdown(&mut self, fade_out: Duration) {
        if let Some(sink) = self.sink.take() {
            if !sink.is_paused() && !sink.empty() {
                fade_out_sink(&sink, fade_out.as_millis() as u64);
            }
            sink.stop();
        }
        info!("audio output released");
    }
}
