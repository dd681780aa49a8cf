//! The audio engine: single owner of the audio context and the live graph.
//!
//! `AudioEngine` is the only component that touches the platform audio
//! stream. The presentation layer pushes the full `SoundState` at it on
//! every change; the engine diffs that against what is currently sounding
//! and performs the minimal lifecycle transition - lazy context creation,
//! full graph rebuild, suspend, resume, or just a volume retarget.
//!
//! Threading follows the shared-mutex pattern: the control thread mutates
//! the graph under `Arc<Mutex<_>>`, the audio callback locks it to render
//! in `MAX_BLOCK_SIZE` chunks, and an rtrb ring buffer taps the rendered
//! mix out to the UI for visualization without a second lock.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;

use crate::dsp::gain::{SmoothedGain, VOLUME_TIME_CONSTANT};
use crate::graph::node::RenderCtx;
use crate::graph::{GraphParams, SoundGraph};
use crate::state::SoundState;
use crate::MAX_BLOCK_SIZE;

/// Capacity of the visualization tap ring buffer (~170 ms at 48 kHz).
const TAP_CAPACITY: usize = 8192;

/// Lifecycle state of the audio context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No audio context exists yet (or creating one failed).
    Uninitialized,
    /// Context exists but the stream is paused; nodes stay allocated.
    Suspended,
    /// Stream is running and the graph is audible.
    Running,
}

/// Why the audio context could not be created.
///
/// Never escapes the engine: `apply` logs it and stays `Uninitialized`,
/// surfacing to the user only as silence. The next play action retries.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no default output device available")]
    NoDevice,
    #[error("failed to fetch default output config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
}

/// The live generation of nodes plus the master gain stage.
struct ActiveGraph {
    graph: SoundGraph,
    master: SmoothedGain,
    sample_rate: f32,
}

impl ActiveGraph {
    fn new(params: GraphParams, volume_target: f32, sample_rate: f32) -> Self {
        // Master gain ramps up from silence so the first build does not
        // click either.
        let mut master = SmoothedGain::new(0.0, VOLUME_TIME_CONSTANT, sample_rate);
        master.set_target(volume_target);
        Self {
            graph: SoundGraph::build(params, sample_rate),
            master,
            sample_rate,
        }
    }
}

/// State shared between the control thread and the audio callback.
struct EngineShared {
    /// `None` until the first successful play; the callback renders
    /// silence in that window.
    active: Option<ActiveGraph>,
    tap: rtrb::Producer<f32>,
    left: Vec<f32>,
    right: Vec<f32>,
}

impl EngineShared {
    fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        let EngineShared {
            active,
            tap,
            left,
            right,
        } = self;

        let Some(active) = active else {
            data.fill(0.0);
            return;
        };

        let channels = channels.max(1);
        let ctx = RenderCtx::new(active.sample_rate);
        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
            let left = &mut left[..frames_to_render];
            let right = &mut right[..frames_to_render];

            active.graph.render(left, right, &ctx);

            for i in 0..frames_to_render {
                let gain = active.master.tick();
                let l = left[i] * gain;
                let r = right[i] * gain;
                let offset = (frames_written + i) * channels;

                if channels == 1 {
                    data[offset] = 0.5 * (l + r);
                } else {
                    data[offset] = l;
                    data[offset + 1] = r;
                    for ch in 2..channels {
                        data[offset + ch] = 0.0;
                    }
                }

                // Visualization only; dropping samples when the UI lags
                // is fine.
                let _ = tap.push(0.5 * (l + r));
            }

            frames_written += frames_to_render;
        }
    }
}

struct StreamHandle {
    stream: cpal::Stream,
    sample_rate: f32,
}

/// The AudioGraphController: applies `SoundState` changes to the platform.
pub struct AudioEngine {
    shared: Arc<Mutex<EngineShared>>,
    stream: Option<StreamHandle>,
    state: EngineState,
}

impl AudioEngine {
    /// Create an engine plus the consumer end of its visualization tap.
    ///
    /// No audio context is created here; that waits for the first play
    /// action, since most platforms refuse to open a stream without a
    /// user gesture anyway.
    pub fn new() -> (Self, rtrb::Consumer<f32>) {
        let (tap, tap_rx) = rtrb::RingBuffer::new(TAP_CAPACITY);
        let shared = Arc::new(Mutex::new(EngineShared {
            active: None,
            tap,
            left: vec![0.0; MAX_BLOCK_SIZE],
            right: vec![0.0; MAX_BLOCK_SIZE],
        }));
        (
            Self {
                shared,
                stream: None,
                state: EngineState::Uninitialized,
            },
            tap_rx,
        )
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Sample rate of the open audio context, if one exists yet.
    pub fn sample_rate(&self) -> Option<f32> {
        self.stream.as_ref().map(|handle| handle.sample_rate)
    }

    /// Apply the full state record; the engine diffs and transitions.
    ///
    /// Infallible by contract: platform failures are logged and absorbed,
    /// leaving the engine `Uninitialized` and retryable.
    pub fn apply(&mut self, state: &SoundState) {
        let params = GraphParams::from_state(state);
        let volume_target = f32::from(state.volume()) / 100.0;

        if state.is_playing() {
            if self.stream.is_none() {
                match self.open_stream() {
                    Ok(handle) => self.stream = Some(handle),
                    Err(err) => {
                        tracing::warn!(error = %err, "audio context unavailable, staying silent");
                        self.state = EngineState::Uninitialized;
                        return;
                    }
                }
            }
            let Some(handle) = &self.stream else { return };

            {
                let mut shared = self.shared.lock().unwrap();
                if let Some(active) = shared.active.as_mut() {
                    if *active.graph.params() != params {
                        tracing::debug!(?params, "rebuilding soundscape graph");
                        active.graph.rebuild(params, handle.sample_rate);
                    }
                    // else resume-in-place: same parameters, nothing to
                    // rebuild.
                    active.master.set_target(volume_target);
                } else {
                    tracing::debug!(?params, "building initial soundscape graph");
                    shared.active =
                        Some(ActiveGraph::new(params, volume_target, handle.sample_rate));
                }
            }

            if let Err(err) = handle.stream.play() {
                tracing::warn!(error = %err, "failed to resume stream");
                return;
            }
            self.state = EngineState::Running;
        } else {
            let Some(handle) = &self.stream else {
                // Never played: nothing to suspend.
                return;
            };

            // Keep the target current so resume comes back at the right
            // level.
            if let Some(active) = self.shared.lock().unwrap().active.as_mut() {
                active.master.set_target(volume_target);
            }

            // An already-paused stream is a no-op, not an error.
            if let Err(err) = handle.stream.pause() {
                tracing::debug!(error = %err, "pause on inactive stream ignored");
            }
            self.state = EngineState::Suspended;
        }
    }

    fn open_stream(&self) -> Result<StreamHandle, ContextError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(ContextError::NoDevice)?;
        let config = device.default_output_config()?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        tracing::info!(sample_rate, channels, "opening audio output");

        let shared = Arc::clone(&self.shared);
        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let mut shared = shared.lock().unwrap();
                shared.render_interleaved(data, channels);
            },
            |err| tracing::error!(error = %err, "audio stream error"),
            None,
        )?;

        Ok(StreamHandle {
            stream,
            sample_rate,
        })
    }
}
