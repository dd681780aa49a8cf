//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components stay focused on the signal math - noise buffer
//! synthesis, pure tones, gain smoothing - so the graph layer can handle
//! routing and the engine can handle lifecycle. Everything here is safe to
//! call from the render path once constructed; only `noise::generate`
//! allocates, and it runs on the control thread during a rebuild.

/// One-pole smoothed gain for click-free volume changes.
pub mod gain;
/// Colored noise buffer synthesis (white, pink, brown).
pub mod noise;
/// Sine oscillator for the binaural tones.
pub mod oscillator;

pub use noise::NoiseColor;
