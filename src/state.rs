//! The single mutable state record owned by the presentation layer.

use crate::dsp::noise::NoiseColor;
use crate::modes::Mode;

/// Volume step applied by the presentation layer's up/down controls.
pub const VOLUME_STEP: u8 = 5;

/// Everything the engine needs to know, in one record.
///
/// `noise` and `binaural_freq` are computed from `mode` through the fixed
/// synthesis table and are deliberately not settable on their own: every
/// mutation that could desynchronize them goes through `set_mode`, so the
/// invariant "mode determines synthesis parameters" holds by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundState {
    mode: Mode,
    is_playing: bool,
    volume: u8,
    noise: Option<NoiseColor>,
    binaural_freq: f32,
}

impl SoundState {
    /// Startup defaults: FOCUS, paused, volume 50.
    pub fn new() -> Self {
        let mut state = Self {
            mode: Mode::Focus,
            is_playing: false,
            volume: 50,
            noise: None,
            binaural_freq: 0.0,
        };
        state.set_mode(Mode::Focus);
        state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Volume in the 0-100 range.
    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn noise(&self) -> Option<NoiseColor> {
        self.noise
    }

    pub fn binaural_freq(&self) -> f32 {
        self.binaural_freq
    }

    /// Switch mode and rederive the synthesis parameters.
    pub fn set_mode(&mut self, mode: Mode) {
        let synth = mode.synthesis();
        self.mode = mode;
        self.noise = synth.noise;
        self.binaural_freq = synth.beat_freq;
    }

    pub fn toggle_playback(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    pub fn volume_up(&mut self) {
        self.volume = (self.volume + VOLUME_STEP).min(100);
    }

    pub fn volume_down(&mut self) {
        self.volume = self.volume.saturating_sub(VOLUME_STEP);
    }
}

impl Default for SoundState {
    fn default() -> Self {
        Self::new()
    }
}
