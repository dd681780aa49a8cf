use crate::dsp::oscillator::SineOsc;
use crate::graph::node::{RenderCtx, StereoNode};

/*
Binaural Beats
==============

Feed each ear a pure tone at a slightly different frequency and the brain
perceives a low-frequency pulsation at the difference:

    perceived beat = |left_freq - right_freq|

The effect depends on the ears receiving the tones separately, which is
why both oscillators are hard-panned (left tone only in the left channel,
right tone only in the right) and why headphones are assumed. Each tone
runs through a fixed low gain so the beat sits under the noise bed rather
than on top of it.

Usage note: beat frequencies in the ~1-30 Hz range track the named brain
wave bands (delta through beta). Values outside that range are accepted -
the synthesis is perfectly happy to produce them - but lose psychoacoustic
validity. The mode table in `modes` stays within 3-22 Hz.
*/

/// Carrier frequency shared by both ears.
pub const BASE_FREQ: f32 = 200.0;

/// Fixed per-ear gain applied to each tone.
pub const EAR_GAIN: f32 = 0.1;

/// Frequencies of the two hard-panned tones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinauralParams {
    pub left_freq: f32,
    pub right_freq: f32,
}

impl BinauralParams {
    /// Split the default 200 Hz carrier by `beat_freq`.
    ///
    /// `beat_freq` must be positive; the right ear carries the offset.
    pub fn new(beat_freq: f32) -> Self {
        Self::with_base(BASE_FREQ, beat_freq)
    }

    pub fn with_base(base_freq: f32, beat_freq: f32) -> Self {
        debug_assert!(beat_freq > 0.0, "beat frequency must be positive");
        Self {
            left_freq: base_freq,
            right_freq: base_freq + beat_freq,
        }
    }

    /// The perceived beat frequency.
    pub fn beat(&self) -> f32 {
        (self.right_freq - self.left_freq).abs()
    }
}

/// The two tone generators, one per ear.
pub struct BinauralPair {
    left: SineOsc,
    right: SineOsc,
}

impl BinauralPair {
    pub fn new(params: BinauralParams) -> Self {
        Self {
            left: SineOsc::new(params.left_freq),
            right: SineOsc::new(params.right_freq),
        }
    }

    pub fn params(&self) -> BinauralParams {
        BinauralParams {
            left_freq: self.left.frequency(),
            right_freq: self.right.frequency(),
        }
    }
}

impl StereoNode for BinauralPair {
    fn render_block(&mut self, left: &mut [f32], right: &mut [f32], ctx: &RenderCtx) {
        for l in left.iter_mut() {
            *l += self.left.tick(ctx.sample_rate) * EAR_GAIN;
        }
        for r in right.iter_mut() {
            *r += self.right.tick(ctx.sample_rate) * EAR_GAIN;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_carrier_by_beat() {
        let params = BinauralParams::new(14.0);
        assert_eq!(params.left_freq, 200.0);
        assert_eq!(params.right_freq, 214.0);
        assert_eq!(params.beat(), 14.0);
    }

    #[test]
    fn custom_carrier() {
        let params = BinauralParams::with_base(220.0, 6.0);
        assert_eq!(params.left_freq, 220.0);
        assert_eq!(params.right_freq, 226.0);
    }

    #[test]
    fn tones_are_hard_panned() {
        let mut pair = BinauralPair::new(BinauralParams::new(10.0));
        let ctx = RenderCtx::new(48_000.0);
        let mut left = vec![0.0; 512];
        let mut right = vec![0.0; 512];
        pair.render_block(&mut left, &mut right, &ctx);

        // Both channels carry signal, but different signal: the right
        // tone runs 10 Hz faster so the channels drift out of phase.
        assert!(left.iter().any(|&s| s.abs() > 0.0));
        assert!(right.iter().any(|&s| s.abs() > 0.0));
        assert_ne!(left, right);
    }

    #[test]
    fn per_ear_gain_bounds_output() {
        let mut pair = BinauralPair::new(BinauralParams::new(22.0));
        let ctx = RenderCtx::new(48_000.0);
        let mut left = vec![0.0; 4096];
        let mut right = vec![0.0; 4096];
        pair.render_block(&mut left, &mut right, &ctx);

        let peak = left
            .iter()
            .chain(right.iter())
            .fold(0.0f32, |acc, &x| acc.max(x.abs()));
        assert!(peak <= EAR_GAIN + 1e-6, "tone exceeds ear gain: {peak}");
    }
}
