use crate::dsp::noise::{self, NoiseColor};
use crate::graph::node::{RenderCtx, StereoNode};
use crate::NOISE_LOOP_SECONDS;

/// Looping noise source.
///
/// Owns one freshly generated buffer (2 seconds of audio) and cycles
/// through it endlessly, feeding both channels equally - the noise bed is
/// center-panned, unlike the hard-panned binaural tones. A new `NoiseLoop`
/// means a new stochastic buffer; the loop itself never regenerates.
pub struct NoiseLoop {
    color: NoiseColor,
    buffer: Vec<f32>,
    position: usize,
}

impl NoiseLoop {
    pub fn new(color: NoiseColor, sample_rate: f32) -> Self {
        Self {
            color,
            buffer: noise::generate(color, NOISE_LOOP_SECONDS, sample_rate),
            position: 0,
        }
    }

    pub fn color(&self) -> NoiseColor {
        self.color
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }
}

impl StereoNode for NoiseLoop {
    fn render_block(&mut self, left: &mut [f32], right: &mut [f32], _ctx: &RenderCtx) {
        if self.buffer.is_empty() {
            return;
        }
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let sample = self.buffer[self.position];
            self.position = (self.position + 1) % self.buffer.len();
            *l += sample;
            *r += sample;
        }
    }
}
