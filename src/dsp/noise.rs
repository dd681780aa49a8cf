use rand::{rngs::SmallRng, Rng, SeedableRng};

/*
Colored Noise Synthesis
=======================

Noise is classified by the slope of its power spectral density:

White: flat spectrum - equal power at every frequency.
  - Sound: bright hiss, like an untuned FM radio
  - Each sample is drawn independently and uniformly from [-1, 1]

Pink: -3 dB/octave - equal power per octave.
  - Sound: balanced, "natural" rushing water
  - Produced here with Paul Kellet's 6-pole IIR approximation: six leaky
    one-pole filters at staggered time constants, summed. The coefficient
    set is a well-known empirical fit; it is reproduced verbatim and must
    not be re-derived. Note the quirk: the b6 term is computed from the
    PREVIOUS iteration's white sample and added to the current output
    before its own update. That ordering is part of the fit.

Brown: -6 dB/octave - power concentrated at the bottom.
  - Sound: deep rumble, distant surf
  - A leaky integrator of white noise. Integration attenuates overall
    energy, so the output is multiplied back up by a fixed gain chosen
    for perceptual loudness parity with the other colors. Calibration
    constant, not derived from a loudness model.

Each call draws fresh random content: two buffers of the same color never
match, but share the same statistical spectrum. Callers loop the buffer
for continuous playback.
*/

/// Leak factor of the brown-noise integrator.
const BROWN_LEAK: f32 = 0.02;
/// Restores audible amplitude after the integration loss.
const BROWN_GAIN: f32 = 3.5;
/// Output scaling of the summed pink-noise poles.
const PINK_GAIN: f32 = 0.11;

/// Spectral color of a generated noise buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseColor {
    White,
    Pink,
    Brown,
}

impl NoiseColor {
    pub fn label(self) -> &'static str {
        match self {
            NoiseColor::White => "white",
            NoiseColor::Pink => "pink",
            NoiseColor::Brown => "brown",
        }
    }
}

/// Generate a monophonic noise buffer of the given color.
///
/// State is fresh on every call: the RNG is seeded from entropy and the
/// filter state starts at zero, so repeated calls yield different content
/// of the same color.
pub fn generate(color: NoiseColor, duration_secs: f32, sample_rate: f32) -> Vec<f32> {
    let len = (duration_secs * sample_rate) as usize;
    let mut rng = SmallRng::from_entropy();

    match color {
        NoiseColor::White => white(len, &mut rng),
        NoiseColor::Pink => pink(len, &mut rng),
        NoiseColor::Brown => brown(len, &mut rng),
    }
}

fn white_sample(rng: &mut SmallRng) -> f32 {
    rng.gen::<f32>() * 2.0 - 1.0
}

fn white(len: usize, rng: &mut SmallRng) -> Vec<f32> {
    (0..len).map(|_| white_sample(rng)).collect()
}

fn brown(len: usize, rng: &mut SmallRng) -> Vec<f32> {
    let mut out = Vec::with_capacity(len);
    let mut last = 0.0f32;
    for _ in 0..len {
        let white = white_sample(rng);
        // Leaky integrator; the filter state tracks the pre-gain value.
        last = (last + BROWN_LEAK * white) / (1.0 + BROWN_LEAK);
        out.push(last * BROWN_GAIN);
    }
    out
}

fn pink(len: usize, rng: &mut SmallRng) -> Vec<f32> {
    let mut out = Vec::with_capacity(len);
    let (mut b0, mut b1, mut b2, mut b3, mut b4, mut b5, mut b6) =
        (0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32);
    for _ in 0..len {
        let white = white_sample(rng);
        b0 = 0.99886 * b0 + white * 0.0555179;
        b1 = 0.99332 * b1 + white * 0.0750759;
        b2 = 0.96900 * b2 + white * 0.1538520;
        b3 = 0.86650 * b3 + white * 0.3104856;
        b4 = 0.55000 * b4 + white * 0.5329522;
        b5 = -0.7616 * b5 - white * 0.0168980;
        // b6 still holds the previous iteration's value here.
        out.push((b0 + b1 + b2 + b3 + b4 + b5 + b6 + white * 0.5362) * PINK_GAIN);
        b6 = white * 0.115926;
    }
    out
}
