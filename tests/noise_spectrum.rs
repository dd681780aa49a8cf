//! Spectral-slope checks for the colored-noise generator.
//!
//! Qualitative, not bit-exact: averaged over a 2-second buffer, low-band
//! energy relative to high-band energy must order brown > pink > white,
//! matching the -6 / -3 / 0 dB-per-octave slopes.

use drift_dsp::dsp::noise::{self, NoiseColor};
use rustfft::{num_complex::Complex, FftPlanner};

const SAMPLE_RATE: f32 = 48_000.0;
const FFT_SIZE: usize = 8192;

/// Average per-bin power inside [lo_hz, hi_hz), accumulated over every
/// full FFT segment of the buffer.
fn band_power(spectrum: &[f64], lo_hz: f64, hi_hz: f64) -> f64 {
    let hz_per_bin = f64::from(SAMPLE_RATE) / FFT_SIZE as f64;
    let lo = (lo_hz / hz_per_bin) as usize;
    let hi = ((hi_hz / hz_per_bin) as usize).min(spectrum.len());
    assert!(hi > lo);
    spectrum[lo..hi].iter().sum::<f64>() / (hi - lo) as f64
}

/// Low-band / high-band power ratio of one generated buffer.
fn tilt(color: NoiseColor) -> f64 {
    let buffer = noise::generate(color, 2.0, SAMPLE_RATE);
    let fft = FftPlanner::new().plan_fft_forward(FFT_SIZE);

    let mut accumulated = vec![0.0f64; FFT_SIZE / 2];
    let mut segments = 0;
    for segment in buffer.chunks_exact(FFT_SIZE) {
        let mut scratch: Vec<Complex<f32>> =
            segment.iter().map(|&s| Complex::new(s, 0.0)).collect();
        fft.process(&mut scratch);
        for (acc, bin) in accumulated.iter_mut().zip(scratch.iter()) {
            *acc += f64::from(bin.re * bin.re + bin.im * bin.im);
        }
        segments += 1;
    }
    assert!(segments > 0);

    band_power(&accumulated, 40.0, 200.0) / band_power(&accumulated, 2_000.0, 8_000.0)
}

#[test]
fn spectral_tilt_orders_brown_pink_white() {
    let white = tilt(NoiseColor::White);
    let pink = tilt(NoiseColor::Pink);
    let brown = tilt(NoiseColor::Brown);

    // White is flat, so its ratio sits near 1; each step down in color
    // steepens the slope by ~3 dB/octave. A factor-of-two margin keeps
    // the stochastic run-to-run variance from flaking the ordering.
    assert!(
        pink > white * 2.0,
        "pink ({pink:.1}) not steeper than white ({white:.1})"
    );
    assert!(
        brown > pink * 2.0,
        "brown ({brown:.1}) not steeper than pink ({pink:.1})"
    );
    assert!(white < 5.0, "white noise is not spectrally flat: {white:.1}");
}
