//! Spectrum view of the rendered mix
//!
//! FFT magnitudes sampled at log-spaced frequencies, so the noise bed's
//! spectral tilt and the 200 Hz carrier both stay visible on screen.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Number of log-spaced frequency points to display.
const SPECTRUM_POINTS: usize = 40;

/// FFT-based spectrum analyzer over the visualization window.
pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    /// (display frequency Hz, FFT bin index) per point
    points: Vec<(f64, usize)>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// Current data: (frequency_hz, magnitude_db)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(buffer_len);

        // Hann window against spectral leakage
        let denom = buffer_len.saturating_sub(1).max(1) as f32;
        let window: Vec<f32> = (0..buffer_len)
            .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos()))
            .collect();

        // Log-spaced points from 20 Hz to Nyquist
        let half = (buffer_len / 2).max(1);
        let max_freq = f64::from((sample_rate / 2.0).max(40.0));
        let min_freq = 20.0f64;
        let ratio = max_freq / min_freq;
        let points: Vec<(f64, usize)> = (0..SPECTRUM_POINTS)
            .map(|i| {
                let t = i as f64 / (SPECTRUM_POINTS - 1) as f64;
                let freq = min_freq * ratio.powf(t);
                let index = ((freq * buffer_len as f64 / f64::from(sample_rate)).round() as usize)
                    .min(half - 1);
                (freq, index)
            })
            .collect();

        let spectrum = points.iter().map(|&(f, _)| (f, -100.0)).collect();
        Self {
            window,
            points,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum,
        }
    }

    /// Recompute the spectrum from a full visualization window.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for (slot, (&sample, &w)) in self
            .scratch
            .iter_mut()
            .zip(buffer.iter().zip(self.window.iter()))
        {
            slot.re = sample * w;
            slot.im = 0.0;
        }
        self.fft.process(&mut self.scratch);

        for (slot, &(freq, index)) in self.spectrum.iter_mut().zip(self.points.iter()) {
            let bin = self.scratch[index];
            let power = f64::from(bin.re * bin.re + bin.im * bin.im).max(1e-12);
            *slot = (freq, 10.0 * power.log10());
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

/// Render the spectrum chart.
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Signal ").borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(spectrum);

    let max_freq = spectrum.iter().map(|(f, _)| *f).fold(1.0, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_freq])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-100.0, 10.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
