//! Animated backdrop - three drifting orbs in the mode palette
//!
//! Each orb follows its own slow Lissajous orbit, with the three periods
//! staggered
//! at 1.0x / 1.4x / 0.8x of the mode's base period. The animation clock
//! only advances while playing, so pausing freezes the orbs; the palette
//! also dims to a fixed floor while paused. Purely cosmetic - nothing
//! here feeds back into audio state.

use std::f32::consts::TAU;

use ratatui::{
    layout::Rect,
    style::Color,
    widgets::{
        canvas::{Canvas, Circle},
        Block, Borders,
    },
    Frame,
};

use drift_dsp::state::SoundState;

/// Backdrop intensity while paused.
const PAUSED_OPACITY: f32 = 0.3;

/// Phase offsets per orb, in seconds (stagger so orbs never sync up).
const ORB_PHASES: [f32; 3] = [0.0, 2.0, 4.0];

/// Period multipliers per orb.
const ORB_RATES: [f32; 3] = [1.0, 1.4, 0.8];

/// Base orb radii before the theme scale is applied.
const ORB_RADII: [f64; 3] = [0.50, 0.45, 0.40];

fn dimmed((r, g, b): (u8, u8, u8), intensity: f32) -> Color {
    let scale = |c: u8| (f32::from(c) * intensity) as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}

/// Render the backdrop canvas.
pub fn render_backdrop(frame: &mut Frame, area: Rect, state: &SoundState, anim_time: f32) {
    let theme = state.mode().theme();
    let intensity = if state.is_playing() {
        theme.opacity
    } else {
        PAUSED_OPACITY
    };

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL))
        .x_bounds([-1.8, 1.8])
        .y_bounds([-1.2, 1.2])
        .paint(move |ctx| {
            for i in 0..3 {
                let period = theme.period_secs * ORB_RATES[i];
                let t = TAU * (anim_time + ORB_PHASES[i]) / period;
                // Lissajous orbit; the 1.3 ratio keeps the path from
                // closing into a visible loop.
                let x = 0.9 * (t + i as f32).cos();
                let y = 0.6 * (t * 1.3).sin();
                ctx.draw(&Circle {
                    x: f64::from(x),
                    y: f64::from(y),
                    radius: ORB_RADII[i] * f64::from(theme.scale),
                    color: dimmed(theme.palette[i], intensity),
                });
            }
        });

    frame.render_widget(canvas, area);
}
