//! TUI module for drift
//!
//! Renders the animated backdrop, the transport header, the coach panel
//! and a spectrum view of the rendered mix.

mod backdrop;
mod coach_panel;
mod header;
pub mod spectrum;

use std::time::Duration;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use drift_dsp::coach::Recommendation;
use drift_dsp::state::SoundState;

use backdrop::render_backdrop;
use coach_panel::render_coach;
use header::render_header;
use spectrum::render_spectrum;

/// Everything the renderer needs for one frame, borrowed from the app.
pub struct Snapshot<'a> {
    pub state: &'a SoundState,
    pub recommendation: Option<&'a Recommendation>,
    pub coach_pending: bool,
    /// `Some` while the intention input line is open
    pub input: Option<&'a str>,
    pub remaining: Option<Duration>,
    pub anim_time: f32,
    pub spectrum: &'a [(f64, f64)],
}

/// Render one frame.
pub fn render(frame: &mut Frame, snap: &Snapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Transport header
            Constraint::Min(8),    // Backdrop
            Constraint::Length(7), // Coach panel
            Constraint::Length(8), // Spectrum
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], snap);
    render_backdrop(frame, chunks[1], snap.state, snap.anim_time);
    render_coach(frame, chunks[2], snap);
    render_spectrum(frame, chunks[3], snap.spectrum);

    let help = Paragraph::new(
        " [Space] Play/Pause  [1-4] Mode  [+/-] Volume  [I] Intention  [R] Reset  [Q] Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[4]);
}
