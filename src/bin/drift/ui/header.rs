//! Transport header - mode, play state, synthesis readout, volume, timer

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Snapshot;

/// Render the transport header.
pub fn render_header(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let block = Block::default().title(" drift ").borders(Borders::ALL);

    let state = snap.state;
    let play_symbol = if state.is_playing() { "▶" } else { "⏸" };
    let play_state_str = if state.is_playing() { "Playing" } else { "Paused" };
    let noise_name = state.noise().map(|n| n.label()).unwrap_or("none");

    let mut spans = vec![
        Span::styled(
            format!(" {}  ", state.mode().label()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{play_symbol} {play_state_str}  "),
            Style::default().fg(if state.is_playing() {
                Color::Green
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(
            format!("Bio-Sync: {:.0} Hz  ", state.binaural_freq()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Resonance: {noise_name}  "),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!("Vol: {:>3}%  ", state.volume()),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if let Some(remaining) = snap.remaining {
        let total = remaining.as_secs();
        spans.push(Span::styled(
            format!("Session: {}:{:02}", total / 60, total % 60),
            Style::default().fg(Color::White),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
