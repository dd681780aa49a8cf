//! Coach panel - intention input and the current recommendation

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::Snapshot;

/// Render the coach panel.
pub fn render_coach(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let block = Block::default().title(" Coach ").borders(Borders::ALL);

    let lines: Vec<Line> = if let Some(input) = snap.input {
        vec![
            Line::from(Span::styled(
                "Exprimez votre besoin :",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(vec![
                Span::raw(input.to_string()),
                Span::styled("▏", Style::default().fg(Color::Cyan)),
            ]),
            Line::from(Span::styled(
                "[Enter] Synchroniser  [Esc] Annuler",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    } else if snap.coach_pending {
        vec![Line::from(Span::styled(
            "Calcul...",
            Style::default().fg(Color::Yellow),
        ))]
    } else if let Some(rec) = snap.recommendation {
        vec![
            Line::from(Span::styled(
                format!("\u{201c}{}\u{201d}", rec.understanding),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                rec.mantra.clone(),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Stratégie : {}", rec.strategy),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    } else {
        vec![Line::from(Span::styled(
            "Quelle est votre intention ?  [I] pour écrire",
            Style::default().fg(Color::DarkGray),
        ))]
    };

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
