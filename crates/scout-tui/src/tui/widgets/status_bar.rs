// Status bar widget: minutes threshold, selected team, last feedback message.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{StatusMessage, ViewState};

/// Render the status bar into the given area.
///
/// Layout: [threshold] | [team] | [status message]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", threshold_label(state.session.min_minutes(), state.max_minutes)),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(
            team_label(state.session.team()),
            Style::default().fg(Color::White),
        ),
    ];

    if let Some(status) = &state.status {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(status_span(status));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "Minutos ≥ 300 (máx 1400)"
pub fn threshold_label(min_minutes: u32, max_minutes: u32) -> String {
    format!("Minutos ≥ {} (máx {})", min_minutes, max_minutes)
}

pub fn team_label(team: Option<&str>) -> String {
    match team {
        Some(team) => format!("Equipo: {}", team),
        None => "Equipo: -".to_string(),
    }
}

fn status_span(status: &StatusMessage) -> Span<'static> {
    match status {
        StatusMessage::Info(msg) => Span::styled(msg.clone(), Style::default().fg(Color::Green)),
        StatusMessage::Error(msg) => Span::styled(msg.clone(), Style::default().fg(Color::Red)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
