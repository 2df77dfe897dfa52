// Help bar widget: key bindings for the focused selector.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{Focus, ViewState};

/// Render the help bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();
    for (key, action) in bindings(state.focus) {
        spans.push(Span::styled(
            format!(" {}", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {} ", action), Style::default().fg(Color::Gray)));
    }
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Key/action pairs for the current focus.
pub fn bindings(focus: Focus) -> Vec<(&'static str, &'static str)> {
    let mut keys = match focus {
        Focus::Teams => vec![("←↑↓→", "equipo"), ("Enter", "seleccionar")],
        Focus::Players => vec![("↑↓", "jugador"), ("Esc", "equipos")],
    };
    keys.extend([
        ("Tab", "foco"),
        ("[ ]", "jugador"),
        ("+/-", "minutos"),
        ("e", "exportar"),
        ("q", "salir"),
    ]);
    keys
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
