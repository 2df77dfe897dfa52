// Player list widget: sorted player names of the current roster.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use crate::tui::{Focus, ViewState};

/// Render the player selector into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let players = state.players();
    let focused = state.focus == Focus::Players;

    let items: Vec<ListItem> = players
        .iter()
        .map(|name| ListItem::new(name.clone()))
        .collect();

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!("Jugadores ({})", players.len())),
        )
        .highlight_style(highlight_style(focused))
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(state.player_index());
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn highlight_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
