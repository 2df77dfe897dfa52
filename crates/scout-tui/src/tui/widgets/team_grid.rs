// Team grid widget: every selectable team laid out in fixed-width columns.
//
// The cursor cell is reversed, the selected team is bold green. Teams without
// a logo (present only in the dataset) are marked with '*'.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use scout_core::catalog::TeamEntry;

use crate::tui::{Focus, ViewState};

/// Render the team grid into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let selected = state.session.team();
    let focused = state.focus == Focus::Teams;

    let rows: Vec<Row> = state
        .teams
        .chunks(state.grid_columns)
        .enumerate()
        .map(|(row_idx, chunk)| {
            let cells: Vec<Cell> = chunk
                .iter()
                .enumerate()
                .map(|(col_idx, entry)| {
                    let index = row_idx * state.grid_columns + col_idx;
                    let style = cell_style(
                        index == state.team_cursor,
                        focused,
                        selected == Some(entry.name.as_str()),
                    );
                    Cell::from(cell_text(entry)).style(style)
                })
                .collect();
            Row::new(cells)
        })
        .collect();

    let widths = vec![Constraint::Ratio(1, state.grid_columns as u32); state.grid_columns];

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let table = Table::new(rows, widths).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!("Equipos ({})", state.teams.len())),
    );
    frame.render_widget(table, area);
}

/// Display text for a grid cell.
pub fn cell_text(entry: &TeamEntry) -> String {
    if entry.logo.is_some() {
        entry.name.clone()
    } else {
        format!("{} *", entry.name)
    }
}

fn cell_style(is_cursor: bool, focused: bool, is_selected: bool) -> Style {
    let mut style = if is_selected {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    if is_cursor && focused {
        style = style.add_modifier(Modifier::REVERSED);
    } else if is_cursor {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
