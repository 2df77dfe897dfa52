// Roster widget: the selected team's players above the minutes threshold.
//
// Rows come pre-sorted by minutes from the core roster view. The selected
// player's row is highlighted.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use scout_core::pipeline::{RosterView, ROSTER_COLUMNS};
use scout_core::session::DashboardView;

use crate::tui::ViewState;

/// Shown when the threshold leaves the team without players.
pub const EMPTY_ROSTER_MESSAGE: &str = "No hay jugadores con ese filtro de minutos.";

/// Shown before any team is selected.
pub const NO_TEAM_MESSAGE: &str = "Selecciona un equipo en la cuadrícula (Enter).";

/// Render the roster table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    match &state.view {
        DashboardView::NoTeam => render_message(frame, area, "Plantel".to_string(), NO_TEAM_MESSAGE),
        DashboardView::EmptyRoster { team, min_minutes } => render_message(
            frame,
            area,
            title(team, 0, *min_minutes),
            EMPTY_ROSTER_MESSAGE,
        ),
        DashboardView::Roster { roster, .. } => {
            render_table(frame, area, roster, state.session.player(), state.session.min_minutes())
        }
    }
}

fn render_message(frame: &mut Frame, area: Rect, title: String, message: &str) {
    let paragraph = Paragraph::new(format!("  {}", message))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    roster: &RosterView,
    selected: Option<&str>,
    min_minutes: u32,
) {
    let header = Row::new(ROSTER_COLUMNS.into_iter().map(|c| Cell::from(header_label(c))))
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = roster
        .rows
        .iter()
        .map(|row| {
            let style = if selected == Some(row.player.as_str()) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(row.cells.iter().map(|c| Cell::from(c.clone()))).style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(18),
        Constraint::Length(12),
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title(&roster.team, roster.rows.len(), min_minutes)),
    );
    frame.render_widget(table, area);
}

/// Short column header for the narrow roster table.
pub fn header_label(column: &str) -> &str {
    match column {
        "Posicion_Limpia" => "Posición",
        "Partidos_Jugados" => "PJ",
        "Pct_Titularidad_Real" => "% Tit.",
        "Goles_p90" => "G/90",
        "Tarjetas_Totales" => "Tarj.",
        other => other,
    }
}

pub fn title(team: &str, players: usize, min_minutes: u32) -> String {
    format!("Plantel: {} ({} jugadores, ≥ {} min)", team, players, min_minutes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::test_state;

    #[test]
    fn header_labels_shorten_long_columns() {
        assert_eq!(header_label("Jugador"), "Jugador");
        assert_eq!(header_label("Pct_Titularidad_Real"), "% Tit.");
        assert_eq!(header_label("Goles_p90"), "G/90");
    }

    #[test]
    fn title_includes_threshold() {
        assert_eq!(
            title("Muro Cf", 4, 300),
            "Plantel: Muro Cf (4 jugadores, ≥ 300 min)"
        );
    }

    fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn empty_roster_shows_message() {
        let backend = ratatui::backend::TestBackend::new(100, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = test_state(5000);
        state.select_team_at_cursor();
        terminal.draw(|frame| render(frame, frame.area(), &state)).unwrap();
        assert!(buffer_text(&terminal).contains("No hay jugadores"));
    }

    #[test]
    fn render_does_not_panic_with_roster() {
        let backend = ratatui::backend::TestBackend::new(100, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = test_state(0);
        terminal.draw(|frame| render(frame, frame.area(), &state)).unwrap();

        state.select_team_at_cursor();
        terminal.draw(|frame| render(frame, frame.area(), &state)).unwrap();
        assert!(buffer_text(&terminal).contains("Pablo Ruiz"));
    }
}
