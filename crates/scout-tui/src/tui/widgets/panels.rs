// Metric panels widget: the selected player's four metric groups side by side.
//
// Each panel is a label/value table under its caption. A panel whose record
// is missing columns shows the error in place; the other panels still render.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use scout_core::panels::{Panel, PanelError, PanelKind};
use scout_core::session::{DashboardView, PlayerDetail};

use crate::tui::ViewState;

const VALUE_HEADER: &str = "Valor";

/// Render the four metric panels, one per area, in `PanelKind::ALL` order.
pub fn render(frame: &mut Frame, areas: &[Rect; 4], state: &ViewState) {
    let detail = selected_detail(&state.view);

    for (kind, area) in PanelKind::ALL.into_iter().zip(areas.iter().copied()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(kind.title());

        match detail.and_then(|d| panel_result(d, kind)) {
            None => {
                let paragraph = Paragraph::new("  Sin jugador seleccionado.")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block);
                frame.render_widget(paragraph, area);
            }
            Some(Err(err)) => {
                let paragraph = Paragraph::new(err.to_string())
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true })
                    .block(block);
                frame.render_widget(paragraph, area);
            }
            Some(Ok(panel)) => render_panel(frame, area, block, panel),
        }
    }
}

fn render_panel(frame: &mut Frame, area: Rect, block: Block, panel: &Panel) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [caption_area, table_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

    frame.render_widget(
        Paragraph::new(panel.kind.caption()).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
        caption_area,
    );

    let header = Row::new(vec![Cell::from("Métrica"), Cell::from(VALUE_HEADER)])
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let display = panel.display_rows();
    let rows: Vec<Row> = display
        .iter()
        .cloned()
        .map(|(label, value)| {
            Row::new(vec![
                Cell::from(label),
                Cell::from(value).style(Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();

    let widths = [Constraint::Min(12), Constraint::Length(value_width(&display))];
    frame.render_widget(Table::new(rows, widths).header(header), table_area);
}

/// Width of the value column: the widest value or the header, whichever is
/// larger.
pub fn value_width(rows: &[(&'static str, String)]) -> u16 {
    let widest = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0)
        .max(VALUE_HEADER.chars().count());
    u16::try_from(widest).unwrap_or(u16::MAX)
}

fn selected_detail(view: &DashboardView) -> Option<&PlayerDetail> {
    match view {
        DashboardView::Roster { player, .. } => player.as_ref(),
        _ => None,
    }
}

/// The build result for one panel kind of the selected player.
pub fn panel_result(detail: &PlayerDetail, kind: PanelKind) -> Option<Result<&Panel, &PanelError>> {
    detail
        .panels
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, result)| result.as_ref())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::test_state;

    fn areas() -> [Rect; 4] {
        [
            Rect::new(0, 0, 40, 11),
            Rect::new(40, 0, 40, 11),
            Rect::new(80, 0, 40, 11),
            Rect::new(120, 0, 40, 11),
        ]
    }

    #[test]
    fn panel_results_follow_record_columns() {
        let mut state = test_state(300);
        state.select_team_at_cursor();
        let detail = selected_detail(&state.view).expect("player selected");

        // The test dataset only carries the team weight columns in full.
        assert!(matches!(panel_result(detail, PanelKind::Usage), Some(Err(_))));
        assert!(matches!(panel_result(detail, PanelKind::TeamWeight), Some(Ok(_))));
    }

    #[test]
    fn value_column_fits_the_widest_value() {
        let rows = vec![
            ("Convocados", "20".to_string()),
            ("Confianza CT", "Muy alta (titular fijo)".to_string()),
        ];
        assert_eq!(value_width(&rows), 23);
        assert_eq!(value_width(&[("Rojas", "0".to_string())]), 5);
        assert_eq!(value_width(&[]), 5);
    }

    #[test]
    fn long_text_values_render_in_full() {
        let csv_data = "\
Jugador,Equipo,Minutos,Peso_Equipo,Rank_Peso_Equipo
Pablo Ruiz,Benferri Cf,123456789,0.77,1";
        let table = std::sync::Arc::new(scout_core::dataset::Table::from_reader(csv_data.as_bytes()).unwrap());
        let mut session = scout_core::session::Session::new(table, 0);
        session.select_team("Benferri Cf");
        let state = ViewState::new(session, &scout_core::catalog::TeamCatalog::league(), 6, 50);

        let backend = ratatui::backend::TestBackend::new(160, 11);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let areas = areas();
        terminal.draw(|frame| render(frame, &areas, &state)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("123456789"));
    }

    #[test]
    fn no_detail_without_roster() {
        let state = test_state(300);
        assert!(selected_detail(&state.view).is_none());
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(160, 11);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = test_state(300);
        let areas = areas();
        terminal.draw(|frame| render(frame, &areas, &state)).unwrap();

        state.select_team_at_cursor();
        terminal.draw(|frame| render(frame, &areas, &state)).unwrap();
    }
}
