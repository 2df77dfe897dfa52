// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Team Grid (one row per grid line + borders)       |
// +-------------------------------+------------------+
// | Roster (65%)                  | Players (35%)    |
// +------------+------------+------------+-----------+
// | Uso / CT   | Impacto    | Disciplina | Peso      |
// +------------+------------+------------+-----------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the metric panel row: the tallest panel (7 metrics), a caption
/// line, a header line and borders.
pub const PANELS_HEIGHT: u16 = 11;

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub team_grid: Rect,
    pub roster: Rect,
    pub players: Rect,
    /// Usage, impact, discipline, team weight, left to right.
    pub panels: [Rect; 4],
    pub help_bar: Rect,
}

/// Build the dashboard layout for `area`, giving the team grid enough room for
/// `grid_rows` lines of team names.
pub fn build_layout(area: Rect, grid_rows: u16) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // status bar
            Constraint::Length(grid_rows + 2), // team grid
            Constraint::Min(6),                // roster + players
            Constraint::Length(PANELS_HEIGHT), // metric panels
            Constraint::Length(1),             // help bar
        ])
        .split(area);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(vertical[2]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(vertical[3]);

    AppLayout {
        status_bar: vertical[0],
        team_grid: vertical[1],
        roster: middle[0],
        players: middle[1],
        panels: [panels[0], panels[1], panels[2], panels[3]],
        help_bar: vertical[4],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
