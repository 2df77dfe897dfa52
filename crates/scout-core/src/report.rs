// Plain-text presenter.
//
// Renders a dashboard view as text, for the non-interactive CLI mode, logs
// and tests. Panels are built here from the record so each one can fail on
// its own without affecting the others.

use std::fmt::Write as _;

use crate::dataset::PlayerRecord;
use crate::panels::build_panels;
use crate::pipeline::{RosterView, ROSTER_COLUMNS};
use crate::session::Presenter;

/// Collects rendered text in memory.
#[derive(Debug, Default, Clone)]
pub struct TextPresenter {
    out: String,
}

impl TextPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl Presenter for TextPresenter {
    fn render_roster(&mut self, roster: &RosterView) {
        let _ = writeln!(self.out, "Plantel: {} ({} jugadores)", roster.team, roster.rows.len());
        let _ = writeln!(self.out, "{}", ROSTER_COLUMNS.join(" | "));
        for row in &roster.rows {
            let _ = writeln!(self.out, "{}", row.cells.join(" | "));
        }
        self.out.push('\n');
    }

    fn render_player_panels(&mut self, record: &PlayerRecord) {
        let _ = writeln!(self.out, "Jugador: {} ({})", record.name(), record.team());
        for (kind, result) in build_panels(record) {
            let _ = writeln!(self.out, "\n[{}]", kind.title());
            match result {
                Ok(panel) => {
                    let _ = writeln!(self.out, "{}", kind.caption());
                    for (label, value) in panel.display_rows() {
                        let _ = writeln!(self.out, "  {label}: {value}");
                    }
                }
                Err(err) => {
                    let _ = writeln!(self.out, "  error: {err}");
                }
            }
        }
    }

    fn render_empty_roster(&mut self, team: &str, min_minutes: u32) {
        let _ = writeln!(
            self.out,
            "Plantel: {team} (mínimo {min_minutes} minutos)\nNo hay jugadores con ese filtro de minutos."
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
