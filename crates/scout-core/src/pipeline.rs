// Filter/selection pipeline: minutes threshold, team, player.
//
// Applied in that order. Each filter is a pure predicate over the input table
// and returns a new table, so the composition order never changes the final
// record; it does decide what the roster view shows (players under the
// threshold are invisible at roster level).

use std::collections::BTreeSet;

use crate::dataset::{columns, PlayerRecord, Table};
use crate::panels::{fmt_decimal, fmt_int, fmt_pct};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("player '{player}' not found in the current view of '{team}'")]
    PlayerNotFound { player: String, team: String },
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Keep rows with `Minutos >= threshold`. A threshold of 0 keeps everything;
/// one above every row yields an empty table.
pub fn filter_by_min_minutes(table: &Table, threshold: u32) -> Table {
    let threshold = f64::from(threshold);
    table.retain(|r| r.minutes() >= threshold)
}

/// Keep rows whose `Equipo` equals `team` exactly (case-sensitive).
pub fn filter_by_team(table: &Table, team: &str) -> Table {
    table.retain(|r| r.team() == team)
}

/// Exact match on `Jugador` within an already team-filtered table.
///
/// If upstream uniqueness is violated the first row in table order wins.
pub fn select_player<'a>(table: &'a Table, player: &str) -> Result<&'a PlayerRecord, SelectionError> {
    table
        .records()
        .iter()
        .find(|r| r.name() == player)
        .ok_or_else(|| SelectionError::PlayerNotFound {
            player: player.to_string(),
            team: table
                .records()
                .first()
                .map(|r| r.team().to_string())
                .unwrap_or_default(),
        })
}

/// Unique player names, sorted ascending. The first entry is the default pick.
pub fn player_options(table: &Table) -> Vec<String> {
    table
        .records()
        .iter()
        .map(|r| r.name().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct team names in first-appearance order.
pub fn team_names(table: &Table) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for r in table.records() {
        if !names.iter().any(|n| n == r.team()) {
            names.push(r.team().to_string());
        }
    }
    names
}

// ---------------------------------------------------------------------------
// Roster view
// ---------------------------------------------------------------------------

/// Columns shown in the team roster table, in display order.
pub const ROSTER_COLUMNS: [&str; 8] = [
    columns::JUGADOR,
    columns::POSICION,
    columns::MINUTOS,
    columns::PARTIDOS_JUGADOS,
    columns::PCT_TITULARIDAD,
    columns::GOLES,
    columns::GOLES_P90,
    columns::TARJETAS_TOTALES,
];

/// Placeholder for cells the upstream row did not provide.
pub const MISSING_CELL: &str = "-";

#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub player: String,
    pub cells: [String; 8],
}

/// The team roster after the minutes filter, most-played first.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterView {
    pub team: String,
    pub rows: Vec<RosterRow>,
}

impl RosterView {
    /// True when the team has no players above the minutes threshold. This is
    /// a reportable state, not an error; player selection must not follow.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the roster view from a minutes- and team-filtered table. Rows are
/// sorted by `Minutos` descending; ties keep table order.
pub fn roster_view(team: &str, table: &Table) -> RosterView {
    let mut records: Vec<&PlayerRecord> = table.records().iter().collect();
    records.sort_by(|a, b| b.minutes().total_cmp(&a.minutes()));

    let rows = records
        .into_iter()
        .map(|r| {
            let s = r.stats();
            let opt = |v: Option<String>| v.unwrap_or_else(|| MISSING_CELL.to_string());
            RosterRow {
                player: r.name().to_string(),
                cells: [
                    r.name().to_string(),
                    opt(s.position.clone()),
                    fmt_int(r.minutes()),
                    opt(s.matches_played.map(fmt_int)),
                    opt(s.start_pct.map(fmt_pct)),
                    opt(s.goals.map(fmt_int)),
                    opt(s.goals_p90.map(|v| fmt_decimal(v, 2))),
                    opt(s.total_cards.map(fmt_int)),
                ],
            }
        })
        .collect();

    RosterView {
        team: team.to_string(),
        rows,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
