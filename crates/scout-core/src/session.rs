// Per-user selection context.
//
// The dataset is shared read-only; each session owns its own threshold, team
// and player. Every change recomputes the pipeline synchronously from the
// shared table. Failed selections leave the previous state untouched.

use std::sync::Arc;

use tracing::debug;

use crate::dataset::{PlayerRecord, Table};
use crate::panels::{build_panels, Panel, PanelError, PanelKind};
use crate::pipeline::{
    filter_by_min_minutes, filter_by_team, player_options, roster_view, select_player,
    RosterView, SelectionError,
};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no team selected")]
    NoTeamSelected,

    #[error("no players in '{team}' with at least {min_minutes} minutes")]
    EmptyRoster { team: String, min_minutes: u32 },

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// The selected player and their four panels, each of which may have failed
/// on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerDetail {
    pub record: PlayerRecord,
    pub panels: Vec<(PanelKind, Result<Panel, PanelError>)>,
}

/// What the dashboard shows for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// Nothing picked yet.
    NoTeam,
    /// The team has no players at or above the threshold.
    EmptyRoster { team: String, min_minutes: u32 },
    Roster {
        roster: RosterView,
        /// Sorted player names for the selector.
        players: Vec<String>,
        player: Option<PlayerDetail>,
    },
}

/// Presentation seam: anything that can show a roster and a player's panels.
pub trait Presenter {
    fn render_roster(&mut self, roster: &RosterView);

    fn render_player_panels(&mut self, record: &PlayerRecord);

    fn render_empty_roster(&mut self, _team: &str, _min_minutes: u32) {}
}

impl DashboardView {
    /// Drive a presenter with this view.
    pub fn present<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        match self {
            DashboardView::NoTeam => {}
            DashboardView::EmptyRoster { team, min_minutes } => {
                presenter.render_empty_roster(team, *min_minutes)
            }
            DashboardView::Roster { roster, player, .. } => {
                presenter.render_roster(roster);
                if let Some(detail) = player {
                    presenter.render_player_panels(&detail.record);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Session {
    dataset: Arc<Table>,
    min_minutes: u32,
    team: Option<String>,
    player: Option<String>,
}

impl Session {
    pub fn new(dataset: Arc<Table>, min_minutes: u32) -> Self {
        Session {
            dataset,
            min_minutes,
            team: None,
            player: None,
        }
    }

    pub fn dataset(&self) -> &Arc<Table> {
        &self.dataset
    }

    pub fn min_minutes(&self) -> u32 {
        self.min_minutes
    }

    pub fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    /// Minutes-filtered table: what every roster is drawn from.
    pub fn eligible(&self) -> Table {
        filter_by_min_minutes(&self.dataset, self.min_minutes)
    }

    /// Minutes- and team-filtered table, or `None` without a team.
    pub fn team_table(&self) -> Option<Table> {
        self.team
            .as_deref()
            .map(|team| filter_by_team(&self.eligible(), team))
    }

    /// Change the threshold. The current player is kept if still visible,
    /// otherwise the first remaining player is picked.
    pub fn set_min_minutes(&mut self, threshold: u32) {
        self.min_minutes = threshold;
        self.refresh_player();
        debug!("min minutes set to {}", threshold);
    }

    /// Select a team (any name; unknown teams show an empty roster) and
    /// default to its first player.
    pub fn select_team(&mut self, team: &str) {
        self.team = Some(team.to_string());
        self.player = None;
        self.refresh_player();
        debug!("team selected: {} (player: {:?})", team, self.player);
    }

    /// Select a player from the current team view.
    pub fn select_player(&mut self, player: &str) -> Result<(), SessionError> {
        let team = self.team.clone().ok_or(SessionError::NoTeamSelected)?;
        let table = filter_by_team(&self.eligible(), &team);
        if table.is_empty() {
            return Err(SessionError::EmptyRoster {
                team,
                min_minutes: self.min_minutes,
            });
        }
        let record = select_player(&table, player)?;
        self.player = Some(record.name().to_string());
        Ok(())
    }

    fn refresh_player(&mut self) {
        let Some(table) = self.team_table() else {
            self.player = None;
            return;
        };
        let still_visible = self
            .player
            .as_deref()
            .is_some_and(|p| select_player(&table, p).is_ok());
        if !still_visible {
            self.player = player_options(&table).into_iter().next();
        }
    }

    /// Recompute the full view for the current selection.
    pub fn view(&self) -> DashboardView {
        let Some(team) = self.team.as_deref() else {
            return DashboardView::NoTeam;
        };
        let table = filter_by_team(&self.eligible(), team);
        if table.is_empty() {
            return DashboardView::EmptyRoster {
                team: team.to_string(),
                min_minutes: self.min_minutes,
            };
        }

        let player = self
            .player
            .as_deref()
            .and_then(|p| select_player(&table, p).ok())
            .map(|record| PlayerDetail {
                record: record.clone(),
                panels: build_panels(record),
            });

        DashboardView::Roster {
            roster: roster_view(team, &table),
            players: player_options(&table),
            player,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
