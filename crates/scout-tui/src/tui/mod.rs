// TUI dashboard: view state, frame rendering and the event loop.
//
// The TUI owns a `ViewState` wrapping one scouting `Session`. Every key press
// that changes the selection recomputes the `DashboardView` synchronously; the
// loop redraws at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tracing::{info, warn};

use scout_core::catalog::{TeamCatalog, TeamEntry};
use scout_core::export::export_roster;
use scout_core::session::{DashboardView, Session};

use layout::build_layout;

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// Which selector the arrow keys drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Teams,
    Players,
}

/// Commands the input handler cannot resolve on `ViewState` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    ExportRoster,
    Quit,
}

/// One-line feedback shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Where and how roster exports are written.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub dir: PathBuf,
    pub delimiter: u8,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the scouting session plus cursor/focus bookkeeping.
pub struct ViewState {
    pub session: Session,
    /// Catalog teams followed by dataset-only teams.
    pub teams: Vec<TeamEntry>,
    pub grid_columns: usize,
    pub team_cursor: usize,
    pub focus: Focus,
    pub minutes_step: u32,
    /// Upper bound of the threshold control (largest `Minutos` in the data).
    pub max_minutes: u32,
    /// Last computed view for the current selection.
    pub view: DashboardView,
    pub status: Option<StatusMessage>,
    pub confirm_quit: bool,
}

impl ViewState {
    pub fn new(session: Session, catalog: &TeamCatalog, grid_columns: usize, minutes_step: u32) -> Self {
        let teams = catalog.selectable(session.dataset());
        let max_minutes = session.dataset().max_minutes();
        let view = session.view();
        // Start on the preselected team, if any.
        let team_cursor = session
            .team()
            .and_then(|t| teams.iter().position(|e| e.name == t))
            .unwrap_or(0);
        let focus = match &view {
            DashboardView::Roster { .. } => Focus::Players,
            _ => Focus::Teams,
        };
        ViewState {
            session,
            teams,
            grid_columns: grid_columns.max(1),
            team_cursor,
            focus,
            minutes_step: minutes_step.max(1),
            max_minutes,
            view,
            status: None,
            confirm_quit: false,
        }
    }

    fn refresh(&mut self) {
        self.view = self.session.view();
    }

    /// Sorted player names of the current roster (empty without one).
    pub fn players(&self) -> &[String] {
        match &self.view {
            DashboardView::Roster { players, .. } => players,
            _ => &[],
        }
    }

    /// Index of the selected player within `players()`.
    pub fn player_index(&self) -> Option<usize> {
        let current = self.session.player()?;
        self.players().iter().position(|p| p == current)
    }

    pub fn raise_threshold(&mut self) {
        let current = self.session.min_minutes();
        let next = current
            .saturating_add(self.minutes_step)
            .min(self.max_minutes.max(current));
        self.set_threshold(next);
    }

    pub fn lower_threshold(&mut self) {
        let next = self.session.min_minutes().saturating_sub(self.minutes_step);
        self.set_threshold(next);
    }

    fn set_threshold(&mut self, threshold: u32) {
        if threshold != self.session.min_minutes() {
            self.session.set_min_minutes(threshold);
            self.refresh();
        }
    }

    /// Move the team cursor by `dx` columns and `dy` rows, clamped to the grid.
    pub fn move_team_cursor(&mut self, dx: isize, dy: isize) {
        if self.teams.is_empty() {
            return;
        }
        let cols = self.grid_columns as isize;
        let last = self.teams.len() as isize - 1;
        let cur = self.team_cursor as isize;
        let next = (cur + dx + dy * cols).clamp(0, last);
        self.team_cursor = next as usize;
    }

    pub fn select_team_at_cursor(&mut self) {
        let Some(entry) = self.teams.get(self.team_cursor) else {
            return;
        };
        let name = entry.name.clone();
        self.session.select_team(&name);
        self.refresh();
        self.status = None;
        if matches!(self.view, DashboardView::Roster { .. }) {
            self.focus = Focus::Players;
        }
    }

    /// Step the player selection by `delta` within the sorted list.
    pub fn move_player(&mut self, delta: isize) {
        let players = self.players();
        if players.is_empty() {
            return;
        }
        let cur = self.player_index().unwrap_or(0) as isize;
        let next = (cur + delta).clamp(0, players.len() as isize - 1) as usize;
        let name = players[next].clone();
        match self.session.select_player(&name) {
            Ok(()) => self.refresh(),
            Err(e) => self.status = Some(StatusMessage::Error(e.to_string())),
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Teams if !self.players().is_empty() => Focus::Players,
            _ => Focus::Teams,
        };
    }

    /// Write the current (minutes- and team-filtered) roster to disk.
    pub fn export(&mut self, settings: &ExportSettings) {
        let (Some(team), Some(table)) = (self.session.team().map(str::to_string), self.session.team_table())
        else {
            self.status = Some(StatusMessage::Error("Selecciona un equipo para exportar.".into()));
            return;
        };
        let today = chrono::Local::now().date_naive();
        self.status = Some(
            match export_roster(&table, &team, &settings.dir, today, settings.delimiter) {
                Ok(path) => StatusMessage::Info(format!("Exportado: {}", path.display())),
                Err(e) => {
                    warn!("roster export failed: {}", e);
                    StatusMessage::Error(e.to_string())
                }
            },
        );
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area(), team_grid_rows(state));

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::team_grid::render(frame, layout.team_grid, state);
    widgets::roster::render(frame, layout.roster, state);
    widgets::player_list::render(frame, layout.players, state);
    widgets::panels::render(frame, &layout.panels, state);
    widgets::help_bar::render(frame, layout.help_bar, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

fn team_grid_rows(state: &ViewState) -> u16 {
    state.teams.len().div_ceil(state.grid_columns).max(1) as u16
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: keyboard input and render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(mut view_state: ViewState, export: ExportSettings) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        match input::handle_key(key_event, &mut view_state) {
                            Some(UserCommand::Quit) => break Ok(()),
                            Some(UserCommand::ExportRoster) => view_state.export(&export),
                            None => {}
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events: the next tick redraws.
                    }
                    Some(Err(e)) => break Err(anyhow::Error::new(e).context("terminal input error")),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::new(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();
    info!("TUI closed");
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
