// End-to-end dashboard flow: keyboard input against the shared fixture,
// through roster selection, threshold changes, export and rendering.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

use scout_core::catalog::TeamCatalog;
use scout_core::dataset::{DatasetLoader, Table};
use scout_core::session::{DashboardView, Session};
use scout_tui::tui::input::handle_key;
use scout_tui::tui::{render_frame, ExportSettings, Focus, StatusMessage, UserCommand, ViewState};

// ===========================================================================
// Test helpers
// ===========================================================================

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../scout-core/tests/fixtures/players.csv")
}

fn dashboard(min_minutes: u32) -> ViewState {
    let table = DatasetLoader::new(vec![fixture_path()])
        .load()
        .expect("fixture should load");
    ViewState::new(Session::new(table, min_minutes), &TeamCatalog::league(), 6, 50)
}

fn press(state: &mut ViewState, code: KeyCode) -> Option<UserCommand> {
    handle_key(
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        },
        state,
    )
}

fn cursor_to(state: &mut ViewState, team: &str) {
    let index = state
        .teams
        .iter()
        .position(|t| t.name == team)
        .expect("team in grid");
    state.team_cursor = index;
}

// ===========================================================================
// Flows
// ===========================================================================

#[test]
fn pick_team_and_step_through_players() {
    let mut state = dashboard(300);
    cursor_to(&mut state, "Muro Cf");
    press(&mut state, KeyCode::Enter);

    assert_eq!(state.focus, Focus::Players);
    assert_eq!(
        state.players(),
        ["Javi Soler", "Marc Ferrer", "Pablo Ruiz", "Sergio Vidal"]
    );
    assert_eq!(state.session.player(), Some("Javi Soler"));

    press(&mut state, KeyCode::Down);
    press(&mut state, KeyCode::Down);
    assert_eq!(state.session.player(), Some("Pablo Ruiz"));

    let DashboardView::Roster { player: Some(detail), roster, .. } = &state.view else {
        panic!("expected a roster with a selected player");
    };
    assert_eq!(detail.record.minutes(), 1250.0);
    assert_eq!(roster.rows[0].player, "Pablo Ruiz");
    assert!(detail.panels.iter().all(|(_, p)| p.is_ok()));
}

#[test]
fn raising_threshold_past_selection_falls_back_to_first_visible() {
    let mut state = dashboard(300);
    cursor_to(&mut state, "Muro Cf");
    press(&mut state, KeyCode::Enter);
    assert_eq!(state.session.player(), Some("Javi Soler"));

    // 1080 for Javi Soler; 1100 leaves only Pablo Ruiz.
    for _ in 0..16 {
        press(&mut state, KeyCode::Char('+'));
    }
    assert_eq!(state.session.min_minutes(), 1100);
    assert_eq!(state.players(), ["Pablo Ruiz"]);
    assert_eq!(state.session.player(), Some("Pablo Ruiz"));
}

#[test]
fn threshold_is_capped_at_dataset_maximum() {
    let mut state = dashboard(300);
    for _ in 0..100 {
        press(&mut state, KeyCode::Char('+'));
    }
    assert_eq!(state.session.min_minutes(), 1400);

    cursor_to(&mut state, "Muro Cf");
    press(&mut state, KeyCode::Enter);
    assert!(matches!(state.view, DashboardView::EmptyRoster { .. }));
    assert_eq!(state.focus, Focus::Teams);
}

#[test]
fn export_key_writes_the_visible_roster() {
    let dir = std::env::temp_dir().join("scout_tui_flow_export");
    let _ = std::fs::remove_dir_all(&dir);
    let settings = ExportSettings {
        dir: dir.clone(),
        delimiter: b',',
    };

    let mut state = dashboard(300);
    cursor_to(&mut state, "Santa Pola Cf");
    press(&mut state, KeyCode::Enter);
    assert_eq!(press(&mut state, KeyCode::Char('e')), Some(UserCommand::ExportRoster));
    state.export(&settings);

    assert!(matches!(state.status, Some(StatusMessage::Info(_))));
    let path = std::fs::read_dir(&dir)
        .unwrap()
        .next()
        .expect("one export file")
        .unwrap()
        .path();
    let exported = Table::from_path(&path, b',').unwrap();
    assert_eq!(exported.len(), 5);
    assert!(exported.records().iter().all(|r| r.team() == "Santa Pola Cf"));
    assert!(exported.records().iter().all(|r| r.minutes() >= 300.0));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn renders_every_step_of_a_session() {
    let backend = ratatui::backend::TestBackend::new(180, 48);
    let mut terminal = ratatui::Terminal::new(backend).unwrap();
    let mut state = dashboard(300);

    let keys = [
        KeyCode::Right,
        KeyCode::Right,
        KeyCode::Enter,
        KeyCode::Char(']'),
        KeyCode::Char('-'),
        KeyCode::Tab,
        KeyCode::Down,
        KeyCode::Char('q'),
        KeyCode::Char('n'),
    ];
    for key in keys {
        press(&mut state, key);
        terminal.draw(|f| render_frame(f, &state)).unwrap();
    }
}
