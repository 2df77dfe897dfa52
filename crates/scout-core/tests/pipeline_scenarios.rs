// Integration tests for the scouting pipeline.
//
// These run the public API end to end against a 20-row, three-team fixture:
// loader → minutes filter → team filter → player selection → panels → export.

use std::path::PathBuf;
use std::sync::Arc;

use scout_core::catalog::TeamCatalog;
use scout_core::dataset::{DatasetError, DatasetLoader, Table};
use scout_core::export::write_table;
use scout_core::panels::{build_panel, PanelKind};
use scout_core::pipeline::{
    filter_by_min_minutes, filter_by_team, player_options, roster_view, select_player,
    team_names, SelectionError,
};
use scout_core::session::{DashboardView, Session};

// ===========================================================================
// Test helpers
// ===========================================================================

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/players.csv")
}

fn load_fixture() -> Arc<Table> {
    DatasetLoader::new(vec![fixture_path()])
        .load()
        .expect("fixture should load")
}

// ===========================================================================
// Loader
// ===========================================================================

#[test]
fn fixture_loads_all_rows() {
    let table = load_fixture();
    assert_eq!(table.len(), 20);
    assert_eq!(table.headers().len(), 24);
    assert_eq!(team_names(&table), vec!["Muro Cf", "Novelda Cf", "Santa Pola Cf"]);
    assert_eq!(table.max_minutes(), 1400);
}

#[test]
fn loader_falls_through_missing_candidates() {
    let loader = DatasetLoader::new(vec![
        PathBuf::from("/definitely/not/here/df.csv"),
        fixture_path(),
    ]);
    assert_eq!(loader.load().unwrap().len(), 20);
}

#[test]
fn loader_without_any_file_is_data_unavailable() {
    let loader = DatasetLoader::new(vec![PathBuf::from("/definitely/not/here/df.csv")]);
    assert!(matches!(loader.load(), Err(DatasetError::NotFound { .. })));
}

// ===========================================================================
// Filter properties
// ===========================================================================

#[test]
fn min_minutes_matches_predicate_for_every_threshold() {
    let table = load_fixture();
    let mut previous = table.len();
    for threshold in (0..=1500).step_by(10) {
        let filtered = filter_by_min_minutes(&table, threshold);
        let expected: Vec<&str> = table
            .records()
            .iter()
            .filter(|r| r.minutes() >= f64::from(threshold))
            .map(|r| r.name())
            .collect();
        let actual: Vec<&str> = filtered.records().iter().map(|r| r.name()).collect();
        assert_eq!(actual, expected, "threshold {threshold}");
        assert!(filtered.len() <= previous);
        previous = filtered.len();
    }
}

#[test]
fn team_filter_returns_only_that_team() {
    let table = load_fixture();
    for team in team_names(&table) {
        let filtered = filter_by_team(&table, &team);
        assert!(!filtered.is_empty());
        assert!(filtered.records().iter().all(|r| r.team() == team));
    }
    assert!(filter_by_team(&table, "Villena Cf").is_empty());
}

#[test]
fn composed_selection_respects_both_filters() {
    let table = load_fixture();
    for threshold in [0, 300, 900] {
        for team in team_names(&table) {
            let view = filter_by_team(&filter_by_min_minutes(&table, threshold), &team);
            for name in player_options(&table) {
                match select_player(&view, &name) {
                    Ok(rec) => {
                        assert_eq!(rec.team(), team);
                        assert!(rec.minutes() >= f64::from(threshold));
                    }
                    Err(SelectionError::PlayerNotFound { .. }) => {}
                }
            }
        }
    }
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn threshold_300_scenario() {
    let table = load_fixture();
    let eligible = filter_by_min_minutes(&table, 300);
    assert_eq!(table.len() - eligible.len(), 5);

    let muro = filter_by_team(&eligible, "Muro Cf");
    assert_eq!(muro.len(), 4);

    // Plays for Novelda, not Muro.
    let err = select_player(&muro, "Ivan Gil").unwrap_err();
    assert!(matches!(err, SelectionError::PlayerNotFound { .. }));

    // Same name in two teams resolves within the team view.
    let pablo = select_player(&muro, "Pablo Ruiz").unwrap();
    assert_eq!(pablo.team(), "Muro Cf");
    assert_eq!(pablo.minutes(), 1250.0);

    // Roster is below-threshold-free and ordered by minutes.
    let roster = roster_view("Muro Cf", &muro);
    let names: Vec<&str> = roster.rows.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(names, vec!["Pablo Ruiz", "Javi Soler", "Marc Ferrer", "Sergio Vidal"]);
}

#[test]
fn threshold_above_everything_empties_roster() {
    let table = load_fixture();
    let mut session = Session::new(Arc::clone(&table), table.max_minutes() + 1);
    session.select_team("Muro Cf");
    assert!(matches!(session.view(), DashboardView::EmptyRoster { .. }));
    assert!(session.player().is_none());
    assert!(session.select_player("Pablo Ruiz").is_err());
}

#[test]
fn impact_and_usage_panels_for_fixture_player() {
    let table = load_fixture();
    let muro = filter_by_team(&table, "Muro Cf");
    let pablo = select_player(&muro, "Pablo Ruiz").unwrap();

    let impact = build_panel(PanelKind::Impact, pablo).unwrap();
    let rows = impact.display_rows();
    assert_eq!(rows[0], ("Minutos", "1250".to_string()));
    assert_eq!(rows[1], ("Partidos 90", "13.89".to_string()));
    assert_eq!(rows[3], ("Goles por 90", "0.65".to_string()));

    let usage = build_panel(PanelKind::Usage, pablo).unwrap();
    assert_eq!(usage.display_rows()[3], ("% Titularidad real", "87.5%".to_string()));

    // Float-encoded minutes render without a decimal point.
    let marc = select_player(&muro, "Marc Ferrer").unwrap();
    let weight = build_panel(PanelKind::TeamWeight, marc).unwrap();
    assert_eq!(weight.display_rows()[2], ("Minutos jugados", "860".to_string()));
}

#[test]
fn goals_p90_and_start_pct_rounding() {
    let csv_data = "\
Jugador,Equipo,Minutos,Convocados,Partidos_Jugados,Partidos_Titular,Pct_Titularidad_Real,Minutos_por_Convocatoria,Confianza_CT,Partidos_90,Goles,Goles_p90,Impacto_Ofensivo,Rank_Impacto_Ofensivo
Test Player,Muro Cf,900,12,9,6,66.666,75.0,0.7,10.0,4,0.456,0.9,2";
    let table = Table::from_reader(csv_data.as_bytes()).unwrap();
    let rec = &table.records()[0];

    let impact = build_panel(PanelKind::Impact, rec).unwrap();
    assert_eq!(impact.display_rows()[3].1, "0.46");

    let usage = build_panel(PanelKind::Usage, rec).unwrap();
    assert_eq!(usage.display_rows()[3].1, "66.7%");
}

#[test]
fn export_of_filtered_roster_round_trips() {
    let table = load_fixture();
    let roster = filter_by_team(&filter_by_min_minutes(&table, 300), "Santa Pola Cf");

    let mut out = Vec::new();
    write_table(&roster, &mut out, b',').unwrap();
    let reparsed = Table::from_reader(out.as_slice()).unwrap();

    assert_eq!(reparsed, roster);
    assert_eq!(reparsed.headers(), table.headers());
}

#[test]
fn every_dataset_team_is_selectable() {
    let table = load_fixture();
    let teams = TeamCatalog::league().selectable(&table);
    for name in team_names(&table) {
        assert!(teams.iter().any(|t| t.name == name), "{name} not selectable");
    }
}
