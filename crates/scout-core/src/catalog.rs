// Team catalog: the league's known teams and their logo assets.
//
// The pipeline only needs team names; logo paths are carried for whatever
// presentation layer wants them. Teams present in the dataset but not in the
// catalog are still listed, without a logo.

use std::collections::HashMap;

use crate::dataset::Table;

/// Built-in FFCV teams, in grid display order.
const LEAGUE_TEAMS: &[&str] = &[
    "Benferri Cf",
    "Betis Florida",
    "Cd El Campello",
    "Cd Montesinos",
    "Catral Castrum Cf",
    "Muro Cf",
    "Santa Pola Cf",
    "Teulada Moraira",
    "Atletico Algorfa",
    "Villena Cf",
    "Cd Almoradi",
    "Novelda Cf",
    "Cd Murada",
    "Atletico Jonense",
    "Callosa Deportiva",
    "Cd Contestano",
];

/// Directory logo assets are resolved against.
pub const LOGO_DIR: &str = "logos";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEntry {
    pub name: String,
    /// `None` for dataset-only teams, rendered as a plain text label.
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TeamCatalog {
    entries: Vec<TeamEntry>,
}

impl TeamCatalog {
    /// The built-in league catalog with `logos/<team>.png` assets.
    pub fn league() -> Self {
        let entries = LEAGUE_TEAMS
            .iter()
            .map(|name| TeamEntry {
                name: (*name).to_string(),
                logo: Some(format!("{LOGO_DIR}/{name}.png")),
            })
            .collect();
        TeamCatalog { entries }
    }

    /// Add or override entries (team name → logo path). New teams are
    /// appended in name order so the grid stays stable between runs.
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        let mut names: Vec<&String> = overrides.keys().collect();
        names.sort();
        for name in names {
            let logo = Some(overrides[name].clone());
            match self.entries.iter_mut().find(|e| &e.name == name) {
                Some(entry) => entry.logo = logo,
                None => self.entries.push(TeamEntry {
                    name: name.clone(),
                    logo,
                }),
            }
        }
        self
    }

    pub fn entries(&self) -> &[TeamEntry] {
        &self.entries
    }

    pub fn logo(&self, team: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == team)
            .and_then(|e| e.logo.as_deref())
    }

    pub fn contains(&self, team: &str) -> bool {
        self.entries.iter().any(|e| e.name == team)
    }

    /// Catalog entries followed by any team found only in the dataset
    /// (first-appearance order, no logo).
    pub fn selectable(&self, table: &Table) -> Vec<TeamEntry> {
        let mut out = self.entries.clone();
        for record in table.records() {
            if !out.iter().any(|e| e.name == record.team()) {
                out.push(TeamEntry {
                    name: record.team().to_string(),
                    logo: None,
                });
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
