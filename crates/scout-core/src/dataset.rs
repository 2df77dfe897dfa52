// Player-statistics dataset: CSV parsing, the immutable table, and the
// session-lifetime loader cache.
//
// The upstream file carries one row per (Jugador, Equipo) with every per-90
// rate, composite score and rank already computed. Nothing here derives a
// value; rows are parsed, validated and kept verbatim so the filtered table
// can be written back out unchanged.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use csv::StringRecord;
use serde::Deserialize;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Stable column names of the upstream dataset.
pub mod columns {
    pub const JUGADOR: &str = "Jugador";
    pub const EQUIPO: &str = "Equipo";
    pub const POSICION: &str = "Posicion_Limpia";
    pub const MINUTOS: &str = "Minutos";
    pub const CONVOCADOS: &str = "Convocados";
    pub const PARTIDOS_JUGADOS: &str = "Partidos_Jugados";
    pub const PARTIDOS_TITULAR: &str = "Partidos_Titular";
    pub const PCT_TITULARIDAD: &str = "Pct_Titularidad_Real";
    pub const MINUTOS_POR_CONVOCATORIA: &str = "Minutos_por_Convocatoria";
    pub const CONFIANZA_CT: &str = "Confianza_CT";
    pub const PARTIDOS_90: &str = "Partidos_90";
    pub const GOLES: &str = "Goles";
    pub const GOLES_P90: &str = "Goles_p90";
    pub const IMPACTO_OFENSIVO: &str = "Impacto_Ofensivo";
    pub const RANK_IMPACTO: &str = "Rank_Impacto_Ofensivo";
    pub const AMARILLAS: &str = "Amarillas";
    pub const ROJAS: &str = "Rojas";
    pub const TARJETAS_TOTALES: &str = "Tarjetas_Totales";
    pub const TARJETAS_P90: &str = "Tarjetas_p90";
    pub const DISCIPLINA: &str = "Disciplina";
    pub const JUGADOR_PROBLEMA: &str = "Jugador_Problema";
    pub const RANK_DISCIPLINA: &str = "Rank_Disciplina";
    pub const PESO_EQUIPO: &str = "Peso_Equipo";
    pub const RANK_PESO: &str = "Rank_Peso_Equipo";

    /// Columns a row cannot be filtered or selected without.
    pub const REQUIRED: &[&str] = &[JUGADOR, EQUIPO, MINUTOS];
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Every variant means the session has no data to show (`DataUnavailable`).
/// None of them is retried: file provisioning happens out of band.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("no dataset found; tried: {}", display_paths(.tried))]
    NotFound { tried: Vec<PathBuf> },

    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("dataset {path} is missing required column `{column}`")]
    MissingColumn { path: String, column: &'static str },

    #[error("dataset {path} produced zero valid rows")]
    Empty { path: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// One upstream row. Metric cells that are empty or unparsable deserialize to
/// `None` via `csv::invalid_option`; the formatter reports them later.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawPlayerRow {
    Jugador: String,
    Equipo: String,
    Minutos: f64,
    #[serde(default)]
    Posicion_Limpia: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Convocados: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Partidos_Jugados: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Partidos_Titular: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Pct_Titularidad_Real: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Minutos_por_Convocatoria: Option<f64>,
    #[serde(default)]
    Confianza_CT: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Partidos_90: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Goles: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Goles_p90: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Impacto_Ofensivo: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Rank_Impacto_Ofensivo: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Amarillas: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Rojas: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Tarjetas_Totales: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Tarjetas_p90: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Disciplina: Option<f64>,
    #[serde(default)]
    Jugador_Problema: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Rank_Disciplina: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Peso_Equipo: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    Rank_Peso_Equipo: Option<f64>,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Typed view of one row. `None` means the cell was absent, empty or not a
/// number. Scores and ranks are opaque upstream values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStats {
    pub name: String,
    pub team: String,
    /// As read; fractional values are kept so threshold comparisons are exact.
    pub minutes: f64,
    pub position: Option<String>,

    pub call_ups: Option<f64>,
    pub matches_played: Option<f64>,
    pub matches_started: Option<f64>,
    pub start_pct: Option<f64>,
    pub minutes_per_call_up: Option<f64>,
    pub coach_trust: Option<String>,

    pub matches_90: Option<f64>,
    pub goals: Option<f64>,
    pub goals_p90: Option<f64>,
    pub attacking_impact: Option<f64>,
    pub attacking_impact_rank: Option<f64>,

    pub yellow_cards: Option<f64>,
    pub red_cards: Option<f64>,
    pub total_cards: Option<f64>,
    pub cards_p90: Option<f64>,
    pub discipline: Option<f64>,
    pub problem_player: Option<String>,
    pub discipline_rank: Option<f64>,

    pub team_weight: Option<f64>,
    pub team_weight_rank: Option<f64>,
}

/// One dataset row: the verbatim cells plus the typed view.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    raw: StringRecord,
    stats: PlayerStats,
}

impl PlayerRecord {
    pub fn name(&self) -> &str {
        &self.stats.name
    }

    pub fn team(&self) -> &str {
        &self.stats.team
    }

    pub fn minutes(&self) -> f64 {
        self.stats.minutes
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// The source cells, in header order.
    pub fn raw(&self) -> &StringRecord {
        &self.raw
    }
}

/// Header row plus records, in file order.
///
/// A loaded table is never mutated; filters build new tables that share the
/// same header so they can be exported without transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: StringRecord,
    records: Vec<PlayerRecord>,
}

impl Table {
    /// Parse a comma-delimited table from any reader.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Table, DatasetError> {
        Table::from_reader_with_delimiter(rdr, b',')
    }

    /// Parse a table from any reader using the given delimiter.
    pub fn from_reader_with_delimiter<R: Read>(rdr: R, delimiter: u8) -> Result<Table, DatasetError> {
        load_table_from_reader(rdr, delimiter, "<reader>")
    }

    /// Parse a table from a file using the given delimiter.
    pub fn from_path(path: &Path, delimiter: u8) -> Result<Table, DatasetError> {
        let label = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
            path: label.clone(),
            source: e,
        })?;
        load_table_from_reader(file, delimiter, &label)
    }

    /// Build a new table with the same header and the records matching `keep`.
    pub(crate) fn retain<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&PlayerRecord) -> bool,
    {
        Table {
            headers: self.headers.clone(),
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Largest `Minutos` in the table, floored (0 when empty). Bounds the
    /// threshold control so its top value still keeps at least one row.
    pub fn max_minutes(&self) -> u32 {
        let max = self.records.iter().map(|r| r.minutes()).fold(0.0, f64::max);
        max.floor() as u32
    }
}

// ---------------------------------------------------------------------------
// Reader-based loader (enables testing without temp files)
// ---------------------------------------------------------------------------

fn load_table_from_reader<R: Read>(
    rdr: R,
    delimiter: u8,
    label: &str,
) -> Result<Table, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let headers = reader
        .headers()
        .map_err(|e| DatasetError::Csv {
            path: label.to_string(),
            source: e,
        })?
        .clone();

    for &column in columns::REQUIRED {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn {
                path: label.to_string(),
                column,
            });
        }
    }

    let mut records = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed row {} in {}: {}", line + 2, label, e);
                continue;
            }
        };
        match raw.deserialize::<RawPlayerRow>(Some(&headers)) {
            Ok(row) => {
                if let Some(stats) = to_stats(row) {
                    records.push(PlayerRecord { raw, stats });
                }
            }
            Err(e) => {
                warn!("skipping malformed row {} in {}: {}", line + 2, label, e);
            }
        }
    }

    warn_duplicates(&records, label);
    debug!("parsed {} rows from {}", records.len(), label);

    Ok(Table { headers, records })
}

fn to_stats(row: RawPlayerRow) -> Option<PlayerStats> {
    let name = row.Jugador;
    let team = row.Equipo;
    if name.is_empty() || team.is_empty() {
        warn!("skipping row with empty Jugador/Equipo ('{}' / '{}')", name, team);
        return None;
    }
    if !row.Minutos.is_finite() || row.Minutos < 0.0 {
        warn!("skipping '{}' ({}): invalid Minutos {}", name, team, row.Minutos);
        return None;
    }

    Some(PlayerStats {
        name,
        team,
        minutes: row.Minutos,
        position: row.Posicion_Limpia.filter(|p| !p.is_empty()),
        call_ups: row.Convocados,
        matches_played: row.Partidos_Jugados,
        matches_started: row.Partidos_Titular,
        start_pct: row.Pct_Titularidad_Real,
        minutes_per_call_up: row.Minutos_por_Convocatoria,
        coach_trust: row.Confianza_CT.filter(|v| !v.is_empty()),
        matches_90: row.Partidos_90,
        goals: row.Goles,
        goals_p90: row.Goles_p90,
        attacking_impact: row.Impacto_Ofensivo,
        attacking_impact_rank: row.Rank_Impacto_Ofensivo,
        yellow_cards: row.Amarillas,
        red_cards: row.Rojas,
        total_cards: row.Tarjetas_Totales,
        cards_p90: row.Tarjetas_p90,
        discipline: row.Disciplina,
        problem_player: row.Jugador_Problema.filter(|v| !v.is_empty()),
        discipline_rank: row.Rank_Disciplina,
        team_weight: row.Peso_Equipo,
        team_weight_rank: row.Rank_Peso_Equipo,
    })
}

/// Upstream guarantees one row per (Jugador, Equipo). Duplicates are kept in
/// file order; selection resolves them to the first row.
fn warn_duplicates(records: &[PlayerRecord], label: &str) {
    let mut seen = std::collections::HashSet::new();
    for r in records {
        if !seen.insert((r.name(), r.team())) {
            warn!(
                "duplicate player '{}' in team '{}' in {}; the first row wins",
                r.name(),
                r.team(),
                label
            );
        }
    }
}

// ---------------------------------------------------------------------------
// DatasetLoader
// ---------------------------------------------------------------------------

/// Resolves the dataset from an ordered list of candidate paths and caches the
/// parsed table for the loader's lifetime.
#[derive(Debug)]
pub struct DatasetLoader {
    candidates: Vec<PathBuf>,
    delimiter: u8,
    cache: OnceLock<Arc<Table>>,
}

impl DatasetLoader {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        DatasetLoader {
            candidates,
            delimiter: b',',
            cache: OnceLock::new(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// First candidate that exists on disk.
    pub fn resolve(&self) -> Result<&Path, DatasetError> {
        self.candidates
            .iter()
            .find(|p| p.is_file())
            .map(PathBuf::as_path)
            .ok_or_else(|| DatasetError::NotFound {
                tried: self.candidates.clone(),
            })
    }

    /// Load the table, reading from disk only on the first successful call.
    /// Failures are not cached, so a later call retries resolution.
    pub fn load(&self) -> Result<Arc<Table>, DatasetError> {
        if let Some(table) = self.cache.get() {
            return Ok(Arc::clone(table));
        }

        let path = self.resolve()?;
        let table = Table::from_path(path, self.delimiter)?;
        if table.is_empty() {
            return Err(DatasetError::Empty {
                path: path.display().to_string(),
            });
        }
        info!(
            "loaded {} player rows ({} columns) from {}",
            table.len(),
            table.headers().len(),
            path.display()
        );

        Ok(Arc::clone(self.cache.get_or_init(|| Arc::new(table))))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
