// Metric panel formatter.
//
// Turns one player record into the four fixed dashboard panels. Every value is
// a direct read of an upstream column, cast or rounded for display; nothing is
// recomputed.
//
// Rounding: all decimals go through `{:.N}` formatting, which rounds the exact
// binary value to nearest with ties to even. Integer columns render with no
// decimal point even when the file stores them as floats.

use std::fmt;

use crate::dataset::{columns, PlayerRecord, PlayerStats};

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Decimal places used for percentage display.
pub const PCT_PLACES: usize = 1;

fn strip_negative_zero(s: String) -> String {
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

/// Integer rendering of a possibly float-encoded count or rank.
pub fn fmt_int(value: f64) -> String {
    strip_negative_zero(format!("{value:.0}"))
}

pub fn fmt_decimal(value: f64, places: usize) -> String {
    strip_negative_zero(format!("{value:.places$}"))
}

/// Percentage (0-100 scale) with a `%` suffix.
pub fn fmt_pct(value: f64) -> String {
    format!("{}%", fmt_decimal(value, PCT_PLACES))
}

// ---------------------------------------------------------------------------
// Panel definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Usage,
    Impact,
    Discipline,
    TeamWeight,
}

impl PanelKind {
    /// Display order.
    pub const ALL: [PanelKind; 4] = [
        PanelKind::Usage,
        PanelKind::Impact,
        PanelKind::Discipline,
        PanelKind::TeamWeight,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PanelKind::Usage => "Uso y confianza del CT",
            PanelKind::Impact => "Impacto en cancha",
            PanelKind::Discipline => "Disciplina y riesgo",
            PanelKind::TeamWeight => "Peso en el equipo",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            PanelKind::Usage => {
                "Qué tan recurrente es el uso del jugador por el entrenador. No evalúa calidad, solo decisiones."
            }
            PanelKind::Impact => "Producción ofensiva en relación a los minutos jugados.",
            PanelKind::Discipline => "Comportamiento competitivo y riesgo de sanciones.",
            PanelKind::TeamWeight => "Importancia estructural del jugador dentro del equipo.",
        }
    }

    fn fields(self) -> &'static [FieldSpec] {
        match self {
            PanelKind::Usage => USAGE_FIELDS,
            PanelKind::Impact => IMPACT_FIELDS,
            PanelKind::Discipline => DISCIPLINE_FIELDS,
            PanelKind::TeamWeight => TEAM_WEIGHT_FIELDS,
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Int,
    Decimal(usize),
    Percent,
    AsIs,
}

struct FieldSpec {
    label: &'static str,
    column: &'static str,
    format: Format,
}

const fn field(label: &'static str, column: &'static str, format: Format) -> FieldSpec {
    FieldSpec {
        label,
        column,
        format,
    }
}

const USAGE_FIELDS: &[FieldSpec] = &[
    field("Convocados", columns::CONVOCADOS, Format::Int),
    field("Partidos jugados", columns::PARTIDOS_JUGADOS, Format::Int),
    field("Partidos titular", columns::PARTIDOS_TITULAR, Format::Int),
    field("% Titularidad real", columns::PCT_TITULARIDAD, Format::Percent),
    field("Minutos por convocatoria", columns::MINUTOS_POR_CONVOCATORIA, Format::Decimal(1)),
    field("Confianza CT", columns::CONFIANZA_CT, Format::AsIs),
];

const IMPACT_FIELDS: &[FieldSpec] = &[
    field("Minutos", columns::MINUTOS, Format::Int),
    field("Partidos 90", columns::PARTIDOS_90, Format::Decimal(2)),
    field("Goles", columns::GOLES, Format::Int),
    field("Goles por 90", columns::GOLES_P90, Format::Decimal(2)),
    field("Impacto ofensivo", columns::IMPACTO_OFENSIVO, Format::Decimal(2)),
    field("Rank impacto (equipo)", columns::RANK_IMPACTO, Format::Int),
];

const DISCIPLINE_FIELDS: &[FieldSpec] = &[
    field("Amarillas", columns::AMARILLAS, Format::Int),
    field("Rojas", columns::ROJAS, Format::Int),
    field("Tarjetas totales", columns::TARJETAS_TOTALES, Format::Int),
    field("Tarjetas por 90", columns::TARJETAS_P90, Format::Decimal(2)),
    field("Disciplina", columns::DISCIPLINA, Format::Decimal(2)),
    field("Jugador problema", columns::JUGADOR_PROBLEMA, Format::AsIs),
    field("Rank disciplina (equipo)", columns::RANK_DISCIPLINA, Format::Int),
];

const TEAM_WEIGHT_FIELDS: &[FieldSpec] = &[
    field("Peso en el equipo", columns::PESO_EQUIPO, Format::Decimal(2)),
    field("Rank peso (equipo)", columns::RANK_PESO, Format::Int),
    field("Minutos jugados", columns::MINUTOS, Format::Int),
];

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

enum Cell<'a> {
    Number(f64),
    Text(&'a str),
}

/// Column → typed stat. `None` when the record did not carry the cell.
fn lookup<'a>(stats: &'a PlayerStats, column: &str) -> Option<Cell<'a>> {
    let num = |v: Option<f64>| v.map(Cell::Number);
    let text = |v: &'a Option<String>| v.as_deref().map(Cell::Text);
    match column {
        columns::MINUTOS => Some(Cell::Number(stats.minutes)),
        columns::CONVOCADOS => num(stats.call_ups),
        columns::PARTIDOS_JUGADOS => num(stats.matches_played),
        columns::PARTIDOS_TITULAR => num(stats.matches_started),
        columns::PCT_TITULARIDAD => num(stats.start_pct),
        columns::MINUTOS_POR_CONVOCATORIA => num(stats.minutes_per_call_up),
        columns::CONFIANZA_CT => text(&stats.coach_trust),
        columns::PARTIDOS_90 => num(stats.matches_90),
        columns::GOLES => num(stats.goals),
        columns::GOLES_P90 => num(stats.goals_p90),
        columns::IMPACTO_OFENSIVO => num(stats.attacking_impact),
        columns::RANK_IMPACTO => num(stats.attacking_impact_rank),
        columns::AMARILLAS => num(stats.yellow_cards),
        columns::ROJAS => num(stats.red_cards),
        columns::TARJETAS_TOTALES => num(stats.total_cards),
        columns::TARJETAS_P90 => num(stats.cards_p90),
        columns::DISCIPLINA => num(stats.discipline),
        columns::JUGADOR_PROBLEMA => text(&stats.problem_player),
        columns::RANK_DISCIPLINA => num(stats.discipline_rank),
        columns::PESO_EQUIPO => num(stats.team_weight),
        columns::RANK_PESO => num(stats.team_weight_rank),
        _ => None,
    }
}

/// A panel value. Numbers stay numeric; only `display` adds rounding and
/// the `%` suffix.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Int(f64),
    Decimal { value: f64, places: usize },
    Percent(f64),
    Text(String),
}

impl MetricValue {
    pub fn display(&self) -> String {
        match self {
            MetricValue::Int(v) => fmt_int(*v),
            MetricValue::Decimal { value, places } => fmt_decimal(*value, *places),
            MetricValue::Percent(v) => fmt_pct(*v),
            MetricValue::Text(s) => s.clone(),
        }
    }

    /// The unrounded number, for export or comparison. `None` for text.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            MetricValue::Int(v) | MetricValue::Percent(v) => Some(*v),
            MetricValue::Decimal { value, .. } => Some(*value),
            MetricValue::Text(_) => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub label: &'static str,
    pub column: &'static str,
    pub value: MetricValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub kind: PanelKind,
    pub rows: Vec<MetricRow>,
}

impl Panel {
    /// (label, display string) pairs in panel order.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        self.rows.iter().map(|r| (r.label, r.value.display())).collect()
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    #[error("incomplete record for panel '{panel}': missing {}", .missing.join(", "))]
    IncompleteRecord {
        panel: PanelKind,
        missing: Vec<&'static str>,
    },
}

// ---------------------------------------------------------------------------
// Formatter
// ---------------------------------------------------------------------------

/// Build one panel. Any missing column aborts the whole panel and is reported
/// with every other missing column of that panel.
pub fn build_panel(kind: PanelKind, record: &PlayerRecord) -> Result<Panel, PanelError> {
    let stats = record.stats();
    let mut rows = Vec::with_capacity(kind.fields().len());
    let mut missing = Vec::new();

    for spec in kind.fields() {
        let value = match (lookup(stats, spec.column), spec.format) {
            (Some(Cell::Number(v)), Format::Int) => MetricValue::Int(v),
            (Some(Cell::Number(v)), Format::Decimal(places)) => MetricValue::Decimal { value: v, places },
            (Some(Cell::Number(v)), Format::Percent) => MetricValue::Percent(v),
            (Some(Cell::Number(v)), Format::AsIs) => MetricValue::Text(v.to_string()),
            (Some(Cell::Text(s)), _) => MetricValue::Text(s.to_string()),
            (None, _) => {
                missing.push(spec.column);
                continue;
            }
        };
        rows.push(MetricRow {
            label: spec.label,
            column: spec.column,
            value,
        });
    }

    if !missing.is_empty() {
        return Err(PanelError::IncompleteRecord {
            panel: kind,
            missing,
        });
    }
    Ok(Panel { kind, rows })
}

/// All four panels in display order; each fails independently.
pub fn build_panels(record: &PlayerRecord) -> Vec<(PanelKind, Result<Panel, PanelError>)> {
    PanelKind::ALL
        .iter()
        .map(|&kind| (kind, build_panel(kind, record)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
