// Roster export: write a (filtered) table back to delimited text.
//
// The header and every cell are written exactly as they were read, so the
// output has the input's column set and order and parses back to an equal
// table.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::dataset::Table;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write export {path}: {source}")]
    Write { path: String, source: csv::Error },
}

/// Serialize `table` as CSV (header row first) into `wtr`.
pub fn write_table<W: Write>(table: &Table, wtr: W, delimiter: u8) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new().delimiter(delimiter).from_writer(wtr);
    writer.write_record(table.headers())?;
    for record in table.records() {
        writer.write_record(record.raw())?;
    }
    writer.flush()?;
    Ok(())
}

/// Export file name for a team roster, e.g. `plantel_Muro_Cf_20261017.csv`.
pub fn export_file_name(team: &str, date: NaiveDate) -> String {
    let team: String = team
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("plantel_{}_{}.csv", team, date.format("%Y%m%d"))
}

/// Write `table` to `dir/<export_file_name>`, creating `dir` if needed.
/// Returns the written path.
pub fn export_roster(
    table: &Table,
    team: &str,
    dir: &Path,
    date: NaiveDate,
    delimiter: u8,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|e| ExportError::CreateDir {
        path: dir.display().to_string(),
        source: e,
    })?;

    let path = dir.join(export_file_name(team, date));
    let write_err = |e: csv::Error| ExportError::Write {
        path: path.display().to_string(),
        source: e,
    };
    let file = std::fs::File::create(&path).map_err(|e| write_err(e.into()))?;
    write_table(table, file, delimiter).map_err(write_err)?;

    info!("exported {} rows of '{}' to {}", table.len(), team, path.display());
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
