//! Presentation and export of indicator results.
//!
//! - **Display**: per-indicator value formatting for tables
//! - **CSV**: flat indicator export (one row per year) and its reader
//! - **JSON**: the full indicator table, unavailable reasons included
//! - **XLSX**: the CSV grid as a one-sheet workbook
//! - **History**: the long-run population series as CSV

mod csv_export;
mod error;
mod format;
mod history;
mod json_export;
mod xlsx_export;

pub use csv_export::{YEAR_HEADER, read_indicator_csv, write_indicator_csv};
pub use error::{ReportError, Result};
pub use format::{UNAVAILABLE_TEXT, format_population, format_value};
pub use history::{HISTORY_HEADERS, history_file_name, write_history_csv};
pub use json_export::write_indicator_json;
pub use xlsx_export::{XLSX_SHEET_NAME, write_indicator_xlsx};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use muni_model::{HistoricalSeries, IndicatorTable, MunicipalityKey};

/// Output format for the indicator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xlsx => "xlsx",
        }
    }
}

/// Default export file name: `indicadores_<key>.<ext>`, with spaces turned
/// into underscores and commas dropped.
pub fn export_file_name(key: &MunicipalityKey, format: ExportFormat) -> String {
    format!("indicadores_{}.{}", key.file_stem(), format.extension())
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

/// Writes the indicator table to `path` in `format`.
pub fn export_indicators(table: &IndicatorTable, path: &Path, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Csv => write_indicator_csv(table, create_file(path)?)?,
        ExportFormat::Json => write_indicator_json(table, create_file(path)?)?,
        ExportFormat::Xlsx => write_indicator_xlsx(table, path)?,
    }
    tracing::info!(
        path = %path.display(),
        format = format.extension(),
        rows = table.rows.len(),
        "indicators exported"
    );
    Ok(())
}

/// Writes the historical series to `path` as CSV.
pub fn export_history(series: &HistoricalSeries, path: &Path) -> Result<()> {
    let writer = create_file(path)?;
    write_history_csv(series, writer)?;
    tracing::info!(
        path = %path.display(),
        points = series.points.len(),
        "historical series exported"
    );
    Ok(())
}
