//! Historical series CSV export.

use std::io::Write;

use muni_model::{HistoricalSeries, MunicipalityKey};

use crate::error::Result;

pub const HISTORY_HEADERS: [&str; 4] = ["year", "total", "men", "women"];

/// `historico_<key>.csv`, with the same sanitizing as indicator exports.
pub fn history_file_name(key: &MunicipalityKey) -> String {
    format!("historico_{}.csv", key.file_stem())
}

/// One line per year, ascending; missing figures are empty cells.
pub fn write_history_csv<W: Write>(series: &HistoricalSeries, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HISTORY_HEADERS)?;
    let cell = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    for point in &series.points {
        wtr.write_record([
            point.year.to_string(),
            cell(point.total),
            cell(point.men),
            cell(point.women),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
