//! Flat CSV export of an indicator table and the matching reader.

use std::io::{Read, Write};

use muni_model::{Indicator, IndicatorRow, IndicatorTable, IndicatorValue};

use crate::error::{ReportError, Result};

/// Header of the leading year column.
pub const YEAR_HEADER: &str = "Año";

/// Writes one line per year: the year, then every indicator in
/// presentation order under its display label.
///
/// Absent and unavailable values are both written as empty cells; numbers
/// use the shortest representation that reads back to the same value.
pub fn write_indicator_csv<W: Write>(table: &IndicatorTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(Indicator::ALL.len() + 1);
    header.push(YEAR_HEADER);
    header.extend(Indicator::ALL.iter().map(|indicator| indicator.label()));
    wtr.write_record(&header)?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(header.len());
        record.push(row.year.to_string());
        for indicator in Indicator::ALL {
            let cell = row
                .value(indicator)
                .map(|value| value.to_string())
                .unwrap_or_default();
            record.push(cell);
        }
        wtr.write_record(&record)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Reads back a file produced by [`write_indicator_csv`].
///
/// Only available values survive the trip; empty cells are skipped.
pub fn read_indicator_csv<R: Read>(reader: R) -> Result<Vec<IndicatorRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut columns = headers.iter();
    match columns.next() {
        Some(first) if first == YEAR_HEADER => {}
        other => {
            return Err(ReportError::MalformedCsv {
                message: format!("expected leading '{YEAR_HEADER}' column, found {other:?}"),
            });
        }
    }
    let indicators = columns
        .map(|label| {
            Indicator::from_label(label).ok_or_else(|| ReportError::MalformedCsv {
                message: format!("unknown indicator column '{label}'"),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let year_text = record.get(0).unwrap_or_default();
        let year = year_text
            .trim()
            .parse::<u16>()
            .map_err(|_| ReportError::MalformedCsv {
                message: format!("invalid year '{year_text}'"),
            })?;
        let mut row = IndicatorRow::new(year);
        for (indicator, cell) in indicators.iter().zip(record.iter().skip(1)) {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            let value = cell.parse::<f64>().map_err(|_| ReportError::MalformedCsv {
                message: format!("invalid value '{cell}' for {}", indicator.code()),
            })?;
            row.insert(*indicator, IndicatorValue::Available(value));
        }
        rows.push(row);
    }
    Ok(rows)
}
