//! Spreadsheet export of an indicator table.

use std::path::Path;

use muni_model::{Indicator, IndicatorTable};
use rust_xlsxwriter::Workbook;

use crate::csv_export::YEAR_HEADER;
use crate::error::Result;

/// Name of the single worksheet in the exported workbook.
pub const XLSX_SHEET_NAME: &str = "Indicadores";

/// Writes the same grid as [`crate::write_indicator_csv`] to a one-sheet
/// workbook at `path`.
///
/// Years and values are numeric cells; absent and unavailable values leave
/// the cell empty.
pub fn write_indicator_xlsx(table: &IndicatorTable, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(XLSX_SHEET_NAME)?;

    sheet.write_string(0, 0, YEAR_HEADER)?;
    for (col, indicator) in (1..).zip(Indicator::ALL) {
        sheet.write_string(0, col, indicator.label())?;
    }

    for (row_num, row) in (1..).zip(&table.rows) {
        sheet.write_number(row_num, 0, f64::from(row.year))?;
        for (col, indicator) in (1..).zip(Indicator::ALL) {
            if let Some(value) = row.value(indicator) {
                sheet.write_number(row_num, col, value)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
