//! Builds the per-year indicator rows.

use tracing::debug;

use muni_ingest::{DatasetRegistry, ValueColumns};
use muni_model::{AgeBand, Indicator, IndicatorRow, PopulationSegment, REPORT_YEARS};

use crate::calculator::{IndicatorInputs, MunicipalityRecords, PopulationFigures};

/// One row per entry of [`REPORT_YEARS`], most recent first.
pub fn assemble_rows(
    registry: &DatasetRegistry,
    population_row: usize,
    records: &MunicipalityRecords<'_>,
) -> Vec<IndicatorRow> {
    REPORT_YEARS
        .iter()
        .map(|&year| {
            let figures = PopulationFigures::from_population_row(
                registry.population(),
                registry.population_schema(),
                population_row,
                year,
            );
            if !figures.missing_bands.is_empty() {
                debug!(
                    year,
                    missing_bands = ?figures.missing_bands,
                    "age bands missing, counted as zero"
                );
            }
            build_row(&figures, records, registry.columns())
        })
        .collect()
}

/// Computes every indicator that applies to `figures.year`.
///
/// Gated indicators for other years are left out of the row entirely.
pub fn build_row(
    figures: &PopulationFigures,
    records: &MunicipalityRecords<'_>,
    columns: &ValueColumns,
) -> IndicatorRow {
    let inputs = IndicatorInputs {
        figures,
        records,
        columns,
    };
    let mut row = IndicatorRow::new(figures.year);
    for indicator in Indicator::ALL {
        if indicator.applies_to(figures.year) {
            row.insert(indicator, inputs.compute(indicator));
        }
    }
    row
}

/// Population total for `year`, if the column exists and is filled.
pub fn population_total(
    registry: &DatasetRegistry,
    population_row: usize,
    year: u16,
) -> Option<f64> {
    let column = registry
        .population_schema()
        .lookup(AgeBand::All, &PopulationSegment::Total, year)?;
    registry.population().value_f64(population_row, column)
}
