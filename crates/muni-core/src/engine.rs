//! The indicator engine: the public entry point for a municipality
//! selection.

use std::time::Instant;

use tracing::{debug, info, info_span};

use muni_ingest::DatasetRegistry;
use muni_model::{
    DatasetKind, HistoricalSeries, IndicatorTable, MunicipalityKey, REPORT_YEARS,
};

use crate::assembler::{assemble_rows, population_total};
use crate::calculator::{JoinedRecord, MunicipalityRecords};
use crate::error::{CoreError, Result};
use crate::history::extract_series;
use crate::resolver::resolve;

/// Computes indicator tables and historical series against a loaded
/// registry.
///
/// Holds no state beyond the registry reference; every call recomputes
/// from scratch.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorEngine<'a> {
    registry: &'a DatasetRegistry,
}

impl<'a> IndicatorEngine<'a> {
    pub fn new(registry: &'a DatasetRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a DatasetRegistry {
        self.registry
    }

    /// Indicator rows for every reported year.
    ///
    /// Fails only when the population table has no row for `key`; any
    /// other missing input degrades to unavailable fields.
    pub fn compute_indicators(&self, key: &MunicipalityKey) -> Result<IndicatorTable> {
        let span = info_span!("compute_indicators", municipality = %key);
        let _guard = span.enter();
        let start = Instant::now();

        let population_row = resolve(self.registry.population(), key)
            .ok_or_else(|| CoreError::MunicipalityNotFound { key: key.clone() })?;
        let records = self.resolve_records(key);
        let rows = assemble_rows(self.registry, population_row, &records);
        let reference_population =
            population_total(self.registry, population_row, REPORT_YEARS[0]);

        info!(
            rows = rows.len(),
            available = rows.iter().map(|row| row.available_count()).sum::<usize>(),
            duration_ms = start.elapsed().as_millis(),
            "indicators computed"
        );
        Ok(IndicatorTable {
            municipality: key.clone(),
            reference_population,
            rows,
        })
    }

    /// Long-run population series, or `None` when the historical table has
    /// no row for `key`.
    pub fn compute_historical_series(&self, key: &MunicipalityKey) -> Option<HistoricalSeries> {
        let table = self.registry.table(DatasetKind::HistoricalPopulation)?;
        let series = extract_series(table, key);
        if series.is_none() {
            info!(municipality = %key, "no historical data");
        }
        series
    }

    fn resolve_records(&self, key: &MunicipalityKey) -> MunicipalityRecords<'a> {
        let registry = self.registry;
        let record = |kind: DatasetKind| -> Option<JoinedRecord<'a>> {
            let Some(table) = registry.table(kind) else {
                debug!(dataset = %kind, "dataset not registered");
                return None;
            };
            resolve(table, key).map(|row| JoinedRecord::new(table, row))
        };
        MunicipalityRecords {
            census_2021: record(DatasetKind::Census2021),
            households_2011: record(DatasetKind::Households2011),
            households_2021: record(DatasetKind::Households2021),
            housing_2011: record(DatasetKind::Housing2011),
            vehicle_fleet: record(DatasetKind::VehicleFleet),
        }
    }
}
