//! Indicator formulas.
//!
//! Everything here is pure: inputs are values already pulled from the
//! registry, outputs are [`IndicatorValue`]s. A failed lookup or a zero
//! denominator makes that one field unavailable and nothing else.

use muni_ingest::{DatasetTable, PopulationSchema, ValueColumns};
use muni_model::{
    AgeBand, CHILD_BANDS, Indicator, IndicatorValue, OVER_65_BANDS, OVER_85_BANDS,
    PopulationSegment, UnavailableReason, WORKING_AGE_BANDS,
};

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `numerator / denominator * scale`, rounded; unavailable when the
/// denominator is zero or the result is not a finite number.
pub fn ratio(numerator: f64, denominator: f64, scale: f64, decimals: u32) -> IndicatorValue {
    if denominator == 0.0 {
        return IndicatorValue::Unavailable(UnavailableReason::ZeroDenominator);
    }
    let value = numerator / denominator * scale;
    if value.is_finite() {
        IndicatorValue::Available(round_to(value, decimals))
    } else {
        IndicatorValue::Unavailable(UnavailableReason::NonFinite)
    }
}

/// A resolved row of one dataset.
#[derive(Debug, Clone, Copy)]
pub struct JoinedRecord<'a> {
    table: &'a DatasetTable,
    row: usize,
}

impl<'a> JoinedRecord<'a> {
    pub fn new(table: &'a DatasetTable, row: usize) -> Self {
        Self { table, row }
    }

    /// Numeric value of `column`; blank, null, and absent are all
    /// [`UnavailableReason::MissingColumn`].
    pub fn value(&self, column: &str) -> Result<f64, UnavailableReason> {
        self.table
            .value_f64(self.row, column)
            .ok_or(UnavailableReason::MissingColumn)
    }
}

/// The municipality's row in each non-population dataset, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct MunicipalityRecords<'a> {
    pub census_2021: Option<JoinedRecord<'a>>,
    pub households_2011: Option<JoinedRecord<'a>>,
    pub households_2021: Option<JoinedRecord<'a>>,
    pub housing_2011: Option<JoinedRecord<'a>>,
    pub vehicle_fleet: Option<JoinedRecord<'a>>,
}

fn field(record: Option<JoinedRecord<'_>>, column: &str) -> Result<f64, UnavailableReason> {
    record
        .ok_or(UnavailableReason::MissingRecord)?
        .value(column)
}

/// Aggregated population counts for one municipality and year.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PopulationFigures {
    pub year: u16,
    pub total: f64,
    pub foreign: f64,
    pub over_65: f64,
    pub over_85: f64,
    pub age_0_14: f64,
    pub age_15_64: f64,
    /// Bands whose column is absent or blank; each counted as zero.
    pub missing_bands: Vec<AgeBand>,
}

impl PopulationFigures {
    /// Reads the figures for `year` from `row` of the population table.
    pub fn from_population_row(
        table: &DatasetTable,
        schema: &PopulationSchema,
        row: usize,
        year: u16,
    ) -> Self {
        let mut missing_bands = Vec::new();
        let mut read = |band: AgeBand, segment: PopulationSegment| -> f64 {
            let value = schema
                .lookup(band, &segment, year)
                .and_then(|column| table.value_f64(row, column));
            if value.is_none() && segment == PopulationSegment::Total && band != AgeBand::All {
                missing_bands.push(band);
            }
            value.unwrap_or(0.0)
        };

        let total = read(AgeBand::All, PopulationSegment::Total);
        let foreign = read(AgeBand::All, PopulationSegment::Foreign);
        let mut sum = |bands: &[AgeBand]| -> f64 {
            bands
                .iter()
                .map(|band| read(*band, PopulationSegment::Total))
                .sum()
        };
        let over_65 = sum(&OVER_65_BANDS);
        let age_0_14 = sum(&CHILD_BANDS);
        let age_15_64 = sum(&WORKING_AGE_BANDS);
        let over_85 = sum(&OVER_85_BANDS);

        missing_bands.sort();
        missing_bands.dedup();
        Self {
            year,
            total,
            foreign,
            over_65,
            over_85,
            age_0_14,
            age_15_64,
            missing_bands,
        }
    }
}

/// Inputs for one indicator row.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorInputs<'a> {
    pub figures: &'a PopulationFigures,
    pub records: &'a MunicipalityRecords<'a>,
    pub columns: &'a ValueColumns,
}

/// Unwraps a joined-record formula, turning a failed lookup into the
/// matching unavailable value.
fn joined(formula: impl FnOnce() -> Result<IndicatorValue, UnavailableReason>) -> IndicatorValue {
    formula().unwrap_or_else(IndicatorValue::Unavailable)
}

impl IndicatorInputs<'_> {
    /// Computes one indicator; the caller decides whether it applies to the
    /// row's year.
    pub fn compute(&self, indicator: Indicator) -> IndicatorValue {
        let pop = self.figures;
        let records = self.records;
        let cols = self.columns;
        let decimals = indicator.decimals();
        match indicator {
            Indicator::Aging => ratio(pop.over_65, pop.total, 100.0, decimals),
            Indicator::Senescence => ratio(pop.over_85, pop.over_65, 100.0, decimals),
            Indicator::ForeignPopulation => ratio(pop.foreign, pop.total, 100.0, decimals),
            Indicator::TotalDependency => ratio(
                pop.age_0_14 + pop.over_65,
                pop.age_15_64,
                100.0,
                decimals,
            ),
            Indicator::ChildDependency => ratio(pop.age_0_14, pop.age_15_64, 100.0, decimals),
            Indicator::ElderlyDependency => ratio(pop.over_65, pop.age_15_64, 100.0, decimals),
            Indicator::SecondaryHousing => joined(|| {
                let total = field(records.census_2021, &cols.dwellings_total)?;
                let non_primary = field(records.census_2021, &cols.dwellings_non_primary)?;
                Ok(ratio(non_primary, total, 100.0, decimals))
            }),
            Indicator::DwellingsPer1000 => joined(|| {
                let total = field(records.census_2021, &cols.dwellings_total)?;
                Ok(ratio(total, pop.total, 1000.0, decimals))
            }),
            Indicator::HouseholdVariation => joined(|| {
                let before = field(records.households_2011, &cols.households)?;
                let after = field(records.households_2021, &cols.households)?;
                Ok(ratio(after - before, before, 100.0, decimals))
            }),
            Indicator::HousingStockGrowth => joined(|| {
                let before = field(records.housing_2011, &cols.dwellings_total_2011)?;
                let after = field(records.census_2021, &cols.dwellings_total)?;
                Ok(ratio(after - before, before, 100.0, decimals))
            }),
            Indicator::VacantHousing => joined(|| {
                let total = field(records.housing_2011, &cols.dwellings_total_2011)?;
                let vacant = field(records.housing_2011, &cols.dwellings_vacant_2011)?;
                Ok(ratio(vacant, total, 100.0, decimals))
            }),
            Indicator::VehiclesPer1000 => joined(|| {
                let cars = field(records.vehicle_fleet, &cols.cars)?;
                let motorcycles = field(records.vehicle_fleet, &cols.motorcycles)?;
                Ok(ratio(cars + motorcycles, pop.total, 1000.0, decimals))
            }),
            Indicator::CarShare => joined(|| {
                let fleet = field(records.vehicle_fleet, &cols.fleet_total)?;
                let cars = field(records.vehicle_fleet, &cols.cars)?;
                Ok(ratio(cars, fleet, 100.0, decimals))
            }),
            Indicator::MotorcycleShare => joined(|| {
                let fleet = field(records.vehicle_fleet, &cols.fleet_total)?;
                let motorcycles = field(records.vehicle_fleet, &cols.motorcycles)?;
                Ok(ratio(motorcycles, fleet, 100.0, decimals))
            }),
        }
    }
}
