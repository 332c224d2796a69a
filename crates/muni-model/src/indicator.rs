//! Indicator definitions and per-field result values.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::population::{CENSUS_YEAR, VEHICLE_MIX_YEAR, VEHICLE_RATE_YEAR};
use crate::{ModelError, MunicipalityKey};

/// Every indicator the engine can produce, in presentation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// D.22.a: share of the population aged 65 or over.
    Aging,
    /// D.22.b: share of the 65+ population aged 85 or over.
    Senescence,
    ForeignPopulation,
    /// D.24.a
    TotalDependency,
    /// D.24.b
    ChildDependency,
    /// D.24.c
    ElderlyDependency,
    SecondaryHousing,
    /// D.25: dwellings per 1000 inhabitants.
    DwellingsPer1000,
    HouseholdVariation,
    HousingStockGrowth,
    VacantHousing,
    VehiclesPer1000,
    CarShare,
    MotorcycleShare,
}

impl Indicator {
    pub const ALL: [Indicator; 14] = [
        Indicator::Aging,
        Indicator::Senescence,
        Indicator::ForeignPopulation,
        Indicator::TotalDependency,
        Indicator::ChildDependency,
        Indicator::ElderlyDependency,
        Indicator::SecondaryHousing,
        Indicator::DwellingsPer1000,
        Indicator::HouseholdVariation,
        Indicator::HousingStockGrowth,
        Indicator::VacantHousing,
        Indicator::VehiclesPer1000,
        Indicator::CarShare,
        Indicator::MotorcycleShare,
    ];

    /// Stable machine identifier, used in JSON output and configuration.
    pub fn code(self) -> &'static str {
        match self {
            Self::Aging => "aging",
            Self::Senescence => "senescence",
            Self::ForeignPopulation => "foreign_population",
            Self::TotalDependency => "total_dependency",
            Self::ChildDependency => "child_dependency",
            Self::ElderlyDependency => "elderly_dependency",
            Self::SecondaryHousing => "secondary_housing",
            Self::DwellingsPer1000 => "dwellings_per_1000",
            Self::HouseholdVariation => "household_variation",
            Self::HousingStockGrowth => "housing_stock_growth",
            Self::VacantHousing => "vacant_housing",
            Self::VehiclesPer1000 => "vehicles_per_1000",
            Self::CarShare => "car_share",
            Self::MotorcycleShare => "motorcycle_share",
        }
    }

    /// Column header used for tables and delimited exports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Aging => "D.22.a. Envejecimiento (%)",
            Self::Senescence => "D.22.b. Senectud (%)",
            Self::ForeignPopulation => "Población extranjera (%)",
            Self::TotalDependency => "D.24.a. Dependencia total (%)",
            Self::ChildDependency => "D.24.b. Dependencia infantil (%)",
            Self::ElderlyDependency => "D.24.c. Dependencia mayores (%)",
            Self::SecondaryHousing => "%Vivienda secundaria",
            Self::DwellingsPer1000 => "D.25 Viviendas por persona",
            Self::HouseholdVariation => "Variación hogares 2011-2021 (%)",
            Self::HousingStockGrowth => "Crecimiento parque viviendas 2011-2021 (%)",
            Self::VacantHousing => "Viviendas vacías 2011 (%)",
            Self::VehiclesPer1000 => "Vehículos por 1000 habitantes",
            Self::CarShare => "% Turismos",
            Self::MotorcycleShare => "% Motocicletas",
        }
    }

    /// Looks an indicator up by its display label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ind| ind.label() == label)
    }

    /// Decimal places the value is rounded to.
    pub fn decimals(self) -> u32 {
        match self {
            Self::DwellingsPer1000 => 4,
            _ => 2,
        }
    }

    pub fn is_percentage(self) -> bool {
        !matches!(self, Self::DwellingsPer1000 | Self::VehiclesPer1000)
    }

    /// The only year whose row carries this indicator, if it is year-gated.
    pub fn gated_year(self) -> Option<u16> {
        match self {
            Self::SecondaryHousing
            | Self::DwellingsPer1000
            | Self::HouseholdVariation
            | Self::HousingStockGrowth
            | Self::VacantHousing => Some(CENSUS_YEAR),
            Self::VehiclesPer1000 => Some(VEHICLE_RATE_YEAR),
            Self::CarShare | Self::MotorcycleShare => Some(VEHICLE_MIX_YEAR),
            _ => None,
        }
    }

    /// Whether the row for `year` carries this indicator.
    pub fn applies_to(self, year: u16) -> bool {
        self.gated_year().is_none_or(|gated| gated == year)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Indicator {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ind| ind.code() == value)
            .ok_or_else(|| ModelError::UnknownIndicator(value.to_string()))
    }
}

/// Why an indicator could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The joined dataset has no row for the municipality.
    MissingRecord,
    /// The row exists but an input column is absent or blank.
    MissingColumn,
    /// The formula denominator is zero.
    ZeroDenominator,
    /// An input or the result is infinite or NaN.
    NonFinite,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingRecord => "missing record",
            Self::MissingColumn => "missing column",
            Self::ZeroDenominator => "zero denominator",
            Self::NonFinite => "non-finite value",
        };
        f.write_str(text)
    }
}

/// Outcome of a single indicator computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum IndicatorValue {
    Available(f64),
    Unavailable(UnavailableReason),
}

impl IndicatorValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Available(value) => Some(*value),
            Self::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Indicator values for one municipality and one year.
///
/// Year-gated indicators that do not apply to `year` are absent from
/// `values` altogether rather than stored as unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub year: u16,
    pub values: BTreeMap<Indicator, IndicatorValue>,
}

impl IndicatorRow {
    pub fn new(year: u16) -> Self {
        Self {
            year,
            values: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, indicator: Indicator, value: IndicatorValue) {
        self.values.insert(indicator, value);
    }

    pub fn get(&self, indicator: Indicator) -> Option<IndicatorValue> {
        self.values.get(&indicator).copied()
    }

    /// Available numeric value, `None` when absent or unavailable.
    pub fn value(&self, indicator: Indicator) -> Option<f64> {
        self.get(indicator).and_then(|value| value.as_f64())
    }

    pub fn available_count(&self) -> usize {
        self.values.values().filter(|v| v.is_available()).count()
    }
}

/// Ordered indicator rows for a municipality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorTable {
    pub municipality: MunicipalityKey,
    /// `total_total_total_2024` for the municipality, shown as context.
    pub reference_population: Option<f64>,
    pub rows: Vec<IndicatorRow>,
}

impl IndicatorTable {
    pub fn row(&self, year: u16) -> Option<&IndicatorRow> {
        self.rows.iter().find(|row| row.year == year)
    }

    pub fn years(&self) -> Vec<u16> {
        self.rows.iter().map(|row| row.year).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gating_years() {
        assert!(Indicator::Aging.applies_to(2022));
        assert!(Indicator::SecondaryHousing.applies_to(2021));
        assert!(!Indicator::SecondaryHousing.applies_to(2024));
        assert!(Indicator::VehiclesPer1000.applies_to(2024));
        assert!(!Indicator::CarShare.applies_to(2024));
    }

    #[test]
    fn codes_round_trip() {
        for indicator in Indicator::ALL {
            assert_eq!(indicator.code().parse::<Indicator>().unwrap(), indicator);
            assert_eq!(Indicator::from_label(indicator.label()), Some(indicator));
        }
    }

    #[test]
    fn row_value_skips_unavailable() {
        let mut row = IndicatorRow::new(2024);
        row.insert(Indicator::Aging, IndicatorValue::Available(20.0));
        row.insert(
            Indicator::Senescence,
            IndicatorValue::Unavailable(UnavailableReason::ZeroDenominator),
        );
        assert_eq!(row.value(Indicator::Aging), Some(20.0));
        assert_eq!(row.value(Indicator::Senescence), None);
        assert!(row.get(Indicator::CarShare).is_none());
        assert_eq!(row.available_count(), 1);
    }
}
