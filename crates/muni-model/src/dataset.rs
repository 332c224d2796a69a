//! Dataset identities and their join conventions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The statistical tables the engine joins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Population,
    Census2021,
    Households2011,
    Households2021,
    Housing2011,
    VehicleFleet,
    HistoricalPopulation,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 7] = [
        DatasetKind::Population,
        DatasetKind::Census2021,
        DatasetKind::Households2011,
        DatasetKind::Households2021,
        DatasetKind::Housing2011,
        DatasetKind::VehicleFleet,
        DatasetKind::HistoricalPopulation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Population => "population",
            Self::Census2021 => "census_2021",
            Self::Households2011 => "households_2011",
            Self::Households2021 => "households_2021",
            Self::Housing2011 => "housing_2011",
            Self::VehicleFleet => "vehicle_fleet",
            Self::HistoricalPopulation => "historical_population",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a municipality key is matched against a dataset's key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStrategy {
    /// Full key equals the field.
    Exact,
    /// The key's code token is a prefix of the field.
    CodePrefix,
    /// The full key is contained in the field, ignoring case.
    ContainsIgnoreCase,
    /// The full key equals the field, ignoring case.
    ExactIgnoreCase,
}

impl fmt::Display for JoinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Exact => "exact",
            Self::CodePrefix => "code prefix",
            Self::ContainsIgnoreCase => "contains (case-insensitive)",
            Self::ExactIgnoreCase => "exact (case-insensitive)",
        };
        f.write_str(text)
    }
}
