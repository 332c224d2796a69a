//! Population table column vocabulary.
//!
//! Population columns follow `total_<ageband>_<segment>_<year>`, e.g.
//! `total_65_69_total_2024` or `total_total_EX_2021`. [`PopulationColumn`]
//! is the typed form of that name.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Years reported in the indicator table, most recent first.
pub const REPORT_YEARS: [u16; 4] = [2024, 2023, 2022, 2021];

/// Census year for housing and household figures.
pub const CENSUS_YEAR: u16 = 2021;

/// Year whose row carries the vehicles-per-inhabitant rate.
pub const VEHICLE_RATE_YEAR: u16 = 2024;

/// Year whose row carries the fleet composition shares.
pub const VEHICLE_MIX_YEAR: u16 = 2023;

const COLUMN_PREFIX: &str = "total_";

/// A five-year age bracket, the open-ended top bracket, or all ages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    All,
    Range { from: u8, to: u8 },
    OpenEnded(u8),
}

impl AgeBand {
    pub const fn range(from: u8, to: u8) -> Self {
        Self::Range { from, to }
    }

    pub fn parse(label: &str) -> Result<Self, ModelError> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("total") {
            return Ok(Self::All);
        }
        let invalid = || ModelError::InvalidAgeBand(label.to_string());
        match label.split_once('_') {
            Some((from, to)) => {
                let from = from.parse::<u8>().map_err(|_| invalid())?;
                let to = to.parse::<u8>().map_err(|_| invalid())?;
                if from > to {
                    return Err(invalid());
                }
                Ok(Self::Range { from, to })
            }
            None => label.parse::<u8>().map(Self::OpenEnded).map_err(|_| invalid()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::All => "total".to_string(),
            Self::Range { from, to } => format!("{from}_{to}"),
            Self::OpenEnded(from) => from.to_string(),
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Bands aggregated into the 65+ population.
pub const OVER_65_BANDS: [AgeBand; 8] = [
    AgeBand::range(65, 69),
    AgeBand::range(70, 74),
    AgeBand::range(75, 79),
    AgeBand::range(80, 84),
    AgeBand::range(85, 89),
    AgeBand::range(90, 94),
    AgeBand::range(95, 99),
    AgeBand::OpenEnded(100),
];

/// Bands aggregated into the 85+ population.
pub const OVER_85_BANDS: [AgeBand; 4] = [
    AgeBand::range(85, 89),
    AgeBand::range(90, 94),
    AgeBand::range(95, 99),
    AgeBand::OpenEnded(100),
];

/// Bands aggregated into the 0-14 population.
pub const CHILD_BANDS: [AgeBand; 3] = [
    AgeBand::range(0, 4),
    AgeBand::range(5, 9),
    AgeBand::range(10, 14),
];

/// Bands aggregated into the 15-64 (working age) population.
pub const WORKING_AGE_BANDS: [AgeBand; 10] = [
    AgeBand::range(15, 19),
    AgeBand::range(20, 24),
    AgeBand::range(25, 29),
    AgeBand::range(30, 34),
    AgeBand::range(35, 39),
    AgeBand::range(40, 44),
    AgeBand::range(45, 49),
    AgeBand::range(50, 54),
    AgeBand::range(55, 59),
    AgeBand::range(60, 64),
];

/// Sex or nationality slice of a population column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PopulationSegment {
    /// Both sexes, all nationalities (`total`).
    Total,
    /// Foreign nationals (`EX`).
    Foreign,
    /// Any other segment token present in the source.
    Other(String),
}

impl PopulationSegment {
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.eq_ignore_ascii_case("total") {
            Self::Total
        } else if token == "EX" {
            Self::Foreign
        } else {
            Self::Other(token.to_string())
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Self::Total => "total",
            Self::Foreign => "EX",
            Self::Other(token) => token,
        }
    }
}

/// Typed identity of a population table column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PopulationColumn {
    pub band: AgeBand,
    pub segment: PopulationSegment,
    pub year: u16,
}

impl PopulationColumn {
    pub fn new(band: AgeBand, segment: PopulationSegment, year: u16) -> Self {
        Self {
            band,
            segment,
            year,
        }
    }

    /// Parses `total_<ageband>_<segment>_<year>`; returns `None` for any other
    /// column (the key column, labels, unrelated measures).
    pub fn parse(name: &str) -> Option<Self> {
        let rest = name.trim().strip_prefix(COLUMN_PREFIX)?;
        let (rest, year) = rest.rsplit_once('_')?;
        if year.len() != 4 {
            return None;
        }
        let year = year.parse::<u16>().ok()?;
        let (band, segment) = rest.rsplit_once('_')?;
        let band = AgeBand::parse(band).ok()?;
        Some(Self::new(band, PopulationSegment::parse(segment), year))
    }

    pub fn column_name(&self) -> String {
        format!(
            "{COLUMN_PREFIX}{}_{}_{}",
            self.band.label(),
            self.segment.token(),
            self.year
        )
    }
}

impl fmt::Display for PopulationColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column_name())
    }
}
