//! Long-run population series.

use serde::{Deserialize, Serialize};

use crate::MunicipalityKey;

/// Which figure a historical column holds, from its `_t`/`_h`/`_m` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesField {
    Total,
    Men,
    Women,
}

impl SeriesField {
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "t" => Some(Self::Total),
            "h" => Some(Self::Men),
            "m" => Some(Self::Women),
            _ => None,
        }
    }
}

/// Parses a `<year>_<suffix>` column name into its year and field.
pub fn parse_historical_column(name: &str) -> Option<(u16, SeriesField)> {
    let (year, suffix) = name.trim().split_once('_')?;
    let field = SeriesField::from_suffix(suffix)?;
    let year = year.parse::<u16>().ok()?;
    Some((year, field))
}

/// Population figures for a single year.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub year: u16,
    pub total: Option<f64>,
    pub men: Option<f64>,
    pub women: Option<f64>,
}

impl HistoricalPoint {
    pub fn new(year: u16) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    pub fn set(&mut self, field: SeriesField, value: Option<f64>) {
        match field {
            SeriesField::Total => self.total = value,
            SeriesField::Men => self.men = value,
            SeriesField::Women => self.women = value,
        }
    }

    pub fn get(&self, field: SeriesField) -> Option<f64> {
        match field {
            SeriesField::Total => self.total,
            SeriesField::Men => self.men,
            SeriesField::Women => self.women,
        }
    }
}

/// Time-ordered (ascending) population series for a municipality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub municipality: MunicipalityKey,
    pub points: Vec<HistoricalPoint>,
}

impl HistoricalSeries {
    pub fn first_year(&self) -> Option<u16> {
        self.points.first().map(|p| p.year)
    }

    pub fn last_year(&self) -> Option<u16> {
        self.points.last().map(|p| p.year)
    }
}
