pub mod dataset;
pub mod error;
pub mod history;
pub mod ids;
pub mod indicator;
pub mod population;

pub use dataset::{DatasetKind, JoinStrategy};
pub use error::{ModelError, Result};
pub use history::{HistoricalPoint, HistoricalSeries, SeriesField, parse_historical_column};
pub use ids::{INE_CODE_WIDTH, MunicipalityKey, pad_ine_code};
pub use indicator::{Indicator, IndicatorRow, IndicatorTable, IndicatorValue, UnavailableReason};
pub use population::{
    AgeBand, CENSUS_YEAR, CHILD_BANDS, OVER_65_BANDS, OVER_85_BANDS, PopulationColumn,
    PopulationSegment, REPORT_YEARS, VEHICLE_MIX_YEAR, VEHICLE_RATE_YEAR, WORKING_AGE_BANDS,
};
