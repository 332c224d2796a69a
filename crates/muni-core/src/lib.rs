//! Municipal indicator computation.
//!
//! [`IndicatorEngine`] is the entry point: it resolves a municipality
//! against every registered dataset, runs the indicator formulas per year,
//! and assembles the ordered result.

pub mod assembler;
pub mod calculator;
pub mod engine;
pub mod error;
pub mod history;
pub mod resolver;

pub use assembler::{assemble_rows, build_row, population_total};
pub use calculator::{
    IndicatorInputs, JoinedRecord, MunicipalityRecords, PopulationFigures, ratio, round_to,
};
pub use engine::IndicatorEngine;
pub use error::{CoreError, Result};
pub use history::extract_series;
pub use resolver::{key_matches, resolve, resolve_all};
