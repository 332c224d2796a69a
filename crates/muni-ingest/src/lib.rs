//! Dataset loading for the municipal indicators engine.
//!
//! Reads the statistical tables (Parquet or CSV), attaches each one's key
//! column and join strategy, and exposes them through [`DatasetRegistry`].

pub mod config;
pub mod error;
pub mod polars_utils;
pub mod reader;
pub mod registry;
pub mod schema;
pub mod table;

pub use config::{
    DATA_DIR_ENV_VAR, DatasetConfig, RegistryConfig, VEHICLE_KEY_COLUMN, ValueColumns,
    VehicleFleetConfig,
};
pub use error::{IngestError, Result};
pub use polars_utils::{
    any_to_f64, any_to_string, any_to_string_non_empty, format_numeric, parse_f64,
};
pub use reader::{TableFormat, normalize_column_names, read_table};
pub use registry::{DatasetRegistry, add_vehicle_key, table_from_config};
pub use schema::PopulationSchema;
pub use table::DatasetTable;
