//! Registry configuration: where each dataset lives and how it is keyed.
//!
//! Every field has a default matching the file and column names produced by
//! the upstream INE extraction, so an empty TOML file is a valid config.
//!
//! ```toml
//! data_dir = "data"
//!
//! [census_2021]
//! file = "structured_censo.parquet"
//! key_column = "Municipio de residencia"
//! join = "contains_ignore_case"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use muni_model::{DatasetKind, JoinStrategy};

use crate::error::{IngestError, Result};

/// Environment variable for overriding the data directory.
pub const DATA_DIR_ENV_VAR: &str = "MUNI_DATA_DIR";

/// Name of the composite key column added to the vehicle fleet table.
pub const VEHICLE_KEY_COLUMN: &str = "clave_municipio";

/// Location and join convention of a single dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// File name, relative to `data_dir` unless absolute.
    pub file: PathBuf,
    /// Column holding the municipality identifier.
    pub key_column: String,
    /// How the municipality key is matched against `key_column`.
    pub join: JoinStrategy,
}

impl DatasetConfig {
    fn new(file: &str, key_column: &str, join: JoinStrategy) -> Self {
        Self {
            file: PathBuf::from(file),
            key_column: key_column.to_string(),
            join,
        }
    }
}

/// The vehicle fleet table is keyed by a composite built at load time from
/// its code and name columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleFleetConfig {
    pub file: PathBuf,
    pub code_column: String,
    pub name_column: String,
}

impl Default for VehicleFleetConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("parque_vehiculos_2023.parquet"),
            code_column: "codigo_ine".to_string(),
            name_column: "municipio".to_string(),
        }
    }
}

/// Names of the measure columns read from the joined tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueColumns {
    /// Census 2021: total dwellings.
    pub dwellings_total: String,
    /// Census 2021: non-primary dwellings.
    pub dwellings_non_primary: String,
    /// Household tables (2011 and 2021): household count.
    pub households: String,
    /// Housing 2011: total dwellings.
    pub dwellings_total_2011: String,
    /// Housing 2011: vacant dwellings.
    pub dwellings_vacant_2011: String,
    /// Vehicle fleet: passenger cars.
    pub cars: String,
    /// Vehicle fleet: motorcycles.
    pub motorcycles: String,
    /// Vehicle fleet: all registered vehicles.
    pub fleet_total: String,
}

impl Default for ValueColumns {
    fn default() -> Self {
        Self {
            dwellings_total: "viviendasT".to_string(),
            dwellings_non_primary: "viviendasNoP".to_string(),
            households: "nHogares".to_string(),
            dwellings_total_2011: "viviendasTotal".to_string(),
            dwellings_vacant_2011: "viviendasVacias".to_string(),
            cars: "turismos".to_string(),
            motorcycles: "motocicletas".to_string(),
            fleet_total: "total".to_string(),
        }
    }
}

/// Full registry configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub data_dir: PathBuf,
    pub population: DatasetConfig,
    pub census_2021: DatasetConfig,
    pub households_2011: DatasetConfig,
    pub households_2021: DatasetConfig,
    pub housing_2011: DatasetConfig,
    pub vehicle_fleet: VehicleFleetConfig,
    pub historical_population: DatasetConfig,
    pub columns: ValueColumns,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            population: DatasetConfig::new(
                "structured_population.parquet",
                "municipio",
                JoinStrategy::Exact,
            ),
            census_2021: DatasetConfig::new(
                "structured_censo.parquet",
                "Municipio de residencia",
                JoinStrategy::CodePrefix,
            ),
            households_2011: DatasetConfig::new(
                "hogares_2011.parquet",
                "municipio",
                JoinStrategy::ContainsIgnoreCase,
            ),
            households_2021: DatasetConfig::new(
                "hogares_2021.parquet",
                "municipio",
                JoinStrategy::ContainsIgnoreCase,
            ),
            housing_2011: DatasetConfig::new(
                "viviendas_2011.parquet",
                "municipio",
                JoinStrategy::ContainsIgnoreCase,
            ),
            vehicle_fleet: VehicleFleetConfig::default(),
            historical_population: DatasetConfig::new(
                "poblacion_historica.parquet",
                "municipio",
                JoinStrategy::ContainsIgnoreCase,
            ),
            columns: ValueColumns::default(),
        }
    }
}

impl RegistryConfig {
    /// Loads a TOML config file.
    pub fn from_toml_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| IngestError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| IngestError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `MUNI_DATA_DIR` when set.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV_VAR) {
            self.data_dir = PathBuf::from(dir);
        }
        self
    }

    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Resolved file path for a dataset.
    pub fn path_for(&self, kind: DatasetKind) -> PathBuf {
        let file = match self.dataset(kind) {
            Some(dataset) => &dataset.file,
            None => &self.vehicle_fleet.file,
        };
        if file.is_absolute() {
            file.clone()
        } else {
            self.data_dir.join(file)
        }
    }

    /// Key column and join strategy for a dataset.
    pub fn key_for(&self, kind: DatasetKind) -> (&str, JoinStrategy) {
        match self.dataset(kind) {
            Some(dataset) => (dataset.key_column.as_str(), dataset.join),
            None => (VEHICLE_KEY_COLUMN, JoinStrategy::ExactIgnoreCase),
        }
    }

    /// Plain dataset settings; `None` for the vehicle fleet, whose key is
    /// derived.
    fn dataset(&self, kind: DatasetKind) -> Option<&DatasetConfig> {
        match kind {
            DatasetKind::Population => Some(&self.population),
            DatasetKind::Census2021 => Some(&self.census_2021),
            DatasetKind::Households2011 => Some(&self.households_2011),
            DatasetKind::Households2021 => Some(&self.households_2021),
            DatasetKind::Housing2011 => Some(&self.housing_2011),
            DatasetKind::HistoricalPopulation => Some(&self.historical_population),
            DatasetKind::VehicleFleet => None,
        }
    }
}
