//! The dataset registry: every source table, loaded once.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::{debug, info, info_span};

use muni_model::{DatasetKind, MunicipalityKey, pad_ine_code};

use crate::config::{RegistryConfig, VEHICLE_KEY_COLUMN, ValueColumns, VehicleFleetConfig};
use crate::error::{IngestError, Result};
use crate::polars_utils::any_to_string_non_empty;
use crate::reader::{normalize_column_names, read_table};
use crate::schema::PopulationSchema;
use crate::table::DatasetTable;

/// Immutable snapshot of all statistical tables.
///
/// Constructed once at startup and shared by reference; nothing mutates a
/// table after construction, so the registry can be shared across threads
/// without locking.
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    tables: BTreeMap<DatasetKind, DatasetTable>,
    population_schema: PopulationSchema,
    columns: ValueColumns,
}

impl DatasetRegistry {
    /// Loads every dataset named by `config`.
    ///
    /// Fails on the first dataset that cannot be read, parsed, or keyed;
    /// there is no partially loaded registry.
    pub fn load(config: &RegistryConfig) -> Result<Self> {
        let span = info_span!("load_datasets", data_dir = %config.data_dir.display());
        let _guard = span.enter();
        let start = Instant::now();

        let mut tables = Vec::with_capacity(DatasetKind::ALL.len());
        for kind in DatasetKind::ALL {
            tables.push(load_dataset(config, kind)?);
        }
        let registry = Self::from_tables(tables, config.columns.clone())?;
        info!(
            dataset_count = registry.tables.len(),
            duration_ms = start.elapsed().as_millis(),
            "datasets loaded"
        );
        Ok(registry)
    }

    /// Builds a registry from already-loaded tables.
    ///
    /// Only the population table is mandatory here; lookups against any
    /// other missing dataset resolve to "not found".
    pub fn from_tables(tables: Vec<DatasetTable>, columns: ValueColumns) -> Result<Self> {
        let tables: BTreeMap<DatasetKind, DatasetTable> = tables
            .into_iter()
            .map(|table| (table.kind(), table))
            .collect();
        let population =
            tables
                .get(&DatasetKind::Population)
                .ok_or_else(|| IngestError::MissingDataset {
                    dataset: DatasetKind::Population.name().to_string(),
                })?;
        let population_schema = PopulationSchema::from_column_names(population.column_names());
        debug!(
            population_columns = population_schema.len(),
            years = ?population_schema.years(),
            "population schema built"
        );
        Ok(Self {
            tables,
            population_schema,
            columns,
        })
    }

    pub fn table(&self, kind: DatasetKind) -> Option<&DatasetTable> {
        self.tables.get(&kind)
    }

    pub fn tables(&self) -> impl Iterator<Item = &DatasetTable> {
        self.tables.values()
    }

    /// The population table; always present.
    pub fn population(&self) -> &DatasetTable {
        &self.tables[&DatasetKind::Population]
    }

    pub fn population_schema(&self) -> &PopulationSchema {
        &self.population_schema
    }

    pub fn columns(&self) -> &ValueColumns {
        &self.columns
    }

    /// Distinct population keys, sorted case-insensitively.
    pub fn municipalities(&self) -> Vec<MunicipalityKey> {
        let unique: BTreeSet<&str> = self
            .population()
            .keys()
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();
        let mut keys: Vec<MunicipalityKey> = unique
            .into_iter()
            .filter_map(|key| MunicipalityKey::new(key).ok())
            .collect();
        keys.sort_by_cached_key(|key| key.as_str().to_lowercase());
        keys
    }

    /// Municipalities whose key contains `term`, ignoring case.
    ///
    /// A blank term matches everything.
    pub fn search(&self, term: &str) -> Vec<MunicipalityKey> {
        let needle = term.trim().to_lowercase();
        self.municipalities()
            .into_iter()
            .filter(|key| key.as_str().to_lowercase().contains(&needle))
            .collect()
    }
}

fn load_dataset(config: &RegistryConfig, kind: DatasetKind) -> Result<DatasetTable> {
    let path = config.path_for(kind);
    let start = Instant::now();
    let data = read_table(&path)?;
    let table = table_from_config(config, kind, data)?;
    let join = table.join();
    info!(
        dataset = %kind,
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        join = %join,
        duration_ms = start.elapsed().as_millis(),
        "dataset loaded"
    );
    Ok(table)
}

/// Appends the composite `"<5-digit code> <name>"` key column.
pub fn add_vehicle_key(data: &mut DataFrame, config: &VehicleFleetConfig) -> Result<()> {
    let missing = |column: &str| IngestError::MissingColumn {
        dataset: DatasetKind::VehicleFleet.name().to_string(),
        column: column.to_string(),
    };
    let codes = data
        .column(&config.code_column)
        .map_err(|_| missing(&config.code_column))?;
    let names = data
        .column(&config.name_column)
        .map_err(|_| missing(&config.name_column))?;
    let mut keys: Vec<Option<String>> = Vec::with_capacity(data.height());
    for idx in 0..data.height() {
        let code = any_to_string_non_empty(codes.get(idx)?);
        let name = any_to_string_non_empty(names.get(idx)?);
        let key = match (code, name) {
            (Some(code), Some(name)) => Some(format!("{} {}", pad_ine_code(&code), name)),
            _ => None,
        };
        keys.push(key);
    }
    data.with_column(Series::new(VEHICLE_KEY_COLUMN.into(), keys))?;
    Ok(())
}

/// Convenience for embedding: wrap a DataFrame with the join convention
/// `config` declares for `kind`.
pub fn table_from_config(
    config: &RegistryConfig,
    kind: DatasetKind,
    mut data: DataFrame,
) -> Result<DatasetTable> {
    match kind {
        DatasetKind::Population => normalize_column_names(&mut data)?,
        DatasetKind::VehicleFleet => add_vehicle_key(&mut data, &config.vehicle_fleet)?,
        _ => {}
    }
    let (key_column, join) = config.key_for(kind);
    DatasetTable::new(kind, key_column, join, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use muni_model::JoinStrategy;
    use polars::prelude::{Column, IntoColumn};

    fn population() -> DataFrame {
        let cols: Vec<Column> = vec![
            Series::new(
                "municipio".into(),
                vec!["28079 Madrid", "01001 Alegría-Dulantza", "12345 example City"],
            )
            .into_column(),
            Series::new("total_total_total_2024".into(), vec![3_400_000i64, 3000, 10000])
                .into_column(),
        ];
        DataFrame::new(cols).unwrap()
    }

    fn registry() -> DatasetRegistry {
        let config = RegistryConfig::default();
        let table = table_from_config(&config, DatasetKind::Population, population()).unwrap();
        DatasetRegistry::from_tables(vec![table], ValueColumns::default()).unwrap()
    }

    #[test]
    fn municipalities_sorted_case_insensitively() {
        let keys: Vec<String> = registry()
            .municipalities()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(
            keys,
            vec!["01001 Alegría-Dulantza", "12345 example City", "28079 Madrid"]
        );
    }

    #[test]
    fn search_ignores_case() {
        let hits = registry().search("MADR");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].as_str(), "28079 Madrid");
        assert_eq!(registry().search("").len(), 3);
    }

    #[test]
    fn population_is_required() {
        let result = DatasetRegistry::from_tables(Vec::new(), ValueColumns::default());
        assert!(matches!(result, Err(IngestError::MissingDataset { .. })));
    }

    #[test]
    fn vehicle_key_pads_codes() {
        let cols: Vec<Column> = vec![
            Series::new("codigo_ine".into(), vec![1001i64, 28079]).into_column(),
            Series::new("municipio".into(), vec!["Alegría-Dulantza", "Madrid"]).into_column(),
        ];
        let mut df = DataFrame::new(cols).unwrap();
        add_vehicle_key(&mut df, &VehicleFleetConfig::default()).unwrap();
        let table = DatasetTable::new(
            DatasetKind::VehicleFleet,
            VEHICLE_KEY_COLUMN,
            JoinStrategy::ExactIgnoreCase,
            df,
        )
        .unwrap();
        assert_eq!(
            table.keys(),
            &[
                Some("01001 Alegría-Dulantza".to_string()),
                Some("28079 Madrid".to_string())
            ]
        );
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DatasetRegistry>();
    }
}
