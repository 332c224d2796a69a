//! A loaded dataset with its declared key column and join strategy.

use polars::prelude::DataFrame;

use muni_model::{DatasetKind, JoinStrategy};

use crate::error::{IngestError, Result};
use crate::polars_utils::{any_to_f64, any_to_string_non_empty};

/// An immutable dataset snapshot.
///
/// Key values are extracted once at construction so resolver scans do not
/// touch the DataFrame.
#[derive(Debug, Clone)]
pub struct DatasetTable {
    kind: DatasetKind,
    key_column: String,
    join: JoinStrategy,
    keys: Vec<Option<String>>,
    data: DataFrame,
}

impl DatasetTable {
    /// Wraps `data`, failing if `key_column` is absent.
    pub fn new(
        kind: DatasetKind,
        key_column: impl Into<String>,
        join: JoinStrategy,
        data: DataFrame,
    ) -> Result<Self> {
        let key_column = key_column.into();
        let column = data
            .column(&key_column)
            .map_err(|_| IngestError::MissingColumn {
                dataset: kind.name().to_string(),
                column: key_column.clone(),
            })?;
        let mut keys = Vec::with_capacity(data.height());
        for idx in 0..data.height() {
            let value = column.get(idx)?;
            keys.push(any_to_string_non_empty(value));
        }
        Ok(Self {
            kind,
            key_column,
            join,
            keys,
            data,
        })
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    pub fn join(&self) -> JoinStrategy {
        self.join
    }

    pub fn row_count(&self) -> usize {
        self.data.height()
    }

    pub fn column_count(&self) -> usize {
        self.data.width()
    }

    /// Trimmed key values in row order; `None` for blank cells.
    pub fn keys(&self) -> &[Option<String>] {
        &self.keys
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.data.column(name).is_ok()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Numeric value of `column` at `row`; `None` when the column is absent,
    /// the cell is null or blank, or it does not parse as a number.
    pub fn value_f64(&self, row: usize, column: &str) -> Option<f64> {
        let column = self.data.column(column).ok()?;
        column.get(row).ok().and_then(any_to_f64)
    }
}
