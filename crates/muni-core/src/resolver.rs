//! Municipality key resolution against a dataset's key column.

use tracing::debug;

use muni_ingest::DatasetTable;
use muni_model::{JoinStrategy, MunicipalityKey};

/// Whether `field` matches `key` under `join`.
///
/// `field` is the trimmed key-column value.
pub fn key_matches(join: JoinStrategy, key: &MunicipalityKey, field: &str) -> bool {
    match join {
        JoinStrategy::Exact => field == key.as_str(),
        JoinStrategy::CodePrefix => field.starts_with(key.code()),
        JoinStrategy::ContainsIgnoreCase => field
            .to_lowercase()
            .contains(&key.as_str().to_lowercase()),
        JoinStrategy::ExactIgnoreCase => field.to_lowercase() == key.as_str().to_lowercase(),
    }
}

/// Every row index of `table` matching `key`, in table order.
pub fn resolve_all(table: &DatasetTable, key: &MunicipalityKey) -> Vec<usize> {
    let join = table.join();
    table
        .keys()
        .iter()
        .enumerate()
        .filter_map(|(idx, field)| {
            field
                .as_deref()
                .filter(|field| key_matches(join, key, field))
                .map(|_| idx)
        })
        .collect()
}

/// First row of `table` matching `key`.
///
/// Further matches are ignored; the ambiguity is only logged.
pub fn resolve(table: &DatasetTable, key: &MunicipalityKey) -> Option<usize> {
    let matches = resolve_all(table, key);
    match matches.as_slice() {
        [] => {
            debug!(
                dataset = %table.kind(),
                municipality = %key,
                join = %table.join(),
                "no matching row"
            );
            None
        }
        [row] => Some(*row),
        [first, ..] => {
            debug!(
                dataset = %table.kind(),
                municipality = %key,
                join = %table.join(),
                match_count = matches.len(),
                row = first,
                "ambiguous join, using first match"
            );
            Some(*first)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use muni_model::DatasetKind;
    use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

    fn key() -> MunicipalityKey {
        MunicipalityKey::new("12345 Example City").unwrap()
    }

    fn table(join: JoinStrategy, values: &[&str]) -> DatasetTable {
        let cols: Vec<Column> = vec![Series::new("municipio".into(), values).into_column()];
        DatasetTable::new(
            DatasetKind::Census2021,
            "municipio",
            join,
            DataFrame::new(cols).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn exact_is_case_sensitive() {
        assert!(key_matches(JoinStrategy::Exact, &key(), "12345 Example City"));
        assert!(!key_matches(JoinStrategy::Exact, &key(), "12345 example city"));
    }

    #[test]
    fn code_prefix_uses_leading_token() {
        assert!(key_matches(
            JoinStrategy::CodePrefix,
            &key(),
            "12345 Ciudad de Ejemplo"
        ));
        assert!(key_matches(JoinStrategy::CodePrefix, &key(), "123456 Other"));
        assert!(!key_matches(JoinStrategy::CodePrefix, &key(), "01234 Other"));
    }

    #[test]
    fn contains_ignores_case() {
        assert!(key_matches(
            JoinStrategy::ContainsIgnoreCase,
            &key(),
            "Total 12345 EXAMPLE CITY (provincia)"
        ));
        assert!(!key_matches(
            JoinStrategy::ContainsIgnoreCase,
            &key(),
            "12345 Example"
        ));
    }

    #[test]
    fn exact_ignore_case() {
        assert!(key_matches(
            JoinStrategy::ExactIgnoreCase,
            &key(),
            "12345 EXAMPLE CITY"
        ));
        assert!(!key_matches(
            JoinStrategy::ExactIgnoreCase,
            &key(),
            "12345 Example City Norte"
        ));
    }

    #[test]
    fn first_match_wins() {
        let table = table(
            JoinStrategy::ContainsIgnoreCase,
            &["99999 Elsewhere", "12345 Example City", "12345 example city"],
        );
        assert_eq!(resolve_all(&table, &key()), vec![1, 2]);
        assert_eq!(resolve(&table, &key()), Some(1));
    }

    #[test]
    fn blank_keys_never_match() {
        let table = table(JoinStrategy::ContainsIgnoreCase, &["  ", "99999 Elsewhere"]);
        assert_eq!(resolve(&table, &key()), None);
    }
}
