//! Long-run population series extraction.

use std::collections::BTreeMap;

use tracing::debug;

use muni_ingest::DatasetTable;
use muni_model::{HistoricalPoint, HistoricalSeries, MunicipalityKey, parse_historical_column};

use crate::resolver::resolve;

/// Collects every `<year>_t|_h|_m` column of the municipality's row into an
/// ascending series.
///
/// Returns `None` when the table has no row for the municipality. Blank or
/// unparseable cells become absent figures.
pub fn extract_series(table: &DatasetTable, key: &MunicipalityKey) -> Option<HistoricalSeries> {
    let row = resolve(table, key)?;
    let mut points: BTreeMap<u16, HistoricalPoint> = BTreeMap::new();
    for name in table.column_names() {
        let Some((year, field)) = parse_historical_column(&name) else {
            continue;
        };
        let value = table.value_f64(row, &name);
        points
            .entry(year)
            .or_insert_with(|| HistoricalPoint::new(year))
            .set(field, value);
    }
    debug!(
        municipality = %key,
        row,
        years = points.len(),
        "historical series extracted"
    );
    Some(HistoricalSeries {
        municipality: key.clone(),
        points: points.into_values().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use muni_model::{DatasetKind, JoinStrategy};
    use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

    fn table() -> DatasetTable {
        let cols: Vec<Column> = vec![
            Series::new(
                "municipio".into(),
                vec!["12345 Example City", "99999 Elsewhere"],
            )
            .into_column(),
            Series::new("2011_t".into(), vec!["9500", "10"]).into_column(),
            Series::new("2011_h".into(), vec!["  ", "5"]).into_column(),
            Series::new("2011_m".into(), vec!["n/d", "5"]).into_column(),
            Series::new("1900_t".into(), vec![Some(4200i64), None]).into_column(),
            Series::new("notas".into(), vec!["a", "b"]).into_column(),
        ];
        DatasetTable::new(
            DatasetKind::HistoricalPopulation,
            "municipio",
            JoinStrategy::ContainsIgnoreCase,
            DataFrame::new(cols).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn builds_ascending_points() {
        let key = MunicipalityKey::new("12345 example city").unwrap();
        let series = extract_series(&table(), &key).unwrap();
        assert_eq!(series.first_year(), Some(1900));
        assert_eq!(series.last_year(), Some(2011));
        assert_eq!(series.points[0].total, Some(4200.0));
        assert_eq!(series.points[0].men, None);

        let point = series.points[1];
        assert_eq!(point.total, Some(9500.0));
        assert_eq!(point.men, None);
        assert_eq!(point.women, None);
    }

    #[test]
    fn unknown_municipality_has_no_series() {
        let key = MunicipalityKey::new("54321 Nowhere").unwrap();
        assert!(extract_series(&table(), &key).is_none());
    }
}
