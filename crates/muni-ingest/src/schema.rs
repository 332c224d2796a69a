//! Typed schema of the wide population table.
//!
//! Built once at load time from the column headers; lookups by
//! (age band, segment, year) never search the DataFrame by formatted name.

use std::collections::{BTreeMap, BTreeSet};

use muni_model::{AgeBand, PopulationColumn, PopulationSegment};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulationSchema {
    columns: BTreeMap<PopulationColumn, String>,
}

impl PopulationSchema {
    /// Indexes every header that parses as a population column; other
    /// headers are skipped.
    pub fn from_column_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns = BTreeMap::new();
        for name in names {
            let name = name.as_ref();
            if let Some(column) = PopulationColumn::parse(name) {
                columns.entry(column).or_insert_with(|| name.to_string());
            }
        }
        Self { columns }
    }

    /// Source column for `column`, or `None` when the table lacks it.
    pub fn column_name(&self, column: &PopulationColumn) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    pub fn lookup(&self, band: AgeBand, segment: &PopulationSegment, year: u16) -> Option<&str> {
        self.column_name(&PopulationColumn::new(band, segment.clone(), year))
    }

    /// Years for which at least one column exists.
    pub fn years(&self) -> BTreeSet<u16> {
        self.columns.keys().map(|column| column.year).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
