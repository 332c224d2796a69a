//! Tests for muni-model types.

use muni_model::{
    Indicator, IndicatorRow, IndicatorTable, IndicatorValue, MunicipalityKey, REPORT_YEARS,
    UnavailableReason,
};

fn sample_table() -> IndicatorTable {
    let mut row_2024 = IndicatorRow::new(2024);
    row_2024.insert(Indicator::Aging, IndicatorValue::Available(20.0));
    row_2024.insert(
        Indicator::VehiclesPer1000,
        IndicatorValue::Unavailable(UnavailableReason::MissingRecord),
    );
    IndicatorTable {
        municipality: MunicipalityKey::new("12345 Example City").unwrap(),
        reference_population: Some(10000.0),
        rows: vec![row_2024, IndicatorRow::new(2023)],
    }
}

#[test]
fn table_serializes() {
    let table = sample_table();
    let json = serde_json::to_string(&table).expect("serialize table");
    assert!(json.contains("\"aging\":{\"status\":\"available\",\"value\":20.0}"));
    assert!(json.contains("\"vehicles_per_1000\":{\"status\":\"unavailable\",\"value\":\"missing_record\"}"));
    let round: IndicatorTable = serde_json::from_str(&json).expect("deserialize table");
    assert_eq!(round, table);
}

#[test]
fn municipality_key_rejects_blank_json() {
    let result: Result<MunicipalityKey, _> = serde_json::from_str("\"  \"");
    assert!(result.is_err());
}

#[test]
fn table_row_lookup_by_year() {
    let table = sample_table();
    assert_eq!(table.years(), vec![2024, 2023]);
    assert_eq!(table.row(2024).unwrap().value(Indicator::Aging), Some(20.0));
    assert!(table.row(2021).is_none());
}

#[test]
fn report_years_are_descending() {
    let mut sorted = REPORT_YEARS;
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(sorted, REPORT_YEARS);
}

#[test]
fn every_year_gated_indicator_targets_a_report_year() {
    for indicator in Indicator::ALL {
        if let Some(year) = indicator.gated_year() {
            assert!(REPORT_YEARS.contains(&year), "{indicator:?}");
        }
    }
}
