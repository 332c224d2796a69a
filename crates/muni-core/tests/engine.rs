//! End-to-end indicator computation over an in-memory registry.

use muni_core::{CoreError, IndicatorEngine};
use muni_ingest::{DatasetRegistry, RegistryConfig, ValueColumns, table_from_config};
use muni_model::{
    DatasetKind, Indicator, IndicatorValue, MunicipalityKey, UnavailableReason,
};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

const EXAMPLE: &str = "12345 Example City";
const SMALL_TOWN: &str = "01001 Alegría-Dulantza";

fn text(name: &str, values: &[&str]) -> Column {
    Series::new(name.into(), values).into_column()
}

fn ints(name: &str, values: &[i64]) -> Column {
    Series::new(name.into(), values).into_column()
}

fn floats(name: &str, values: &[f32]) -> Column {
    Series::new(name.into(), values).into_column()
}

fn population() -> DataFrame {
    let mut cols = vec![
        text("municipio", &[EXAMPLE, SMALL_TOWN]),
        ints("total_total_total_2024", &[10000, 3000]),
        ints("total_total_EX_2024", &[850, 90]),
        ints("total_total_total_2023", &[9900, 3000]),
        ints("total_65_69_total_2023", &[990, 300]),
        ints("total_total_total_2022", &[0, 2900]),
        ints("total_total_total_2021", &[9000, 2800]),
    ];
    let over_65 = [
        ("65_69", 800),
        ("70_74", 500),
        ("75_79", 300),
        ("80_84", 150),
        ("85_89", 150),
        ("90_94", 70),
        ("95_99", 25),
        ("100", 5),
    ];
    for (band, value) in over_65 {
        cols.push(ints(&format!("total_{band}_total_2024"), &[value, 75]));
    }
    for band in ["0_4", "5_9", "10_14"] {
        cols.push(ints(&format!("total_{band}_total_2024"), &[400, 100]));
    }
    for from in (15..65).step_by(5) {
        let name = format!("total_{}_{}_total_2024", from, from + 4);
        cols.push(ints(&name, &[680, 200]));
    }
    DataFrame::new(cols).unwrap()
}

fn census() -> DataFrame {
    DataFrame::new(vec![
        text(
            "Municipio de residencia",
            &[SMALL_TOWN, EXAMPLE, "12345 Example City (duplicate)"],
        ),
        ints("viviendasT", &[1500, 500, 999]),
        ints("viviendasNoP", &[300, 50, 1]),
    ])
    .unwrap()
}

fn households(count: i64) -> DataFrame {
    DataFrame::new(vec![text("municipio", &[EXAMPLE]), ints("nHogares", &[count])]).unwrap()
}

fn housing_2011() -> DataFrame {
    DataFrame::new(vec![
        text("municipio", &[EXAMPLE]),
        ints("viviendasTotal", &[400]),
        ints("viviendasVacias", &[40]),
    ])
    .unwrap()
}

fn vehicles() -> DataFrame {
    DataFrame::new(vec![
        ints("codigo_ine", &[12345]),
        text("municipio", &["Example City"]),
        ints("turismos", &[6000]),
        ints("motocicletas", &[900]),
        ints("total", &[8000]),
    ])
    .unwrap()
}

fn historical() -> DataFrame {
    DataFrame::new(vec![
        text("municipio", &[EXAMPLE]),
        ints("1900_t", &[4200]),
        text("1900_h", &[" "]),
        ints("2011_t", &[9500]),
        ints("2011_h", &[4700]),
        ints("2011_m", &[4800]),
    ])
    .unwrap()
}

fn registry() -> DatasetRegistry {
    let config = RegistryConfig::default();
    let frames = [
        (DatasetKind::Population, population()),
        (DatasetKind::Census2021, census()),
        (DatasetKind::Households2011, households(3000)),
        (DatasetKind::Households2021, households(3300)),
        (DatasetKind::Housing2011, housing_2011()),
        (DatasetKind::VehicleFleet, vehicles()),
        (DatasetKind::HistoricalPopulation, historical()),
    ];
    let tables = frames
        .into_iter()
        .map(|(kind, df)| table_from_config(&config, kind, df).unwrap())
        .collect();
    DatasetRegistry::from_tables(tables, ValueColumns::default()).unwrap()
}

fn key(value: &str) -> MunicipalityKey {
    MunicipalityKey::new(value).unwrap()
}

#[test]
fn rows_follow_report_years() {
    let registry = registry();
    let table = IndicatorEngine::new(&registry)
        .compute_indicators(&key(EXAMPLE))
        .unwrap();
    assert_eq!(table.years(), vec![2024, 2023, 2022, 2021]);
    assert_eq!(table.reference_population, Some(10000.0));
}

#[test]
fn demographic_indicators_for_2024() {
    let registry = registry();
    let table = IndicatorEngine::new(&registry)
        .compute_indicators(&key(EXAMPLE))
        .unwrap();
    let row = table.row(2024).unwrap();
    assert_eq!(row.value(Indicator::Aging), Some(20.0));
    assert_eq!(row.value(Indicator::Senescence), Some(12.5));
    assert_eq!(row.value(Indicator::ForeignPopulation), Some(8.5));
    assert_eq!(row.value(Indicator::TotalDependency), Some(47.06));
    assert_eq!(row.value(Indicator::ChildDependency), Some(17.65));
    assert_eq!(row.value(Indicator::ElderlyDependency), Some(29.41));
}

#[test]
fn vehicle_fields_are_year_gated() {
    let registry = registry();
    let table = IndicatorEngine::new(&registry)
        .compute_indicators(&key(EXAMPLE))
        .unwrap();

    let row_2024 = table.row(2024).unwrap();
    assert_eq!(row_2024.value(Indicator::VehiclesPer1000), Some(690.0));
    assert!(row_2024.get(Indicator::CarShare).is_none());
    assert!(row_2024.get(Indicator::SecondaryHousing).is_none());

    let row_2023 = table.row(2023).unwrap();
    assert_eq!(row_2023.value(Indicator::CarShare), Some(75.0));
    assert_eq!(row_2023.value(Indicator::MotorcycleShare), Some(11.25));
    assert!(row_2023.get(Indicator::VehiclesPer1000).is_none());

    let row_2022 = table.row(2022).unwrap();
    for indicator in Indicator::ALL {
        if indicator.gated_year().is_some() {
            assert!(row_2022.get(indicator).is_none(), "{indicator:?} leaked into 2022");
        }
    }
}

#[test]
fn missing_bands_count_as_zero() {
    let registry = registry();
    let table = IndicatorEngine::new(&registry)
        .compute_indicators(&key(EXAMPLE))
        .unwrap();
    let row = table.row(2023).unwrap();
    assert_eq!(row.value(Indicator::Aging), Some(10.0));
    assert_eq!(
        row.get(Indicator::TotalDependency),
        Some(IndicatorValue::Unavailable(UnavailableReason::ZeroDenominator))
    );
}

#[test]
fn zero_total_population_is_unavailable() {
    let registry = registry();
    let table = IndicatorEngine::new(&registry)
        .compute_indicators(&key(EXAMPLE))
        .unwrap();
    let row = table.row(2022).unwrap();
    assert_eq!(
        row.get(Indicator::Aging),
        Some(IndicatorValue::Unavailable(UnavailableReason::ZeroDenominator))
    );
    assert_eq!(
        row.get(Indicator::ForeignPopulation),
        Some(IndicatorValue::Unavailable(UnavailableReason::ZeroDenominator))
    );
}

#[test]
fn nan_band_in_float_columns_counts_as_zero() {
    let config = RegistryConfig::default();
    let frame = DataFrame::new(vec![
        text("municipio", &[EXAMPLE]),
        floats("total_total_total_2024", &[10000.0]),
        floats("total_65_69_total_2024", &[2000.0]),
        floats("total_70_74_total_2024", &[f32::NAN]),
    ])
    .unwrap();
    let population = table_from_config(&config, DatasetKind::Population, frame).unwrap();
    let registry = DatasetRegistry::from_tables(vec![population], ValueColumns::default()).unwrap();

    let table = IndicatorEngine::new(&registry)
        .compute_indicators(&key(EXAMPLE))
        .unwrap();
    let row = table.row(2024).unwrap();
    assert_eq!(row.get(Indicator::Aging), Some(IndicatorValue::Available(20.0)));
}

#[test]
fn census_row_for_2021() {
    let registry = registry();
    let table = IndicatorEngine::new(&registry)
        .compute_indicators(&key(EXAMPLE))
        .unwrap();
    let row = table.row(2021).unwrap();
    let rendered: Vec<String> = row
        .values
        .iter()
        .map(|(indicator, value)| format!("{}: {value:?}", indicator.code()))
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    aging: Available(0.0)
    senescence: Unavailable(ZeroDenominator)
    foreign_population: Available(0.0)
    total_dependency: Unavailable(ZeroDenominator)
    child_dependency: Unavailable(ZeroDenominator)
    elderly_dependency: Unavailable(ZeroDenominator)
    secondary_housing: Available(10.0)
    dwellings_per_1000: Available(55.5556)
    household_variation: Available(10.0)
    housing_stock_growth: Available(25.0)
    vacant_housing: Available(10.0)
    ");
}

#[test]
fn missing_joined_rows_only_affect_their_fields() {
    let registry = registry();
    let table = IndicatorEngine::new(&registry)
        .compute_indicators(&key(SMALL_TOWN))
        .unwrap();

    let row_2024 = table.row(2024).unwrap();
    assert_eq!(
        row_2024.get(Indicator::VehiclesPer1000),
        Some(IndicatorValue::Unavailable(UnavailableReason::MissingRecord))
    );
    assert_eq!(row_2024.value(Indicator::Aging), Some(20.0));

    let row_2021 = table.row(2021).unwrap();
    assert_eq!(row_2021.value(Indicator::SecondaryHousing), Some(20.0));
    assert_eq!(
        row_2021.get(Indicator::HouseholdVariation),
        Some(IndicatorValue::Unavailable(UnavailableReason::MissingRecord))
    );
}

#[test]
fn unknown_municipality_is_an_error() {
    let registry = registry();
    let result = IndicatorEngine::new(&registry).compute_indicators(&key("99999 Nowhere"));
    match result {
        Err(CoreError::MunicipalityNotFound { key }) => assert_eq!(key.as_str(), "99999 Nowhere"),
        other => panic!("expected MunicipalityNotFound, got {other:?}"),
    }
}

#[test]
fn repeated_computation_is_identical() {
    let registry = registry();
    let engine = IndicatorEngine::new(&registry);
    let first = engine.compute_indicators(&key(EXAMPLE)).unwrap();
    let second = engine.compute_indicators(&key(EXAMPLE)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn historical_series_for_known_and_unknown() {
    let registry = registry();
    let engine = IndicatorEngine::new(&registry);

    let series = engine.compute_historical_series(&key(EXAMPLE)).unwrap();
    let years: Vec<u16> = series.points.iter().map(|point| point.year).collect();
    assert_eq!(years, vec![1900, 2011]);
    assert_eq!(series.points[0].total, Some(4200.0));
    assert_eq!(series.points[0].men, None);
    assert_eq!(series.points[1].women, Some(4800.0));

    assert!(engine.compute_historical_series(&key(SMALL_TOWN)).is_none());
}
