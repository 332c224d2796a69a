//! Property tests for the indicator formulas.

use muni_core::{IndicatorInputs, MunicipalityRecords, PopulationFigures, ratio, round_to};
use muni_ingest::ValueColumns;
use muni_model::{Indicator, IndicatorValue, UnavailableReason};
use proptest::prelude::*;

fn figures(total: f64, over_65: f64, age_0_14: f64, age_15_64: f64) -> PopulationFigures {
    PopulationFigures {
        year: 2024,
        total,
        over_65,
        age_0_14,
        age_15_64,
        ..PopulationFigures::default()
    }
}

fn compute(figures: &PopulationFigures, indicator: Indicator) -> IndicatorValue {
    let records = MunicipalityRecords::default();
    let columns = ValueColumns::default();
    IndicatorInputs {
        figures,
        records: &records,
        columns: &columns,
    }
    .compute(indicator)
}

proptest! {
    #[test]
    fn aging_matches_formula(total in 1u32..5_000_000, share in 0.0f64..1.0) {
        let total = f64::from(total);
        let over_65 = (total * share).floor();
        let value = compute(&figures(total, over_65, 0.0, 1.0), Indicator::Aging);
        prop_assert_eq!(value, IndicatorValue::Available(round_to(over_65 / total * 100.0, 2)));
    }

    #[test]
    fn zero_working_age_disables_dependency(age_0_14 in 0u32..100_000, over_65 in 0u32..100_000) {
        let figures = figures(1000.0, f64::from(over_65), f64::from(age_0_14), 0.0);
        for indicator in [
            Indicator::TotalDependency,
            Indicator::ChildDependency,
            Indicator::ElderlyDependency,
        ] {
            prop_assert_eq!(
                compute(&figures, indicator),
                IndicatorValue::Unavailable(UnavailableReason::ZeroDenominator)
            );
        }
    }

    #[test]
    fn rounding_keeps_requested_precision(value in -1.0e6f64..1.0e6, decimals in 0u32..5) {
        let rounded = round_to(value, decimals);
        let factor = 10f64.powi(decimals as i32);
        prop_assert!((rounded - value).abs() <= 0.5 / factor + 1e-9);
    }

    #[test]
    fn zero_denominator_never_yields_a_number(numerator in -1.0e9f64..1.0e9) {
        prop_assert!(!ratio(numerator, 0.0, 100.0, 2).is_available());
    }
}
