//! Display formatting for indicator values.

use muni_model::{Indicator, IndicatorValue};

/// Shown in place of an indicator that could not be computed.
pub const UNAVAILABLE_TEXT: &str = "n/d";

/// Formats a cell for tabular display.
///
/// Absent (year-gated) fields render as an empty string, unavailable ones as
/// [`UNAVAILABLE_TEXT`]. Percentages get two decimals and a `%` sign; other
/// values use the indicator's own precision.
pub fn format_value(indicator: Indicator, value: Option<IndicatorValue>) -> String {
    match value {
        None => String::new(),
        Some(IndicatorValue::Unavailable(_)) => UNAVAILABLE_TEXT.to_string(),
        Some(IndicatorValue::Available(v)) => {
            let decimals = indicator.decimals() as usize;
            if indicator.is_percentage() {
                format!("{v:.decimals$}%")
            } else {
                format!("{v:.decimals$}")
            }
        }
    }
}

/// Formats a head count without decimals.
pub fn format_population(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.0}"),
        None => UNAVAILABLE_TEXT.to_string(),
    }
}
