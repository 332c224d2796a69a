#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Width of an INE municipality code.
pub const INE_CODE_WIDTH: usize = 5;

/// Canonical municipality selection of the form `"<INE code> <name>"`.
///
/// The leading token is the code used for prefix joins; the full string is
/// used for exact and substring joins.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct MunicipalityKey(String);

impl MunicipalityKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidMunicipalityKey(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Builds the composite `"<zero-padded code> <name>"` form.
    pub fn from_parts(code: &str, name: &str) -> Result<Self, ModelError> {
        Self::new(format!("{} {}", pad_ine_code(code), name.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading code token (`"12345"` for `"12345 Example City"`).
    pub fn code(&self) -> &str {
        self.0.split_whitespace().next().unwrap_or_default()
    }

    /// Everything after the code token.
    pub fn name(&self) -> &str {
        let code = self.code();
        self.0[code.len()..].trim_start()
    }

    /// File-name friendly form: spaces become underscores, commas are dropped.
    pub fn file_stem(&self) -> String {
        self.0.replace(' ', "_").replace(',', "")
    }
}

impl fmt::Display for MunicipalityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MunicipalityKey {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MunicipalityKey> for String {
    fn from(value: MunicipalityKey) -> Self {
        value.0
    }
}

/// Left-pads a numeric INE code with zeros to five digits.
///
/// Non-numeric input is returned trimmed but otherwise untouched. Codes read
/// from float columns (`"1001.0"`) lose their fractional suffix first.
pub fn pad_ine_code(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return trimmed.to_string();
    }
    format!("{digits:0>width$}", width = INE_CODE_WIDTH)
}
