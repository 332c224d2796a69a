//! CLI library components for the municipal indicators engine.

pub mod logging;
pub mod settings;
