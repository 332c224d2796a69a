use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use muni_cli::settings::resolve_registry_config;
use muni_core::{CoreError, IndicatorEngine};
use muni_ingest::DatasetRegistry;
use muni_model::{Indicator, MunicipalityKey};
use muni_report::{
    ExportFormat, export_file_name, export_history, export_indicators, history_file_name,
};

use crate::cli::{ExportFormatArg, HistoryArgs, IndicatorsArgs, SearchArgs};
use crate::summary::{
    print_dataset_summary, print_history_table, print_indicator_table, print_municipality_list,
};

/// Suggestions listed when a municipality is not found.
const MAX_SUGGESTIONS: usize = 10;

pub fn load_registry(
    config_path: Option<&Path>,
    data_dir: Option<&Path>,
) -> Result<DatasetRegistry> {
    let config = resolve_registry_config(config_path, data_dir).context("load config")?;
    DatasetRegistry::load(&config)
        .with_context(|| format!("load datasets from {}", config.data_dir.display()))
}

pub fn run_indicators(registry: &DatasetRegistry, args: &IndicatorsArgs) -> Result<()> {
    let key = MunicipalityKey::new(&args.municipality).context("parse municipality")?;
    let span = info_span!("indicators", municipality = %key);
    let _guard = span.enter();
    let start = Instant::now();

    let engine = IndicatorEngine::new(registry);
    let table = match engine.compute_indicators(&key) {
        Ok(table) => table,
        Err(error @ CoreError::MunicipalityNotFound { .. }) => {
            return Err(not_found(registry, &key, error));
        }
    };
    print_indicator_table(&table);

    if let Some(target) = &args.export {
        let format = match args.format {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::Xlsx => ExportFormat::Xlsx,
        };
        let path = export_path(target, &export_file_name(&key, format));
        export_indicators(&table, &path, format)
            .with_context(|| format!("export indicators to {}", path.display()))?;
        println!("Exported: {}", path.display());
    }
    info!(
        duration_ms = start.elapsed().as_millis(),
        "indicators command complete"
    );
    Ok(())
}

pub fn run_history(registry: &DatasetRegistry, args: &HistoryArgs) -> Result<()> {
    let key = MunicipalityKey::new(&args.municipality).context("parse municipality")?;
    let engine = IndicatorEngine::new(registry);
    let Some(series) = engine.compute_historical_series(&key) else {
        println!("No historical data for {key}");
        return Ok(());
    };
    print_history_table(&series);

    if let Some(target) = &args.export {
        let path = export_path(target, &history_file_name(&key));
        export_history(&series, &path)
            .with_context(|| format!("export history to {}", path.display()))?;
        println!("Exported: {}", path.display());
    }
    Ok(())
}

pub fn run_search(registry: &DatasetRegistry, args: &SearchArgs) -> Result<()> {
    let hits = registry.search(&args.term);
    print_municipality_list(&hits);
    Ok(())
}

pub fn run_datasets(registry: &DatasetRegistry) -> Result<()> {
    let municipality_count = registry.municipalities().len();
    let years = registry.population_schema().years();
    print_dataset_summary(registry, municipality_count, &years, Indicator::ALL.len());
    Ok(())
}

/// Treats an existing directory as the destination folder for the default
/// file name.
fn export_path(target: &Path, default_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(default_name)
    } else {
        target.to_path_buf()
    }
}

fn not_found(
    registry: &DatasetRegistry,
    key: &MunicipalityKey,
    error: CoreError,
) -> anyhow::Error {
    let term = if key.name().is_empty() {
        key.code()
    } else {
        key.name()
    };
    let suggestions: Vec<String> = registry
        .search(term)
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(String::from)
        .collect();
    if suggestions.is_empty() {
        anyhow!(error)
    } else {
        anyhow!("{error} (did you mean: {})", suggestions.join("; "))
    }
}
