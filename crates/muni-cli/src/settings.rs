//! Registry configuration as seen from the command line.
//!
//! Data directory precedence, highest first: `--data-dir`, the
//! `MUNI_DATA_DIR` environment variable, the config file, then `./data`.

use std::path::{Path, PathBuf};

use tracing::debug;

use muni_ingest::{IngestError, RegistryConfig};

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "muni-indicators.toml";

/// Builds the registry config from the CLI's `--config` and `--data-dir`.
///
/// An explicit `--config` must exist; the implicit default file is optional.
pub fn resolve_registry_config(
    config_path: Option<&Path>,
    data_dir: Option<&Path>,
) -> Result<RegistryConfig, IngestError> {
    let config = match config_path {
        Some(path) => RegistryConfig::from_toml_path(path)?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                RegistryConfig::from_toml_path(&default_path)?
            } else {
                RegistryConfig::default()
            }
        }
    };
    let config = config.with_env_overrides();
    let config = match data_dir {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    };
    debug!(data_dir = %config.data_dir.display(), "registry config resolved");
    Ok(config)
}
