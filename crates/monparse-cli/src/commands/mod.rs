//! CLI commands.

pub mod batch;
pub mod config;
pub mod currencies;
pub mod currency;
pub mod price;

use std::path::{Path, PathBuf};

use monparse_core::MonparseConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("monparse")
        .join("config.json")
}

/// Load the configuration given with `--config`, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<MonparseConfig> {
    let config = if let Some(path) = config_path {
        MonparseConfig::from_file(Path::new(path))?
    } else {
        MonparseConfig::default()
    };
    Ok(config)
}
