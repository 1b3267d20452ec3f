//! Subcommands of the `mdm` binary.

pub mod batch;
pub mod config;
pub mod ingest;
pub mod parse;

use std::path::{Path, PathBuf};

use mdm_core::MdmConfig;
use tracing::debug;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mdm")
        .join("config.json")
}

/// Configuration file in effect: the `--config` flag, else the default location.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration for a command.
///
/// An explicit `--config` must exist; the default location is optional.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<MdmConfig> {
    match config_path {
        Some(path) => Ok(MdmConfig::from_file(Path::new(path))?),
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Loading config from {}", path.display());
                Ok(MdmConfig::from_file(&path)?)
            } else {
                Ok(MdmConfig::default())
            }
        }
    }
}
