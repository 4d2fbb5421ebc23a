//! Runtime configuration
//!
//! Values are layered: built-in defaults, then an optional `khata.toml`
//! (or any format the `config` crate understands), then `KHATA_*`
//! environment variables.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::*;

/// Configuration for a khata installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KhataConfig {
    /// Directory holding the JSON collection files
    pub data_dir: PathBuf,
    /// Prefix prepended to every storage key
    pub storage_prefix: String,
    /// Currency used when the shop profile does not name one
    pub default_currency: String,
    /// How many entries the dashboard recent list shows
    pub recent_limit: usize,
}

impl Default for KhataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("khata-data"),
            storage_prefix: "khatapro_".to_string(),
            default_currency: "INR".to_string(),
            recent_limit: 5,
        }
    }
}

impl KhataConfig {
    /// Load configuration from `khata.*` in the working directory and the environment
    pub fn load() -> KhataResult<Self> {
        Self::load_from(Path::new("khata"))
    }

    /// Load configuration from the given file stem (extension optional) and the environment
    pub fn load_from(file: &Path) -> KhataResult<Self> {
        let defaults = Self::default();

        let config = Config::builder()
            .set_default("data_dir", defaults.data_dir.to_string_lossy().into_owned())?
            .set_default("storage_prefix", defaults.storage_prefix)?
            .set_default("default_currency", defaults.default_currency)?
            .set_default("recent_limit", defaults.recent_limit as u64)?
            .add_source(File::from(file).required(false))
            .add_source(Environment::with_prefix("KHATA"))
            .build()?;

        let loaded: KhataConfig = config.try_deserialize()?;
        tracing::debug!(
            data_dir = %loaded.data_dir.display(),
            prefix = %loaded.storage_prefix,
            "loaded khata configuration"
        );
        Ok(loaded)
    }
}
