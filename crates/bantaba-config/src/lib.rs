use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use self::dataset::DatasetConfig;
use self::remote::RemoteConfig;
use self::storage::StorageConfig;

pub mod dataset;
pub mod remote;
pub mod storage;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub storage: StorageConfig,
    pub dataset: DatasetConfig,

    /// Default tracing filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            storage: StorageConfig::default(),
            dataset: DatasetConfig::default(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Config {
    /// Build from environment variables, falling back to defaults
    pub fn new() -> Self {
        let log_level = env::var("BANTABA_LOG").unwrap_or_else(|_| default_log_level());

        let log_json = env::var("BANTABA_LOG_JSON")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Config {
            remote: RemoteConfig::new(),
            storage: StorageConfig::new(),
            dataset: DatasetConfig::new(),

            log_level,
            log_json,
        }
    }

    /// Load from a JSON file; missing sections take their defaults
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}
