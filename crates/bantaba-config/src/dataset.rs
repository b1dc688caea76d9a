use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_dir() -> PathBuf {
    PathBuf::from("./data")
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DatasetConfig {
    /// Directory with the `<language>_lang.json` word lists
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

impl DatasetConfig {
    pub fn new() -> Self {
        let dir = env::var("BANTABA_DATASET_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_dir());

        Self { dir }
    }
}
