use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default backing file, relative to the working directory
pub const DEFAULT_DATA_PATH: &str = "data.json";

/// Configuration from config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backing file holding the task list
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Keep a recovery log next to the backing file
    #[serde(default = "default_true")]
    pub recovery_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_path: default_data_path(),
            recovery_log: true,
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_true() -> bool {
    true
}
