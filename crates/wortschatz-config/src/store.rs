use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_prompt_file() -> PathBuf {
    PathBuf::from("prompt.txt")
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Root of the per-letter entry directories
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_prompt_file")]
    pub prompt_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            prompt_file: default_prompt_file(),
        }
    }
}
