use std::path::PathBuf;

use clap::Parser;
use wortschatz_config::{Config, ConfigError};
use wortschatz_core::RunOptions;

/// Generate German dictionary entries with a language model
#[derive(Parser, Debug)]
#[command(name = "wortschatz")]
#[command(version)]
pub struct Args {
    /// Text file with one German word per line
    pub words_file: PathBuf,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,

    /// Regenerate words whose file holds an error record
    #[arg(long)]
    pub retry_failed: bool,

    /// Root directory for the generated entries
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Prompt template file
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,

    /// Model name sent to the backend
    #[arg(long)]
    pub model: Option<String>,

    /// Attempts per word when the output is corrupted
    #[arg(long)]
    pub max_retries: Option<u32>,
}

impl Args {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            force: self.force,
            retry_failed: self.retry_failed,
        }
    }

    /// Command-line flags take precedence over the environment
    pub fn apply(&self, mut config: Config) -> Result<Config, ConfigError> {
        if let Some(dir) = &self.data_dir {
            config.store.data_dir = dir.clone();
        }
        if let Some(file) = &self.prompt_file {
            config.store.prompt_file = file.clone();
        }
        if let Some(model) = &self.model {
            config.backend.model = model.clone();
        }
        if let Some(retries) = self.max_retries {
            config.backend.max_retries = retries;
        }

        config.check()?;
        Ok(config)
    }
}
