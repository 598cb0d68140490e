use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::TmdbConfig;
use crate::orchestrator::DEFAULT_MAX_WORKERS;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

impl Config {
    /// Copy of this configuration with the API key redacted, safe to
    /// log or print.
    pub fn sanitized(&self) -> Config {
        let mut config = self.clone();
        if !config.tmdb.api_key.is_empty() {
            config.tmdb.api_key = "***".to_string();
        }
        config
    }
}

/// Library configuration: where the input files live.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Directory scanned for `.torrent` files, non-recursive.
    #[serde(default)]
    pub torrent_dir: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            torrent_dir: PathBuf::new(),
        }
    }
}

/// Batch execution configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Maximum number of items processed concurrently.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
        }
    }
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}
