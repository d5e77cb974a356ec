//! Driver configuration: optional JSON file plus environment override.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use sealbench_core::bench::BenchConfig;

pub const DATABASE_ENV: &str = "SEALBENCH_DATABASE";
pub const DEFAULT_DATABASE: &str = "encryption_experiment.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// SQLite database path; `:memory:` keeps everything in RAM.
    pub database: String,

    /// Where to write the JSON report, if anywhere.
    pub json_output: Option<PathBuf>,

    #[serde(flatten)]
    pub bench: BenchConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            json_output: None,
            bench: BenchConfig::default(),
        }
    }
}

impl RunnerConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => RunnerConfig::default(),
        };
        if let Ok(database) = std::env::var(DATABASE_ENV) {
            config.database = database;
        }
        Ok(config)
    }

    pub fn in_memory(&self) -> bool {
        self.database == ":memory:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: RunnerConfig =
            serde_json::from_str(r#"{ "batch_sizes": [10, 20], "database": ":memory:" }"#).unwrap();
        assert_eq!(config.bench.batch_sizes, vec![10, 20]);
        assert_eq!(config.bench.chunk_size, 500);
        assert!(config.in_memory());
        assert!(config.json_output.is_none());
    }
}
