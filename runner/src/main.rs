//! Runs the encryption-strategy benchmark against SQLite and prints the
//! results table.
//!
//! Usage:
//!   sealbench [config.json]
//!   SEALBENCH_DATABASE=:memory: sealbench
//!   RUST_LOG=debug sealbench

mod config;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use sealbench_core::bench::{Orchestrator, ResultSink};
use sealbench_core::report::{JsonReport, TableReport};
use sealbench_core::storage::SqliteStore;

use crate::config::RunnerConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = RunnerConfig::load(config_path.as_deref())?;

    info!("--- Initiating Performance Benchmarks ---");
    let opened = if config.in_memory() {
        SqliteStore::open_in_memory()
    } else {
        SqliteStore::open(&config.database)
    };
    let store = opened.with_context(|| format!("opening database {}", config.database))?;
    info!("database environment ready: {}", config.database);

    let mut orchestrator = Orchestrator::with_synthetic(config.bench.clone(), store)?;
    let table = orchestrator.run_into(&mut TableReport::stdout())?;

    if let Some(path) = &config.json_output {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        JsonReport::new(BufWriter::new(file))
            .consume(&table)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("wrote JSON report to {}", path.display());
    }
    Ok(())
}
