//! Per-(strategy, batch) measurements and the result table handed to sinks.

use std::io;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::strategy::StrategyKind;
use crate::telemetry::{ReadCounters, Stage, StageTimes, WriteCounters};
use crate::utils::{bytes_to_kb, duration_ms, transactions_per_sec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub strategy: StrategyKind,
    pub batch_size: usize,
    pub write_ms: f64,
    pub read_ms: f64,
    /// `batch_size / (write_ms / 1000)`, or 0 when `write_ms` is 0.
    pub tps: f64,
    pub storage_bytes: u64,
    pub storage_kb: f64,
    pub key_setup_ms: f64,
    pub write: WriteCounters,
    pub read: ReadCounters,
    pub stage_times: StageTimes,
    /// Fingerprint of the dataset this run consumed.
    pub input_fingerprint: String,
}

impl BenchmarkResult {
    pub fn new(
        strategy: StrategyKind,
        batch_size: usize,
        write: Duration,
        read: Duration,
        storage_bytes: u64,
    ) -> Self {
        let write_ms = duration_ms(write);
        Self {
            strategy,
            batch_size,
            write_ms,
            read_ms: duration_ms(read),
            tps: transactions_per_sec(batch_size, write_ms),
            storage_bytes,
            storage_kb: bytes_to_kb(storage_bytes),
            key_setup_ms: 0.0,
            write: WriteCounters::default(),
            read: ReadCounters::default(),
            stage_times: StageTimes::default(),
            input_fingerprint: String::new(),
        }
    }

    pub fn skipped(&self) -> u64 {
        self.read.total_skipped()
    }

    /// Internal consistency:
    /// - every written row was selected back and either decoded or skipped
    /// - stage times do not exceed their phase spans
    pub fn sanity_check(&self) -> bool {
        let write_stages = self.stage_times.sum_of(&[Stage::Protect, Stage::Insert, Stage::Commit]);
        let read_stages = self.stage_times.sum_of(&[Stage::Select, Stage::Reveal]);
        self.write.rows_written == self.batch_size as u64
            && self.read.rows_selected == self.write.rows_written
            && self.read.is_balanced()
            && duration_ms(write_stages) <= self.write_ms + f64::EPSILON
            && duration_ms(read_stages) <= self.read_ms + f64::EPSILON
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultTable {
    results: Vec<BenchmarkResult>,
}

impl ResultTable {
    pub fn push(&mut self, result: BenchmarkResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BenchmarkResult> {
        self.results.iter()
    }

    pub fn get(&self, strategy: StrategyKind, batch_size: usize) -> Option<&BenchmarkResult> {
        self.results
            .iter()
            .find(|r| r.strategy == strategy && r.batch_size == batch_size)
    }

    pub fn for_batch(&self, batch_size: usize) -> impl Iterator<Item = &BenchmarkResult> {
        self.results.iter().filter(move |r| r.batch_size == batch_size)
    }

    /// Distinct batch sizes in run order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        let mut out: Vec<usize> = Vec::new();
        for r in &self.results {
            if out.last() != Some(&r.batch_size) {
                out.push(r.batch_size);
            }
        }
        out
    }
}

impl Extend<BenchmarkResult> for ResultTable {
    fn extend<T: IntoIterator<Item = BenchmarkResult>>(&mut self, iter: T) {
        self.results.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a BenchmarkResult;
    type IntoIter = std::slice::Iter<'a, BenchmarkResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Consumer of a finished result table (reporting, plotting, persistence).
pub trait ResultSink {
    fn consume(&mut self, table: &ResultTable) -> io::Result<()>;
}

/// Collect tables in memory.
impl ResultSink for Vec<ResultTable> {
    fn consume(&mut self, table: &ResultTable) -> io::Result<()> {
        self.push(table.clone());
        Ok(())
    }
}
