//! Fairness-preserving benchmark driver.
//!
//! For every configured batch size, in order:
//! 1. generate one dataset and freeze it;
//! 2. for Plaintext, SymmetricAead, HybridEnvelope (fixed order): create fresh
//!    keys, time the write phase, time the read phase, measure storage;
//! 3. reset all three tables.
//!
//! Everything runs sequentially on the calling thread.

use std::hint::black_box;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use super::config::BenchConfig;
use super::result::{BenchmarkResult, ResultSink, ResultTable};
use crate::record::{Dataset, RecordGenerator, SyntheticGenerator};
use crate::storage::{StorageAdapter, StoredRow, Table};
use crate::strategy::{EncryptionStrategy, StrategyKind};
use crate::telemetry::{PhaseTimer, ReadCounters, Stage, StageTimes, WriteCounters};
use crate::types::BenchError;
use crate::utils::duration_ms;

struct WritePhase {
    elapsed: Duration,
    counters: WriteCounters,
    stages: StageTimes,
}

struct ReadPhase {
    elapsed: Duration,
    counters: ReadCounters,
    stages: StageTimes,
}

pub struct Orchestrator<S, G> {
    config: BenchConfig,
    store: S,
    generator: G,
}

impl<S: StorageAdapter> Orchestrator<S, SyntheticGenerator> {
    /// Orchestrator over the built-in generator, seeded from `config.seed`.
    pub fn with_synthetic(config: BenchConfig, store: S) -> Result<Self, BenchError> {
        let generator = match config.seed {
            Some(seed) => SyntheticGenerator::seeded(seed),
            None => SyntheticGenerator::new(),
        };
        Self::new(config, store, generator)
    }
}

impl<S: StorageAdapter, G: RecordGenerator> Orchestrator<S, G> {
    pub fn new(config: BenchConfig, store: S, generator: G) -> Result<Self, BenchError> {
        config.validate()?;
        Ok(Self { config, store, generator })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Run every configured batch size and return the full table.
    pub fn run(&mut self) -> Result<ResultTable, BenchError> {
        info!(
            "starting benchmark: batches={:?} chunk_size={} wrap_key_bits={}",
            self.config.batch_sizes, self.config.chunk_size, self.config.wrap_key_bits
        );
        self.reset_all()?;

        let mut table = ResultTable::default();
        let batch_sizes = self.config.batch_sizes.clone();
        for n in batch_sizes {
            table.extend(self.run_batch(n)?);
        }
        Ok(table)
    }

    /// `run`, then hand the table to `sink`.
    pub fn run_into(&mut self, sink: &mut dyn ResultSink) -> Result<ResultTable, BenchError> {
        let table = self.run()?;
        sink.consume(&table)?;
        Ok(table)
    }

    /// One batch: shared dataset, all strategies, then table reset.
    ///
    /// Tables are reset even when a strategy fails; the strategy error wins
    /// over a cleanup failure.
    pub fn run_batch(&mut self, n: usize) -> Result<Vec<BenchmarkResult>, BenchError> {
        info!("[batch {n}] generating dataset");
        let dataset = self.generate_dataset(n)?;

        let outcome = self.run_strategies(&dataset);
        let cleanup = self.reset_all();
        match outcome {
            Ok(results) => {
                cleanup?;
                Ok(results)
            }
            Err(e) => {
                if let Err(cleanup_err) = cleanup {
                    warn!("[batch {n}] table reset after failure also failed: {cleanup_err}");
                }
                Err(e)
            }
        }
    }

    fn generate_dataset(&mut self, n: usize) -> Result<Dataset, BenchError> {
        let records = self.generator.generate(n);
        if records.len() != n {
            return Err(BenchError::Generator { expected: n, actual: records.len() });
        }
        Ok(Dataset::new(records))
    }

    fn run_strategies(&mut self, dataset: &Dataset) -> Result<Vec<BenchmarkResult>, BenchError> {
        let mut results = Vec::with_capacity(StrategyKind::ALL.len());
        for kind in StrategyKind::ALL {
            results.push(self.run_strategy(kind, dataset)?);
        }
        Ok(results)
    }

    /// Benchmark one strategy over `dataset`. Key material is created here and
    /// dropped before returning.
    pub fn run_strategy(
        &mut self,
        kind: StrategyKind,
        dataset: &Dataset,
    ) -> Result<BenchmarkResult, BenchError> {
        let n = dataset.len();
        info!("[batch {n}] running {kind}");

        let setup = Instant::now();
        let strategy = kind.instantiate(self.config.wrap_key_bits)?;
        let key_setup = setup.elapsed();

        let write = self.write_phase(strategy.as_ref(), dataset)?;
        let read = self.read_phase(strategy.as_ref())?;
        drop(strategy);

        let table = kind.table();
        let storage_bytes = self.store.byte_size(table, table.columns())?;

        let mut stage_times = write.stages;
        stage_times.merge(&read.stages);
        stage_times.add(Stage::KeySetup, key_setup);

        let result = BenchmarkResult {
            key_setup_ms: duration_ms(key_setup),
            write: write.counters,
            read: read.counters,
            stage_times,
            input_fingerprint: dataset.fingerprint().to_owned(),
            ..BenchmarkResult::new(kind, n, write.elapsed, read.elapsed, storage_bytes)
        };

        if result.read.rows_selected != n as u64 {
            warn!(
                "[batch {n}] {kind}: selected {} rows, wrote {n}",
                result.read.rows_selected
            );
        }
        if result.skipped() > 0 {
            warn!("[batch {n}] {kind}: skipped {} undecodable rows", result.skipped());
        }
        debug!(
            "[batch {n}] {kind}: write={:.2}ms read={:.2}ms tps={:.2} size={:.2}KB",
            result.write_ms, result.read_ms, result.tps, result.storage_kb
        );
        Ok(result)
    }

    fn write_phase(
        &mut self,
        strategy: &dyn EncryptionStrategy,
        dataset: &Dataset,
    ) -> Result<WritePhase, BenchError> {
        let mut timer = PhaseTimer::start();
        let mut counters = WriteCounters::default();

        if let Err(e) = self.write_rows(strategy, dataset, &mut timer, &mut counters) {
            if let Err(rollback_err) = self.store.rollback() {
                warn!("rollback after failed write phase failed: {rollback_err}");
            }
            return Err(e);
        }

        let elapsed = timer.finish();
        debug!(
            "{} write phase: {} rows in {} chunks, {:.2}ms",
            strategy.kind(),
            counters.rows_written,
            counters.chunks,
            duration_ms(elapsed)
        );
        Ok(WritePhase { elapsed, counters, stages: timer.stage_times })
    }

    fn write_rows(
        &mut self,
        strategy: &dyn EncryptionStrategy,
        dataset: &Dataset,
        timer: &mut PhaseTimer,
        counters: &mut WriteCounters,
    ) -> Result<(), BenchError> {
        let table = strategy.kind().table();

        let rows = timer.time(Stage::Protect, || {
            dataset
                .records()
                .iter()
                .map(|r| strategy.protect(r))
                .collect::<Result<Vec<StoredRow>, _>>()
        })?;

        for chunk in rows.chunks(self.config.chunk_size) {
            let written = timer.time(Stage::Insert, || self.store.insert_many(table, chunk))?;
            counters.add_chunk(written, chunk_bytes(table, chunk));
        }
        timer.time(Stage::Commit, || self.store.commit())?;
        Ok(())
    }

    /// Select everything back and reveal row by row. A row that fails to
    /// decode is counted under its class and skipped; storage faults abort.
    fn read_phase(&mut self, strategy: &dyn EncryptionStrategy) -> Result<ReadPhase, BenchError> {
        let table = strategy.kind().table();
        let mut timer = PhaseTimer::start();

        let rows = timer.time(Stage::Select, || self.store.select_all(table))?;
        let mut counters = ReadCounters { rows_selected: rows.len() as u64, ..Default::default() };

        timer.time(Stage::Reveal, || {
            for row in &rows {
                let outcome = strategy.reveal(row);
                counters.record(&outcome);
                if let Ok(record) = outcome {
                    black_box(record);
                }
            }
        });

        let elapsed = timer.finish();
        debug!(
            "{} read phase: {} decoded, {} skipped, {:.2}ms",
            strategy.kind(),
            counters.decoded,
            counters.total_skipped(),
            duration_ms(elapsed)
        );
        Ok(ReadPhase { elapsed, counters, stages: timer.stage_times })
    }

    fn reset_all(&mut self) -> Result<(), BenchError> {
        for table in Table::ALL {
            self.store.reset(table)?;
        }
        Ok(())
    }
}

fn chunk_bytes(table: Table, chunk: &[StoredRow]) -> u64 {
    chunk.iter().map(|r| r.byte_len(table.columns())).sum()
}
