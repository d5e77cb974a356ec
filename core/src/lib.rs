//! sealbench-core
//!
//! Encryption strategies for persisted records and a benchmark orchestrator
//! that replays identical workloads across them.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

pub mod crypto;
pub mod record;
pub mod storage;
pub mod strategy;
pub mod telemetry;

// Orchestration and reporting
pub mod bench;
pub mod report;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::bench::{BenchConfig, BenchmarkResult, Orchestrator, ResultSink, ResultTable};
    pub use crate::crypto::{CryptoError, RevealError, SkipClass};
    pub use crate::record::{Dataset, Record, RecordGenerator, SyntheticGenerator};
    pub use crate::report::{JsonReport, TableReport};
    pub use crate::storage::{MemoryStore, SqliteStore, StorageAdapter, StoredRow, Table};
    pub use crate::strategy::{EncryptionStrategy, StrategyKind};
    pub use crate::types::BenchError;
}
