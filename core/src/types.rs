use thiserror::Error;

use crate::crypto::CryptoError;
use crate::storage::StorageError;

/// Unified fatal error for a benchmark run.
/// - `From<T>` impls enable `?` across layers.
/// - Per-record decode failures are NOT represented here; they are counted
///   by the read phase and never abort a run.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Store unreachable or schema creation failed.
    #[error("setup error: {0}")]
    Setup(#[source] StorageError),

    /// Storage fault during a phase (insert / commit / select / size).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Key setup or protect failure.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A result sink failed to write its output.
    #[error("report error: {0}")]
    Report(#[from] std::io::Error),

    /// Generator returned the wrong number of records.
    #[error("generator returned {actual} records, expected {expected}")]
    Generator { expected: usize, actual: usize },
}
