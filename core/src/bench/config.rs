use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BATCH_SIZES, DEFAULT_CHUNK_SIZE, DEFAULT_WRAP_KEY_BITS, MAX_WRAP_KEY_BITS,
    MIN_WRAP_KEY_BITS,
};
use crate::types::BenchError;

/// Benchmark configuration passed into the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Rows per `insert_many` call.
    pub chunk_size: usize,

    /// Record counts to benchmark, processed in the given order.
    pub batch_sizes: Vec<usize>,

    /// RSA modulus size for the envelope wrap key.
    pub wrap_key_bits: usize,

    /// Seed for the synthetic generator. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            batch_sizes: DEFAULT_BATCH_SIZES.to_vec(),
            wrap_key_bits: DEFAULT_WRAP_KEY_BITS,
            seed: None,
        }
    }
}

impl BenchConfig {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_batch_sizes(mut self, batch_sizes: impl Into<Vec<usize>>) -> Self {
        self.batch_sizes = batch_sizes.into();
        self
    }

    pub fn with_wrap_key_bits(mut self, bits: usize) -> Self {
        self.wrap_key_bits = bits;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.chunk_size == 0 {
            return Err(BenchError::Config("chunk_size must be greater than zero".into()));
        }
        if self.batch_sizes.is_empty() {
            return Err(BenchError::Config("batch_sizes must not be empty".into()));
        }
        if self.batch_sizes.contains(&0) {
            return Err(BenchError::Config("batch sizes must be greater than zero".into()));
        }
        if self.batch_sizes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(BenchError::Config(format!(
                "batch_sizes must be strictly ascending, got {:?}",
                self.batch_sizes
            )));
        }
        if !(MIN_WRAP_KEY_BITS..=MAX_WRAP_KEY_BITS).contains(&self.wrap_key_bits)
            || self.wrap_key_bits % 8 != 0
        {
            return Err(BenchError::Config(format!(
                "wrap_key_bits must be a multiple of 8 in {MIN_WRAP_KEY_BITS}..={MAX_WRAP_KEY_BITS}, got {}",
                self.wrap_key_bits
            )));
        }
        Ok(())
    }
}
