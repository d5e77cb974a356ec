//! Encryption strategies benchmarked against identical input.
//!
//! Each strategy owns the key material for exactly one run. A new instance
//! (and therefore new keys) is created for every (batch, strategy) pair and
//! dropped when that run ends.

pub mod hybrid;
pub mod plaintext;
pub mod symmetric;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::{CryptoError, RevealError};
use crate::record::Record;
use crate::storage::{StoredRow, Table};

pub use hybrid::HybridEnvelope;
pub use plaintext::Plaintext;
pub use symmetric::SymmetricAead;

/// Encode/decode policy for one record.
pub trait EncryptionStrategy {
    fn kind(&self) -> StrategyKind;

    /// Encode every field of `record` (and, for envelopes, the wrapped key).
    fn protect(&self, record: &Record) -> Result<StoredRow, CryptoError>;

    /// Decode a stored row. Failures are per-record and recoverable.
    fn reveal(&self, row: &StoredRow) -> Result<Record, RevealError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    Plaintext,
    SymmetricAead,
    HybridEnvelope,
}

impl StrategyKind {
    /// Fixed run order within a batch.
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Plaintext,
        StrategyKind::SymmetricAead,
        StrategyKind::HybridEnvelope,
    ];

    pub fn table(self) -> Table {
        match self {
            StrategyKind::Plaintext => Table::Baseline,
            StrategyKind::SymmetricAead => Table::Symmetric,
            StrategyKind::HybridEnvelope => Table::Hybrid,
        }
    }

    /// Short label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::Plaintext => "Baseline",
            StrategyKind::SymmetricAead => "AES-GCM",
            StrategyKind::HybridEnvelope => "Hybrid",
        }
    }

    /// Create a strategy with fresh key material.
    pub fn instantiate(self, wrap_key_bits: usize) -> Result<Box<dyn EncryptionStrategy>, CryptoError> {
        Ok(match self {
            StrategyKind::Plaintext => Box::new(Plaintext),
            StrategyKind::SymmetricAead => Box::new(SymmetricAead::generate()),
            StrategyKind::HybridEnvelope => Box::new(HybridEnvelope::generate(wrap_key_bits)?),
        })
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
