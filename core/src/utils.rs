use std::time::Duration;

use sha2::{Digest, Sha256};

use crate::record::Record;

/// Hex SHA-256 over `count || (len || bytes)*` for every field of every record.
///
/// Length prefixes keep `("ab", "c")` and `("a", "bc")` distinct.
pub fn fingerprint_records(records: &[Record]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((records.len() as u64).to_le_bytes());
    for record in records {
        for field in record.fields() {
            hasher.update((field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
    }
    hex::encode(hasher.finalize())
}

/// Duration as fractional milliseconds.
#[inline]
pub fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

/// Bytes to KiB (the "KB" of the report).
#[inline]
pub fn bytes_to_kb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

/// Records per second over the write phase; 0 when nothing was measured.
#[inline]
pub fn transactions_per_sec(batch_size: usize, write_ms: f64) -> f64 {
    if write_ms > 0.0 {
        batch_size as f64 / (write_ms / 1_000.0)
    } else {
        0.0
    }
}

#[inline]
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
