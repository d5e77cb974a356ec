//! telemetry/counters.rs
//! Mutable counters collected during the write and read phases.
//!
//! Read counters keep one bucket per skip class so a malformed blob is never
//! confused with an authentication failure, even though both are skipped.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::crypto::{RevealError, SkipClass};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteCounters {
    pub rows_written: u64,
    pub chunks: u64,
    /// Encoded bytes handed to the store (all persisted columns).
    pub bytes_encoded: u64,
}

impl WriteCounters {
    /// Record one `insert_many` call.
    pub fn add_chunk(&mut self, rows: usize, bytes: u64) {
        self.chunks += 1;
        self.rows_written += rows as u64;
        self.bytes_encoded += bytes;
    }
}

impl AddAssign for WriteCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.rows_written  += rhs.rows_written;
        self.chunks        += rhs.chunks;
        self.bytes_encoded += rhs.bytes_encoded;
    }
}

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadCounters {
    pub rows_selected: u64,
    pub decoded: u64,
    pub skipped_authentication: u64,
    pub skipped_key_unwrap: u64,
    pub skipped_malformed: u64,
    pub skipped_invalid_text: u64,
}

impl ReadCounters {
    /// Count one decode outcome.
    pub fn record<T>(&mut self, outcome: &Result<T, RevealError>) {
        match outcome {
            Ok(_) => self.decoded += 1,
            Err(e) => self.add_skip(e.class()),
        }
    }

    pub fn add_skip(&mut self, class: SkipClass) {
        match class {
            SkipClass::Authentication => self.skipped_authentication += 1,
            SkipClass::KeyUnwrap => self.skipped_key_unwrap += 1,
            SkipClass::Malformed => self.skipped_malformed += 1,
            SkipClass::InvalidText => self.skipped_invalid_text += 1,
        }
    }

    pub fn skipped(&self, class: SkipClass) -> u64 {
        match class {
            SkipClass::Authentication => self.skipped_authentication,
            SkipClass::KeyUnwrap => self.skipped_key_unwrap,
            SkipClass::Malformed => self.skipped_malformed,
            SkipClass::InvalidText => self.skipped_invalid_text,
        }
    }

    pub fn total_skipped(&self) -> u64 {
        self.skipped_authentication
            + self.skipped_key_unwrap
            + self.skipped_malformed
            + self.skipped_invalid_text
    }

    /// Every selected row is either decoded or skipped.
    pub fn is_balanced(&self) -> bool {
        self.decoded + self.total_skipped() == self.rows_selected
    }

    pub fn merge(&mut self, other: &ReadCounters) {
        self.rows_selected          += other.rows_selected;
        self.decoded                += other.decoded;
        self.skipped_authentication += other.skipped_authentication;
        self.skipped_key_unwrap     += other.skipped_key_unwrap;
        self.skipped_malformed      += other.skipped_malformed;
        self.skipped_invalid_text   += other.skipped_invalid_text;
    }
}

impl AddAssign for ReadCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
