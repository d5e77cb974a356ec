//! Storage seam: one logical table per strategy.
//!
//! Two implementations are provided:
//! - [`sqlite::SqliteStore`]: rusqlite-backed relational store
//! - [`memory::MemoryStore`]: in-memory store with fault injection for tests

pub mod memory;
pub mod sqlite;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::tables;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Table {
    Baseline,
    Symmetric,
    Hybrid,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Baseline, Table::Symmetric, Table::Hybrid];

    pub fn name(self) -> &'static str {
        match self {
            Table::Baseline => tables::BASELINE,
            Table::Symmetric => tables::SYMMETRIC,
            Table::Hybrid => tables::HYBRID,
        }
    }

    /// Persisted data columns counted toward storage size.
    pub fn columns(self) -> &'static [Column] {
        match self {
            Table::Baseline | Table::Symmetric => &[Column::Name, Column::Email, Column::Notes],
            Table::Hybrid => &[Column::Name, Column::Email, Column::Notes, Column::WrappedKey],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Email,
    Notes,
    WrappedKey,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Email => "email",
            Column::Notes => "notes",
            Column::WrappedKey => "wrapped_key",
        }
    }
}

/// An already-encoded row as persisted. `wrapped_key` is only set for the
/// hybrid table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoredRow {
    pub name: Vec<u8>,
    pub email: Vec<u8>,
    pub notes: Vec<u8>,
    pub wrapped_key: Option<Vec<u8>>,
}

impl StoredRow {
    pub fn new(name: Vec<u8>, email: Vec<u8>, notes: Vec<u8>) -> Self {
        Self { name, email, notes, wrapped_key: None }
    }

    pub fn with_wrapped_key(mut self, wrapped_key: Vec<u8>) -> Self {
        self.wrapped_key = Some(wrapped_key);
        self
    }

    pub fn fields(&self) -> [&[u8]; 3] {
        [&self.name, &self.email, &self.notes]
    }

    pub fn column(&self, column: Column) -> Option<&[u8]> {
        match column {
            Column::Name => Some(&self.name),
            Column::Email => Some(&self.email),
            Column::Notes => Some(&self.notes),
            Column::WrappedKey => self.wrapped_key.as_deref(),
        }
    }

    pub fn column_mut(&mut self, column: Column) -> Option<&mut Vec<u8>> {
        match column {
            Column::Name => Some(&mut self.name),
            Column::Email => Some(&mut self.email),
            Column::Notes => Some(&mut self.notes),
            Column::WrappedKey => self.wrapped_key.as_mut(),
        }
    }

    /// Octet length of the named columns; absent columns count as zero.
    pub fn byte_len(&self, columns: &[Column]) -> u64 {
        columns
            .iter()
            .filter_map(|c| self.column(*c))
            .map(|v| v.len() as u64)
            .sum()
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Text table received bytes that are not UTF-8.
    #[error("table {table}: column {column} is not valid UTF-8")]
    NotText { table: Table, column: &'static str },

    /// Fault raised by a test store.
    #[error("injected fault on table {0}")]
    Injected(Table),
}

/// Persistence operations the orchestrator needs.
///
/// Chunking is the caller's job: `insert_many` persists whatever slice it is
/// given. Writes become durable at `commit`; `rollback` discards uncommitted
/// writes and must be safe to call when nothing is pending.
pub trait StorageAdapter {
    /// Empty the table. Idempotent.
    fn reset(&mut self, table: Table) -> Result<(), StorageError>;

    /// Persist a sequence of encoded rows. Returns the number written.
    fn insert_many(&mut self, table: Table, rows: &[StoredRow]) -> Result<usize, StorageError>;

    fn commit(&mut self) -> Result<(), StorageError>;

    fn rollback(&mut self) -> Result<(), StorageError>;

    /// Every row of the table, in implementation-defined order.
    fn select_all(&mut self, table: Table) -> Result<Vec<StoredRow>, StorageError>;

    /// Sum of octet lengths of `columns` across all rows; 0 when empty.
    fn byte_size(&mut self, table: Table, columns: &[Column]) -> Result<u64, StorageError>;
}
