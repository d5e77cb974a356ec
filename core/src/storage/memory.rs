//! In-memory store for tests.
//!
//! Mirrors the SQLite semantics (staged writes become visible at `commit`)
//! and adds hooks the relational store cannot offer: an insertion history
//! that survives `reset`, per-call chunk sizes, row corruption on commit, and
//! injected `select_all` failures.

use std::collections::{HashMap, HashSet};

use super::{Column, StorageAdapter, StorageError, StoredRow, Table};

type Corruptor = Box<dyn FnMut(Table, usize, &mut StoredRow)>;

#[derive(Default)]
pub struct MemoryStore {
    tables: HashMap<Table, Vec<StoredRow>>,
    pending: Vec<(Table, StoredRow)>,
    history: HashMap<Table, Vec<StoredRow>>,
    insert_calls: HashMap<Table, Vec<usize>>,
    commits: usize,
    rollbacks: usize,
    resets: HashMap<Table, usize>,
    fail_select: HashSet<Table>,
    fail_insert: HashSet<Table>,
    corruptor: Option<Corruptor>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `f(table, index_in_table, row)` to each row as it is committed.
    pub fn with_corruptor<F>(mut self, f: F) -> Self
    where
        F: FnMut(Table, usize, &mut StoredRow) + 'static,
    {
        self.corruptor = Some(Box::new(f));
        self
    }

    /// Make `select_all` on `table` fail with `StorageError::Injected`.
    pub fn fail_select_on(mut self, table: Table) -> Self {
        self.fail_select.insert(table);
        self
    }

    /// Make `insert_many` on `table` fail with `StorageError::Injected`.
    pub fn fail_insert_on(mut self, table: Table) -> Self {
        self.fail_insert.insert(table);
        self
    }

    /// Committed rows currently in the table.
    pub fn rows(&self, table: Table) -> &[StoredRow] {
        self.tables.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every row ever committed to the table, across resets, in commit order.
    pub fn history(&self, table: Table) -> &[StoredRow] {
        self.history.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Slice length of each `insert_many` call, across resets.
    pub fn insert_calls(&self, table: Table) -> &[usize] {
        self.insert_calls.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks
    }

    pub fn resets(&self, table: Table) -> usize {
        self.resets.get(&table).copied().unwrap_or(0)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl StorageAdapter for MemoryStore {
    fn reset(&mut self, table: Table) -> Result<(), StorageError> {
        self.tables.remove(&table);
        *self.resets.entry(table).or_insert(0) += 1;
        Ok(())
    }

    fn insert_many(&mut self, table: Table, rows: &[StoredRow]) -> Result<usize, StorageError> {
        if self.fail_insert.contains(&table) {
            return Err(StorageError::Injected(table));
        }
        self.insert_calls.entry(table).or_default().push(rows.len());
        self.pending.extend(rows.iter().cloned().map(|r| (table, r)));
        Ok(rows.len())
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        for (table, mut row) in self.pending.drain(..) {
            let stored = self.tables.entry(table).or_default();
            if let Some(corrupt) = self.corruptor.as_mut() {
                corrupt(table, stored.len(), &mut row);
            }
            self.history.entry(table).or_default().push(row.clone());
            stored.push(row);
        }
        self.commits += 1;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), StorageError> {
        self.pending.clear();
        self.rollbacks += 1;
        Ok(())
    }

    fn select_all(&mut self, table: Table) -> Result<Vec<StoredRow>, StorageError> {
        if self.fail_select.contains(&table) {
            return Err(StorageError::Injected(table));
        }
        Ok(self.rows(table).to_vec())
    }

    fn byte_size(&mut self, table: Table, columns: &[Column]) -> Result<u64, StorageError> {
        Ok(self.rows(table).iter().map(|r| r.byte_len(columns)).sum())
    }
}
