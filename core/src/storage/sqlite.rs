//! SQLite-backed store.
//!
//! `baseline` keeps its fields as TEXT; `symmetric` and `hybrid` keep opaque
//! BLOBs. Size accounting casts every column to BLOB first so text is counted
//! in octets rather than characters.

use std::path::Path;

use log::debug;
use rusqlite::{params, Connection, Row};

use super::{Column, StorageAdapter, StorageError, StoredRow, Table};
use crate::types::BenchError;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS baseline (
        id    INTEGER PRIMARY KEY,
        name  TEXT NOT NULL,
        email TEXT NOT NULL,
        notes TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS symmetric (
        id    INTEGER PRIMARY KEY,
        name  BLOB NOT NULL,
        email BLOB NOT NULL,
        notes BLOB NOT NULL
    );
    CREATE TABLE IF NOT EXISTS hybrid (
        id          INTEGER PRIMARY KEY,
        name        BLOB NOT NULL,
        email       BLOB NOT NULL,
        notes       BLOB NOT NULL,
        wrapped_key BLOB NOT NULL
    );";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file and make sure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BenchError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| BenchError::Setup(e.into()))?;
        debug!("opened sqlite store at {}", path.display());
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, BenchError> {
        let conn = Connection::open_in_memory().map_err(|e| BenchError::Setup(e.into()))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, BenchError> {
        configure_connection(&conn).map_err(BenchError::Setup)?;
        conn.execute_batch(SCHEMA).map_err(|e| BenchError::Setup(e.into()))?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn begin_if_needed(&self) -> Result<(), StorageError> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN")?;
        }
        Ok(())
    }

    fn insert_text_rows(&self, rows: &[StoredRow]) -> Result<usize, StorageError> {
        let mut stmt = self
            .conn
            .prepare("INSERT INTO baseline (name, email, notes) VALUES (?1, ?2, ?3)")?;
        for row in rows {
            stmt.execute(params![
                as_text(&row.name, Column::Name)?,
                as_text(&row.email, Column::Email)?,
                as_text(&row.notes, Column::Notes)?,
            ])?;
        }
        Ok(rows.len())
    }

    fn insert_blob_rows(&self, rows: &[StoredRow]) -> Result<usize, StorageError> {
        let mut stmt = self
            .conn
            .prepare("INSERT INTO symmetric (name, email, notes) VALUES (?1, ?2, ?3)")?;
        for row in rows {
            stmt.execute(params![row.name, row.email, row.notes])?;
        }
        Ok(rows.len())
    }

    fn insert_hybrid_rows(&self, rows: &[StoredRow]) -> Result<usize, StorageError> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO hybrid (name, email, notes, wrapped_key) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for row in rows {
            stmt.execute(params![row.name, row.email, row.notes, row.wrapped_key])?;
        }
        Ok(rows.len())
    }
}

/// Connection pragmas for bulk benchmarking.
pub fn configure_connection(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA temp_store = MEMORY;",
    )?;
    Ok(())
}

fn as_text(bytes: &[u8], column: Column) -> Result<&str, StorageError> {
    std::str::from_utf8(bytes).map_err(|_| StorageError::NotText {
        table: Table::Baseline,
        column: column.name(),
    })
}

fn select_sql(table: Table) -> &'static str {
    match table {
        Table::Baseline => "SELECT name, email, notes FROM baseline",
        Table::Symmetric => "SELECT name, email, notes FROM symmetric",
        Table::Hybrid => "SELECT name, email, notes, wrapped_key FROM hybrid",
    }
}

fn text_row(row: &Row<'_>) -> rusqlite::Result<StoredRow> {
    Ok(StoredRow::new(
        row.get::<_, String>(0)?.into_bytes(),
        row.get::<_, String>(1)?.into_bytes(),
        row.get::<_, String>(2)?.into_bytes(),
    ))
}

fn blob_row(row: &Row<'_>) -> rusqlite::Result<StoredRow> {
    Ok(StoredRow::new(row.get(0)?, row.get(1)?, row.get(2)?))
}

fn hybrid_row(row: &Row<'_>) -> rusqlite::Result<StoredRow> {
    Ok(StoredRow {
        name: row.get(0)?,
        email: row.get(1)?,
        notes: row.get(2)?,
        wrapped_key: row.get(3)?,
    })
}

impl StorageAdapter for SqliteStore {
    fn reset(&mut self, table: Table) -> Result<(), StorageError> {
        self.conn.execute(&format!("DELETE FROM {}", table.name()), [])?;
        Ok(())
    }

    fn insert_many(&mut self, table: Table, rows: &[StoredRow]) -> Result<usize, StorageError> {
        if rows.is_empty() {
            return Ok(0);
        }
        self.begin_if_needed()?;
        match table {
            Table::Baseline => self.insert_text_rows(rows),
            Table::Symmetric => self.insert_blob_rows(rows),
            Table::Hybrid => self.insert_hybrid_rows(rows),
        }
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), StorageError> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("ROLLBACK")?;
        }
        Ok(())
    }

    fn select_all(&mut self, table: Table) -> Result<Vec<StoredRow>, StorageError> {
        let mut stmt = self.conn.prepare(select_sql(table))?;
        let rows = match table {
            Table::Baseline => stmt.query_map([], text_row)?.collect::<rusqlite::Result<Vec<_>>>()?,
            Table::Symmetric => stmt.query_map([], blob_row)?.collect::<rusqlite::Result<Vec<_>>>()?,
            Table::Hybrid => stmt.query_map([], hybrid_row)?.collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
    }

    fn byte_size(&mut self, table: Table, columns: &[Column]) -> Result<u64, StorageError> {
        if columns.is_empty() {
            return Ok(0);
        }
        let expr = columns
            .iter()
            .map(|c| format!("COALESCE(length(CAST({} AS BLOB)), 0)", c.name()))
            .collect::<Vec<_>>()
            .join(" + ");
        let sql = format!("SELECT COALESCE(SUM({expr}), 0) FROM {}", table.name());
        let total: i64 = self.conn.query_row(&sql, [], |r| r.get(0))?;
        Ok(total.max(0) as u64)
    }
}
