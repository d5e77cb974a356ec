//! Baseline: fields are stored as their UTF-8 bytes.

use super::{EncryptionStrategy, StrategyKind};
use crate::crypto::{CryptoError, RevealError};
use crate::record::Record;
use crate::storage::StoredRow;

#[derive(Debug, Clone, Copy, Default)]
pub struct Plaintext;

fn text(bytes: &[u8]) -> Result<String, RevealError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| RevealError::InvalidText)
}

impl EncryptionStrategy for Plaintext {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Plaintext
    }

    fn protect(&self, record: &Record) -> Result<StoredRow, CryptoError> {
        Ok(StoredRow::new(
            record.name.as_bytes().to_vec(),
            record.email.as_bytes().to_vec(),
            record.notes.as_bytes().to_vec(),
        ))
    }

    fn reveal(&self, row: &StoredRow) -> Result<Record, RevealError> {
        Ok(Record {
            name: text(&row.name)?,
            email: text(&row.email)?,
            notes: text(&row.notes)?,
        })
    }
}
