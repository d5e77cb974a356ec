//! AES-256-GCM under one key shared by every record of the run.

use zeroize::Zeroizing;

use super::{EncryptionStrategy, StrategyKind};
use crate::constants::KEY_LEN_32;
use crate::crypto::{random_bytes, CryptoError, FieldCipher, RevealError};
use crate::record::Record;
use crate::storage::StoredRow;

pub struct SymmetricAead {
    cipher: FieldCipher,
}

impl SymmetricAead {
    /// Draw a fresh run key. The raw bytes are wiped once the cipher is keyed.
    pub fn generate() -> Self {
        let key = Zeroizing::new(random_bytes::<KEY_LEN_32>());
        Self::with_key(&key)
    }

    pub fn with_key(key: &[u8; KEY_LEN_32]) -> Self {
        Self { cipher: FieldCipher::new(key) }
    }
}

impl EncryptionStrategy for SymmetricAead {
    fn kind(&self) -> StrategyKind {
        StrategyKind::SymmetricAead
    }

    fn protect(&self, record: &Record) -> Result<StoredRow, CryptoError> {
        Ok(StoredRow::new(
            self.cipher.seal(record.name.as_bytes())?,
            self.cipher.seal(record.email.as_bytes())?,
            self.cipher.seal(record.notes.as_bytes())?,
        ))
    }

    fn reveal(&self, row: &StoredRow) -> Result<Record, RevealError> {
        Ok(Record {
            name: self.cipher.open_text(&row.name)?,
            email: self.cipher.open_text(&row.email)?,
            notes: self.cipher.open_text(&row.notes)?,
        })
    }
}
