//! Envelope encryption: a fresh AES-256-GCM key per record, wrapped with
//! RSA-OAEP under the run's key pair.
//!
//! The per-record key encrypts that record's three fields and nothing else.
//! After wrapping it only exists in its wrapped form; the plaintext copy is
//! zeroized on drop.

use zeroize::Zeroizing;

use super::{EncryptionStrategy, StrategyKind};
use crate::constants::KEY_LEN_32;
use crate::crypto::{random_bytes, CryptoError, FieldCipher, KeyWrapper, RevealError};
use crate::record::Record;
use crate::storage::StoredRow;

pub struct HybridEnvelope {
    wrapper: KeyWrapper,
}

impl HybridEnvelope {
    pub fn generate(wrap_key_bits: usize) -> Result<Self, CryptoError> {
        Ok(Self { wrapper: KeyWrapper::generate(wrap_key_bits)? })
    }

    /// Length of every `wrapped_key` this instance produces.
    pub fn wrapped_key_len(&self) -> usize {
        self.wrapper.wrapped_len()
    }
}

impl EncryptionStrategy for HybridEnvelope {
    fn kind(&self) -> StrategyKind {
        StrategyKind::HybridEnvelope
    }

    fn protect(&self, record: &Record) -> Result<StoredRow, CryptoError> {
        let row_key = Zeroizing::new(random_bytes::<KEY_LEN_32>());
        let cipher = FieldCipher::new(&row_key);

        let row = StoredRow::new(
            cipher.seal(record.name.as_bytes())?,
            cipher.seal(record.email.as_bytes())?,
            cipher.seal(record.notes.as_bytes())?,
        );
        let wrapped = self.wrapper.wrap_key(&row_key)?;
        Ok(row.with_wrapped_key(wrapped))
    }

    fn reveal(&self, row: &StoredRow) -> Result<Record, RevealError> {
        let wrapped = row.wrapped_key.as_deref().ok_or(RevealError::MalformedEncoding {
            len: 0,
            min: self.wrapper.wrapped_len(),
        })?;
        let row_key = self.wrapper.unwrap_key(wrapped)?;
        let cipher = FieldCipher::new(&row_key);

        Ok(Record {
            name: cipher.open_text(&row.name)?,
            email: cipher.open_text(&row.email)?,
            notes: cipher.open_text(&row.notes)?,
        })
    }
}
