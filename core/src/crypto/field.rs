//! crypto/field.rs
//! Fixed layout of an encrypted field.
//!
//! ```text
//! [16-byte nonce][16-byte tag][ciphertext ...]
//! ```
//!
//! Offsets are part of the storage format. Rows written by one build must be
//! readable by any other, so they never move.

use crate::constants::{FIELD_HEADER_LEN, NONCE_LEN, TAG_LEN};
use crate::crypto::types::RevealError;

/// Borrowed view over an encoded field blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedField<'a> {
    pub nonce: &'a [u8; NONCE_LEN],
    pub tag: &'a [u8; TAG_LEN],
    pub ciphertext: &'a [u8],
}

impl<'a> EncodedField<'a> {
    /// Split a blob at the fixed offsets.
    ///
    /// Anything shorter than the header is rejected as malformed before any
    /// cryptographic work is attempted, so a truncated blob is never reported
    /// as an authentication failure.
    pub fn parse(blob: &'a [u8]) -> Result<Self, RevealError> {
        if blob.len() < FIELD_HEADER_LEN {
            return Err(RevealError::MalformedEncoding {
                len: blob.len(),
                min: FIELD_HEADER_LEN,
            });
        }
        let (nonce, rest) = blob.split_at(NONCE_LEN);
        let (tag, ciphertext) = rest.split_at(TAG_LEN);

        let malformed = || RevealError::MalformedEncoding { len: blob.len(), min: FIELD_HEADER_LEN };
        Ok(Self {
            nonce: nonce.try_into().map_err(|_| malformed())?,
            tag: tag.try_into().map_err(|_| malformed())?,
            ciphertext,
        })
    }

    /// Total encoded length.
    pub fn encoded_len(&self) -> usize {
        FIELD_HEADER_LEN + self.ciphertext.len()
    }

    /// Assemble `nonce || tag || ciphertext`.
    pub fn compose(nonce: &[u8; NONCE_LEN], tag: &[u8; TAG_LEN], ciphertext: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(FIELD_HEADER_LEN + ciphertext.len());
        out.extend_from_slice(nonce);
        out.extend_from_slice(tag);
        out.extend_from_slice(ciphertext);
        out
    }
}
