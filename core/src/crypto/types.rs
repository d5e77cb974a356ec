//! crypto/types.rs
//! Error types for field encryption and key wrapping.

use thiserror::Error;

/// Failure while producing key material or an encoding.
///
/// These are fatal for the run: a strategy that cannot protect its input
/// produces no comparable measurement.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Invalid key length provided to cipher.
    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    /// Asymmetric key pair generation failed.
    #[error("wrap key generation failed: {0}")]
    KeyGeneration(String),

    /// AEAD seal failed.
    #[error("AES-GCM seal failed")]
    Seal,

    /// Public-key wrap of a per-record key failed.
    #[error("key wrap failed: {0}")]
    Wrap(String),
}

/// Why a stored row could not be turned back into a record.
///
/// Every variant is recoverable during bulk reads: the row is skipped and
/// counted under its [`SkipClass`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevealError {
    /// AEAD tag did not verify (tampered data or wrong key).
    #[error("authentication failed: AEAD tag mismatch")]
    Authentication,

    /// The wrapped per-record key could not be unwrapped.
    #[error("key unwrap failed")]
    KeyUnwrap,

    /// Blob is shorter than the fixed field header, or a column is missing.
    #[error("malformed encoding: length={len}, minimum={min}")]
    MalformedEncoding { len: usize, min: usize },

    /// Decoded bytes are not valid UTF-8 text.
    #[error("decoded field is not valid UTF-8")]
    InvalidText,
}

/// Counter bucket for a skipped row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipClass {
    Authentication,
    KeyUnwrap,
    Malformed,
    InvalidText,
}

impl RevealError {
    pub fn class(&self) -> SkipClass {
        match self {
            RevealError::Authentication => SkipClass::Authentication,
            RevealError::KeyUnwrap => SkipClass::KeyUnwrap,
            RevealError::MalformedEncoding { .. } => SkipClass::Malformed,
            RevealError::InvalidText => SkipClass::InvalidText,
        }
    }
}
