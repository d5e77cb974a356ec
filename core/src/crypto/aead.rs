//! crypto/aead.rs
//! AES-256-GCM field cipher.
//!
//! Design notes:
//! - 32-byte key, 16-byte random nonce per call (GCM derives J0 through GHASH
//!   for non-96-bit nonces), 16-byte tag, empty AAD.
//! - Output follows the `EncodedField` layout; the tag is detached so it can
//!   sit in front of the ciphertext.
//! - Tag verification must fail closed: no plaintext is returned on mismatch.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Key, Nonce, Tag};

use crate::constants::{KEY_LEN_32, TAG_LEN};
use crate::crypto::field::EncodedField;
use crate::crypto::nonce::random_nonce;
use crate::crypto::types::{CryptoError, RevealError};

/// AES-256-GCM with a 128-bit nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

#[derive(Clone)]
pub struct FieldCipher {
    cipher: Aes256Gcm16,
}

impl FieldCipher {
    pub fn new(key: &[u8; KEY_LEN_32]) -> Self {
        Self { cipher: Aes256Gcm16::new(Key::<Aes256Gcm16>::from_slice(key)) }
    }

    pub fn from_slice(key: &[u8]) -> Result<Self, CryptoError> {
        let cipher = Aes256Gcm16::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLen {
            expected: KEY_LEN_32,
            actual: key.len(),
        })?;
        Ok(Self { cipher })
    }

    /// Encrypt one field under a fresh nonce and return `nonce || tag || ciphertext`.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce = random_nonce();
        let mut buffer = plaintext.to_vec();
        let tag = self
            .cipher
            .encrypt_in_place_detached(Nonce::<U16>::from_slice(&nonce), b"", &mut buffer)
            .map_err(|_| CryptoError::Seal)?;

        let mut tag_bytes = [0u8; TAG_LEN];
        tag_bytes.copy_from_slice(tag.as_slice());
        Ok(EncodedField::compose(&nonce, &tag_bytes, &buffer))
    }

    /// Verify and decrypt an encoded field.
    ///
    /// Errors:
    /// - `MalformedEncoding` if the blob is shorter than the header.
    /// - `Authentication` if the tag does not verify.
    pub fn open(&self, blob: &[u8]) -> Result<Vec<u8>, RevealError> {
        let field = EncodedField::parse(blob)?;
        let mut buffer = field.ciphertext.to_vec();
        self.cipher
            .decrypt_in_place_detached(
                Nonce::<U16>::from_slice(field.nonce),
                b"",
                &mut buffer,
                Tag::<U16>::from_slice(field.tag),
            )
            .map_err(|_| RevealError::Authentication)?;
        Ok(buffer)
    }

    /// `open` followed by UTF-8 validation.
    pub fn open_text(&self, blob: &[u8]) -> Result<String, RevealError> {
        let bytes = self.open(blob)?;
        String::from_utf8(bytes).map_err(|_| RevealError::InvalidText)
    }
}
