//! crypto/wrap.rs
//! RSA-OAEP (SHA-256) wrapping of per-record symmetric keys.
//!
//! The key pair lives for one strategy run; the public half wraps, the
//! private half unwraps. Wrapped keys are exactly `modulus_bits / 8` bytes.

use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::constants::KEY_LEN_32;
use crate::crypto::types::{CryptoError, RevealError};

pub struct KeyWrapper {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl KeyWrapper {
    /// Generate a fresh key pair. This is the expensive part of hybrid setup
    /// and is kept outside the timed phases.
    pub fn generate(bits: usize) -> Result<Self, CryptoError> {
        let private = RsaPrivateKey::new(&mut OsRng, bits)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        let public = RsaPublicKey::from(&private);
        Ok(Self { private, public })
    }

    /// Length in bytes of every wrapped key produced by this pair.
    pub fn wrapped_len(&self) -> usize {
        self.public.size()
    }

    pub fn wrap_key(&self, key: &[u8; KEY_LEN_32]) -> Result<Vec<u8>, CryptoError> {
        self.public
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), key)
            .map_err(|e| CryptoError::Wrap(e.to_string()))
    }

    /// Recover a per-record key. Any OAEP failure, or a payload that is not a
    /// 32-byte key, is reported as `KeyUnwrap`.
    pub fn unwrap_key(&self, wrapped: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN_32]>, RevealError> {
        let plain = Zeroizing::new(
            self.private
                .decrypt(Oaep::new::<Sha256>(), wrapped)
                .map_err(|_| RevealError::KeyUnwrap)?,
        );
        if plain.len() != KEY_LEN_32 {
            return Err(RevealError::KeyUnwrap);
        }
        let mut key = Zeroizing::new([0u8; KEY_LEN_32]);
        key.copy_from_slice(&plain);
        Ok(key)
    }
}
