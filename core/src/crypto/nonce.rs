//! crypto/nonce.rs
//! Random nonce generation for field encryption.
//!
//! Every field encryption call draws a fresh 16-byte nonce from the OS CSPRNG.
//! With 128 random bits the chance of a repeat under one key is negligible for
//! any batch this tool can produce, so no counter state is kept.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::constants::NONCE_LEN;

#[inline]
pub fn random_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

/// Fill a buffer with key material from the OS CSPRNG.
#[inline]
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut out = [0u8; N];
    OsRng.fill_bytes(&mut out);
    out
}
