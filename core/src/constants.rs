//! Layout and configuration constants.

/// Random nonce prepended to every encoded field.
pub const NONCE_LEN: usize = 16;

/// AES-GCM authentication tag length (bytes).
pub const TAG_LEN: usize = 16;

/// Fixed header of an encoded field: `[nonce][tag]`.
pub const FIELD_HEADER_LEN: usize = NONCE_LEN + TAG_LEN;

/// Symmetric key length for AES-256-GCM.
pub const KEY_LEN_32: usize = 32;

/// Defaults when the configuration leaves a value out.
pub const DEFAULT_CHUNK_SIZE: usize = 500;
pub const DEFAULT_BATCH_SIZES: &[usize] = &[1000, 5000, 10000];
pub const DEFAULT_WRAP_KEY_BITS: usize = 2048;

/// Accepted RSA modulus range for the envelope wrap key.
pub const MIN_WRAP_KEY_BITS: usize = 1024;
pub const MAX_WRAP_KEY_BITS: usize = 8192;

/// Table names, one per strategy.
pub mod tables {
    pub const BASELINE: &str = "baseline";
    pub const SYMMETRIC: &str = "symmetric";
    pub const HYBRID: &str = "hybrid";
}
