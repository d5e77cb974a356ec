pub mod types;
pub mod field;
pub mod nonce;
pub mod aead;
pub mod wrap;

pub use types::*;
pub use field::*;
pub use nonce::*;
pub use aead::*;
pub use wrap::*;
