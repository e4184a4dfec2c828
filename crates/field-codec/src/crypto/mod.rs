//! Authenticated encryption behind the [`AeadService`] seam.
//!
//! The codec treats the cipher as a black box: bytes and a key in, bytes (or
//! a refusal) out. The production implementation is [`AesGcmSiv`].
//!
//! # Ciphertext format
//!
//! ```text
//! nonce (12 bytes) || ciphertext || tag (16 bytes)
//! ```
//!
//! The fixed 28-byte overhead is what lets every padding bucket map to exactly
//! one base64 length.

pub mod cipher;
pub mod key;

pub use cipher::{AeadService, AesGcmSiv, CipherError, KEY_LEN, NONCE_LEN, TAG_LEN};
pub use key::{KeyError, ProfileKey};

#[cfg(test)]
pub use cipher::MockAeadService;
