//! [`ProfileKey`]: holder for the 32-byte profile key.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use super::cipher::KEY_LEN;

/// Errors from parsing key material.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The key material has an unexpected length.
    #[error("profile key has invalid length: expected {KEY_LEN} bytes, got {0}")]
    InvalidLength(usize),

    /// The key string is not valid standard base64.
    #[error("profile key is not valid base64")]
    InvalidEncoding,
}

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// The memory is overwritten with zeroes on drop and the bytes never appear in
/// `Debug` output.
#[derive(Clone)]
pub struct ProfileKey(Box<[u8; KEY_LEN]>);

impl ProfileKey {
    /// Copy `bytes` into a new key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidLength`] if `bytes` is not [`KEY_LEN`] long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != KEY_LEN {
            return Err(KeyError::InvalidLength(bytes.len()));
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Decode a standard padded base64 key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidEncoding`] for malformed base64 and
    /// [`KeyError::InvalidLength`] if the decoded key is not [`KEY_LEN`] bytes.
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let mut bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| KeyError::InvalidEncoding)?;
        let key = Self::from_slice(&bytes);
        bytes.iter_mut().for_each(|b| *b = 0);
        key
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl Drop for ProfileKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for ProfileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ProfileKey([REDACTED])")
    }
}
