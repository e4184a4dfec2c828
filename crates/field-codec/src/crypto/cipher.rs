//! AES-256-GCM-SIV sealing of padded profile fields.
//!
//! **Algorithm choice:** AES-256-GCM-SIV (RFC 8452) is nonce-misuse-resistant,
//! so an accidental nonce repeat leaks equality of plaintexts but not the key.
//! A fresh random nonce is still drawn for every call.

use aes_gcm_siv::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes256GcmSiv, Nonce,
};
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the authentication tag appended by the AEAD.
pub const TAG_LEN: usize = 16;

/// Errors produced by the cipher layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The sealed blob is too short to hold a nonce and a tag.
    #[error("sealed value too short: {0} bytes")]
    Truncated(usize),

    /// AES-GCM-SIV encryption or decryption failed.
    #[error("aead operation failed")]
    AeadFailure,
}

/// An authenticated-encryption service.
///
/// Implementations must be stateless with respect to calls: the same key and
/// sealed blob always decrypt to the same plaintext.
#[cfg_attr(test, mockall::automock)]
pub trait AeadService: Send + Sync {
    /// Seal `plaintext` under `key`.
    fn encrypt(&self, plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Open a blob produced by [`AeadService::encrypt`].
    fn decrypt(&self, sealed: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError>;
}

/// AES-256-GCM-SIV with a random nonce prefixed to the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesGcmSiv;

impl AeadService for AesGcmSiv {
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
    fn encrypt(&self, plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
        let cipher = build_cipher(key)?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| CipherError::AeadFailure)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    /// # Errors
    ///
    /// Returns [`CipherError::Truncated`] if `sealed` cannot hold a nonce and
    /// tag, and [`CipherError::AeadFailure`] if authentication fails (wrong key
    /// or tampered data).
    fn decrypt(&self, sealed: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
        let cipher = build_cipher(key)?;
        if sealed.len() < NONCE_LEN + TAG_LEN {
            return Err(CipherError::Truncated(sealed.len()));
        }
        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
        cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CipherError::AeadFailure)
    }
}

fn build_cipher(key: &[u8]) -> Result<Aes256GcmSiv, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength(key.len()));
    }
    Aes256GcmSiv::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength(key.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_key() -> Vec<u8> {
        let mut key = vec![0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = random_key();
        let sealed = AesGcmSiv.encrypt(b"Alice\0Smith", &key).unwrap();
        assert_eq!(AesGcmSiv.decrypt(&sealed, &key).unwrap(), b"Alice\0Smith");
    }

    #[test]
    fn overhead_is_nonce_plus_tag() {
        let key = random_key();
        for len in [0, 1, 53, 257] {
            let sealed = AesGcmSiv.encrypt(&vec![0u8; len], &key).unwrap();
            assert_eq!(sealed.len(), len + NONCE_LEN + TAG_LEN);
        }
    }

    #[test]
    fn fresh_nonce_per_call() {
        let key = random_key();
        let a = AesGcmSiv.encrypt(b"same", &key).unwrap();
        let b = AesGcmSiv.encrypt(b"same", &key).unwrap();
        assert_ne!(&a[..NONCE_LEN], &b[..NONCE_LEN]);
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let sealed = AesGcmSiv.encrypt(b"secret", &random_key()).unwrap();
        assert_eq!(
            AesGcmSiv.decrypt(&sealed, &random_key()),
            Err(CipherError::AeadFailure)
        );
    }

    #[test]
    fn invalid_key_length_rejected() {
        assert_eq!(
            AesGcmSiv.encrypt(b"x", &[0u8; 16]),
            Err(CipherError::InvalidKeyLength(16))
        );
        assert_eq!(
            AesGcmSiv.decrypt(&[0u8; 64], &[0u8; 31]),
            Err(CipherError::InvalidKeyLength(31))
        );
    }

    #[test]
    fn truncated_blob_rejected() {
        let key = random_key();
        assert_eq!(
            AesGcmSiv.decrypt(&[0u8; NONCE_LEN + TAG_LEN - 1], &key),
            Err(CipherError::Truncated(NONCE_LEN + TAG_LEN - 1))
        );
    }

    #[test]
    fn tampered_ciphertext_fails_auth() {
        let key = random_key();
        let mut sealed = AesGcmSiv.encrypt(b"tamper me", &key).unwrap();
        // Flip a byte past the nonce.
        sealed[NONCE_LEN] ^= 0xFF;
        assert!(AesGcmSiv.decrypt(&sealed, &key).is_err());
    }
}
