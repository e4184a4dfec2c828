//! The encrypt and decrypt pipelines for one profile field.
//!
//! ```text
//! encrypt: serialize -> select bucket -> zero-pad -> AEAD seal -> length check
//! decrypt: AEAD open -> (name) split + unpack | (text) trim NULs + UTF-8
//! ```
//!
//! Every step either feeds the next or ends the pipeline with a
//! [`ProfileError`]. Field content, ciphertext and key bytes are never logged;
//! log fields carry only the field kind and lengths.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::ProfileError;
use tracing::{debug, error, warn};

use crate::bucket::{pad_to_bucket, select_bucket};
use crate::crypto::{AeadService, AesGcmSiv};
use crate::name::{pack_name, unpack_name, NameComponents};
use crate::spec::FieldSpec;
use crate::value::EncryptedProfileValue;

/// A decrypted field, shaped by its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPlaintext {
    Name(NameComponents),
    Text(String),
}

/// Stateless field encryptor over an [`AeadService`].
///
/// Holds no per-call state, so one codec can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct FieldCodec<A = AesGcmSiv> {
    aead: A,
}

impl FieldCodec<AesGcmSiv> {
    /// A codec backed by AES-256-GCM-SIV.
    pub fn new() -> Self {
        Self { aead: AesGcmSiv }
    }
}

impl<A: AeadService> FieldCodec<A> {
    pub fn with_aead(aead: A) -> Self {
        Self { aead }
    }

    /// Pack, pad, and seal a name.
    ///
    /// # Errors
    ///
    /// [`ProfileError::OversizeValue`] if the packed name fits no bucket,
    /// [`ProfileError::EncryptionFailure`] if the AEAD declines, and the
    /// configuration errors described on [`FieldCodec::encrypt_text`].
    pub fn encrypt_name(
        &self,
        given_name: &str,
        family_name: Option<&str>,
        key: &[u8],
        spec: &FieldSpec,
    ) -> Result<EncryptedProfileValue, ProfileError> {
        self.seal(pack_name(given_name, family_name), key, spec)
    }

    /// Pad and seal a biography or biography emoji.
    ///
    /// # Errors
    ///
    /// - [`ProfileError::OversizeValue`] if the text is longer than the field's
    ///   byte limit or its largest bucket.
    /// - [`ProfileError::EncryptionFailure`] if the AEAD declines.
    /// - [`ProfileError::ConfigInvariantViolation`] if the bucket list is malformed.
    /// - [`ProfileError::UnexpectedEncodedLength`] if the sealed value's encoded
    ///   length is not in the allow-list.
    pub fn encrypt_text(
        &self,
        text: &str,
        key: &[u8],
        spec: &FieldSpec,
    ) -> Result<EncryptedProfileValue, ProfileError> {
        self.seal(text.as_bytes().to_vec(), key, spec)
    }

    /// Open and unpack a name.
    ///
    /// # Errors
    ///
    /// [`ProfileError::DecryptionFailure`] if authentication fails, and
    /// [`ProfileError::MissingGivenName`] if no given name can be recovered.
    pub fn decrypt_name(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        spec: &FieldSpec,
    ) -> Result<NameComponents, ProfileError> {
        let plaintext = self.open(ciphertext, key, spec)?;
        unpack_name(&plaintext).map_err(|e| {
            warn!(field = %spec.kind(), "decrypted name has no given name");
            e
        })
    }

    /// Open a text field and strip its padding.
    ///
    /// # Errors
    ///
    /// [`ProfileError::DecryptionFailure`] if authentication fails, and
    /// [`ProfileError::InvalidUtf8`] if the content is not UTF-8.
    pub fn decrypt_text(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        spec: &FieldSpec,
    ) -> Result<String, ProfileError> {
        let mut plaintext = self.open(ciphertext, key, spec)?;
        let end = plaintext
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |i| i + 1);
        plaintext.truncate(end);
        String::from_utf8(plaintext).map_err(|_| {
            warn!(field = %spec.kind(), "decrypted text is not valid UTF-8");
            ProfileError::InvalidUtf8
        })
    }

    /// Decrypt according to `spec`'s field kind.
    ///
    /// # Errors
    ///
    /// See [`FieldCodec::decrypt_name`] and [`FieldCodec::decrypt_text`].
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        spec: &FieldSpec,
    ) -> Result<FieldPlaintext, ProfileError> {
        if spec.kind().is_name() {
            self.decrypt_name(ciphertext, key, spec).map(FieldPlaintext::Name)
        } else {
            self.decrypt_text(ciphertext, key, spec).map(FieldPlaintext::Text)
        }
    }

    /// Decrypt the base64 form produced by [`EncryptedProfileValue::encoded`].
    ///
    /// # Errors
    ///
    /// Malformed base64 is reported as [`ProfileError::DecryptionFailure`];
    /// otherwise as [`FieldCodec::decrypt`].
    pub fn decrypt_encoded(
        &self,
        encoded: &str,
        key: &[u8],
        spec: &FieldSpec,
    ) -> Result<FieldPlaintext, ProfileError> {
        let ciphertext = STANDARD.decode(encoded.trim()).map_err(|_| {
            warn!(field = %spec.kind(), "ciphertext is not valid base64");
            ProfileError::DecryptionFailure
        })?;
        self.decrypt(&ciphertext, key, spec)
    }

    fn seal(
        &self,
        plaintext: Vec<u8>,
        key: &[u8],
        spec: &FieldSpec,
    ) -> Result<EncryptedProfileValue, ProfileError> {
        let kind = spec.kind();
        let len = plaintext.len();
        if len > spec.max_byte_length() {
            warn!(field = %kind, len, max = spec.max_byte_length(), "field exceeds byte limit");
            return Err(ProfileError::OversizeValue {
                len,
                max: spec.max_byte_length(),
            });
        }

        let bucket = select_bucket(len, spec.buckets()).map_err(|e| {
            if !e.is_config_defect() {
                warn!(field = %kind, len, "field fits no bucket");
            }
            e
        })?;
        let padded = pad_to_bucket(plaintext, bucket)?;

        let ciphertext = self.aead.encrypt(&padded, key).map_err(|e| {
            warn!(field = %kind, error = %e, "aead declined to encrypt");
            ProfileError::EncryptionFailure
        })?;

        let value = EncryptedProfileValue::new(kind, ciphertext, spec.allowed_lengths());
        if !value.has_valid_encoded_length() {
            let encoded_len = value.encoded().len();
            error!(
                field = %kind,
                bucket,
                encoded_len,
                expected = ?spec.allowed_length_for(bucket),
                "encoded length not in allow-list; bucket and length tables disagree"
            );
            return Err(ProfileError::UnexpectedEncodedLength(encoded_len));
        }

        debug!(field = %kind, bucket, "field sealed");
        Ok(value)
    }

    fn open(&self, ciphertext: &[u8], key: &[u8], spec: &FieldSpec) -> Result<Vec<u8>, ProfileError> {
        self.aead.decrypt(ciphertext, key).map_err(|e| {
            warn!(field = %spec.kind(), error = %e, "aead rejected ciphertext");
            ProfileError::DecryptionFailure
        })
    }
}
