//! Error type shared by the field codec and its callers.

use thiserror::Error;

/// Every way a profile field can fail to encrypt or decrypt.
///
/// Variants fall into two groups:
/// - configuration defects ([`ProfileError::ConfigInvariantViolation`],
///   [`ProfileError::UnexpectedEncodedLength`]): the static field tables are
///   wrong and the failure will repeat for every value;
/// - user-data failures (everything else): the caller treats the field as
///   unset and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Decrypted bytes were not valid UTF-8.
    #[error("field content is not valid UTF-8")]
    InvalidUtf8,

    /// A decrypted name had no non-empty, UTF-8 given name.
    #[error("decrypted name has no given name")]
    MissingGivenName,

    /// The serialized field does not fit in any padding bucket.
    #[error("field of {len} bytes exceeds the largest bucket ({max} bytes)")]
    OversizeValue { len: usize, max: usize },

    /// A field table broke its shape invariants (unsorted or misaligned buckets).
    #[error("field table invariant violated: {0}")]
    ConfigInvariantViolation(String),

    /// The AEAD service declined to encrypt (for example a malformed key).
    #[error("encryption failure")]
    EncryptionFailure,

    /// Authentication failed or the ciphertext was malformed.
    #[error("decryption failure")]
    DecryptionFailure,

    /// The encoded ciphertext length is not in the field's allow-list.
    #[error("encoded ciphertext length {0} is not an allowed length")]
    UnexpectedEncodedLength(usize),
}

impl ProfileError {
    /// Returns `true` if the error points at a defect in the static field
    /// tables rather than at the value being processed.
    pub fn is_config_defect(&self) -> bool {
        matches!(
            self,
            ProfileError::ConfigInvariantViolation(_) | ProfileError::UnexpectedEncodedLength(_)
        )
    }

    /// Short machine-readable code used in protocol error responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            ProfileError::InvalidUtf8 => "invalid_utf8",
            ProfileError::MissingGivenName => "missing_given_name",
            ProfileError::OversizeValue { .. } => "oversize_value",
            ProfileError::ConfigInvariantViolation(_) => "config_invariant_violation",
            ProfileError::EncryptionFailure => "encryption_failure",
            ProfileError::DecryptionFailure => "decryption_failure",
            ProfileError::UnexpectedEncodedLength(_) => "unexpected_encoded_length",
        }
    }
}
