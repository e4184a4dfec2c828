//! [`EncryptedProfileValue`]: the sealed field handed to transport.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::FieldKind;

use crate::validator;

/// An encrypted, padded profile field.
///
/// Carries the allow-list of encoded lengths from the [`FieldSpec`] it was
/// sealed under so the value can check its own conformance.
///
/// [`FieldSpec`]: crate::spec::FieldSpec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedProfileValue {
    kind: FieldKind,
    ciphertext: Vec<u8>,
    allowed_lengths: Arc<[usize]>,
}

impl EncryptedProfileValue {
    pub fn new(kind: FieldKind, ciphertext: Vec<u8>, allowed_lengths: &[usize]) -> Self {
        Self {
            kind,
            ciphertext,
            allowed_lengths: allowed_lengths.into(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn allowed_lengths(&self) -> &[usize] {
        &self.allowed_lengths
    }

    /// Standard padded base64 of the ciphertext, as sent to the server.
    pub fn encoded(&self) -> String {
        STANDARD.encode(&self.ciphertext)
    }

    /// Whether the encoded length is one of the allowed lengths.
    pub fn has_valid_encoded_length(&self) -> bool {
        validator::is_valid(self)
    }
}
