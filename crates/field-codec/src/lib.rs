//! Length-hiding encryption of user profile fields.
//!
//! Profile fields (name, biography, biography emoji) are zero-padded to one of
//! a few fixed bucket sizes before authenticated encryption, so a server
//! storing the ciphertext learns only which bucket a value fell into.
//!
//! # Module map
//!
//! - [`bucket`]: smallest-fitting bucket selection and zero padding.
//! - [`name`]: `(given, family?)` packing into one NUL-delimited string.
//! - [`spec`]: per-field bucket and allowed-length tables.
//! - [`crypto`]: the [`AeadService`] seam and its AES-256-GCM-SIV implementation.
//! - [`codec`]: the encrypt/decrypt pipelines.
//! - [`validator`]: post-encryption encoded-length conformance.
//!
//! All operations are synchronous and free of shared mutable state.

pub mod bucket;
pub mod codec;
pub mod crypto;
pub mod name;
pub mod spec;
pub mod validator;
pub mod value;

pub use codec::{FieldCodec, FieldPlaintext};
pub use common::{FieldKind, ProfileError};
pub use crypto::{AeadService, AesGcmSiv, CipherError, ProfileKey};
pub use name::NameComponents;
pub use spec::{FieldSpec, FieldSpecError, FieldSpecs};
pub use value::EncryptedProfileValue;
