//! Post-encryption length conformance.
//!
//! Runs on the encrypt path only. A rejection means the bucket table and the
//! allowed-length table of a field disagree.

use crate::value::EncryptedProfileValue;

/// `true` if the base64 length of `value`'s ciphertext is in its allow-list.
///
/// Allow-lists hold a handful of entries, so a linear scan is used.
pub fn is_valid(value: &EncryptedProfileValue) -> bool {
    let encoded_len = value.encoded().len();
    value.allowed_lengths().contains(&encoded_len)
}
