//! Padding bucket selection.
//!
//! A field is always padded to one of a small, public, ascending set of
//! lengths. An observer of ciphertext sizes learns at most which bucket was
//! used, never the exact content length.

use common::ProfileError;
use tracing::error;

/// Return the smallest bucket in `buckets` that can hold `len` bytes.
///
/// `len == 0` selects the smallest bucket.
///
/// # Errors
///
/// Returns [`ProfileError::ConfigInvariantViolation`] if `buckets` is empty or
/// not strictly ascending. This is checked before any selection happens.
/// Returns [`ProfileError::OversizeValue`] if `len` exceeds every bucket.
pub fn select_bucket(len: usize, buckets: &[usize]) -> Result<usize, ProfileError> {
    check_ascending(buckets)?;

    let max = buckets[buckets.len() - 1];
    buckets
        .iter()
        .copied()
        .find(|&b| b >= len)
        .ok_or(ProfileError::OversizeValue { len, max })
}

/// Right-pad `bytes` with `0x00` to exactly `bucket` bytes.
///
/// # Errors
///
/// Returns [`ProfileError::OversizeValue`] if `bytes` is longer than `bucket`;
/// content is never truncated.
pub fn pad_to_bucket(mut bytes: Vec<u8>, bucket: usize) -> Result<Vec<u8>, ProfileError> {
    if bytes.len() > bucket {
        return Err(ProfileError::OversizeValue {
            len: bytes.len(),
            max: bucket,
        });
    }
    bytes.resize(bucket, 0);
    Ok(bytes)
}

/// Verify that `buckets` is non-empty and strictly ascending.
///
/// # Errors
///
/// Returns [`ProfileError::ConfigInvariantViolation`] describing the first
/// offending position.
pub fn check_ascending(buckets: &[usize]) -> Result<(), ProfileError> {
    if buckets.is_empty() {
        error!("bucket list is empty");
        return Err(ProfileError::ConfigInvariantViolation(
            "bucket list is empty".into(),
        ));
    }
    if let Some(i) = buckets.windows(2).position(|w| w[0] >= w[1]) {
        error!(index = i + 1, "bucket list is not strictly ascending");
        return Err(ProfileError::ConfigInvariantViolation(format!(
            "bucket list is not strictly ascending at index {}",
            i + 1
        )));
    }
    Ok(())
}
