//! Per-field padding and length tables.
//!
//! A [`FieldSpec`] is immutable configuration: it is validated once when it is
//! built and is then passed by reference into every codec call. There is no
//! process-wide table; callers hold a [`FieldSpecs`] and pick the entry for the
//! field they are handling.
//!
//! # Invariants
//!
//! - `buckets` is non-empty and strictly ascending.
//! - `allowed_lengths` has the same cardinality, is strictly ascending, and is
//!   index-aligned with `buckets` (`buckets[i]` encrypts to `allowed_lengths[i]`
//!   encoded characters).
//! - `max_byte_length` does not exceed the largest bucket.

use common::{FieldKind, ProfileError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors found while building a field table.
#[derive(Debug, Error)]
pub enum FieldSpecError {
    #[error("{0}: bucket list is empty")]
    EmptyBuckets(FieldKind),

    #[error("{kind}: buckets are not strictly ascending at index {index}")]
    BucketsNotAscending { kind: FieldKind, index: usize },

    #[error("{kind}: allowed lengths are not strictly ascending at index {index}")]
    AllowedLengthsNotAscending { kind: FieldKind, index: usize },

    #[error("{kind}: {buckets} buckets but {allowed} allowed lengths")]
    Misaligned {
        kind: FieldKind,
        buckets: usize,
        allowed: usize,
    },

    #[error("{kind}: max byte length {max_byte_length} exceeds largest bucket {largest}")]
    MaxBytesExceedsBuckets {
        kind: FieldKind,
        max_byte_length: usize,
        largest: usize,
    },

    #[error("invalid field table document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<FieldSpecError> for ProfileError {
    fn from(e: FieldSpecError) -> Self {
        ProfileError::ConfigInvariantViolation(e.to_string())
    }
}

/// Raw, unvalidated table as it appears in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpecTable {
    pub max_char_length: usize,
    pub max_byte_length: usize,
    pub buckets: Vec<usize>,
    pub allowed_lengths: Vec<usize>,
}

/// Validated table for one profile field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    kind: FieldKind,
    max_char_length: usize,
    max_byte_length: usize,
    buckets: Vec<usize>,
    allowed_lengths: Vec<usize>,
}

impl FieldSpec {
    /// Build a spec from a raw table, checking every shape invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`FieldSpecError`] found.
    pub fn new(kind: FieldKind, table: FieldSpecTable) -> Result<Self, FieldSpecError> {
        let FieldSpecTable {
            max_char_length,
            max_byte_length,
            buckets,
            allowed_lengths,
        } = table;

        let largest = *buckets.last().ok_or(FieldSpecError::EmptyBuckets(kind))?;
        if let Some(index) = first_non_ascending(&buckets) {
            return Err(FieldSpecError::BucketsNotAscending { kind, index });
        }
        if allowed_lengths.len() != buckets.len() {
            return Err(FieldSpecError::Misaligned {
                kind,
                buckets: buckets.len(),
                allowed: allowed_lengths.len(),
            });
        }
        if let Some(index) = first_non_ascending(&allowed_lengths) {
            return Err(FieldSpecError::AllowedLengthsNotAscending { kind, index });
        }
        if max_byte_length > largest {
            return Err(FieldSpecError::MaxBytesExceedsBuckets {
                kind,
                max_byte_length,
                largest,
            });
        }

        Ok(Self {
            kind,
            max_char_length,
            max_byte_length,
            buckets,
            allowed_lengths,
        })
    }

    /// Reference table for the name field: buckets `{53, 257}`.
    pub fn name() -> Self {
        Self::reference(FieldKind::Name, 26, 257, &[53, 257], &[108, 380])
    }

    /// Reference table for the biography field.
    pub fn bio() -> Self {
        Self::reference(FieldKind::Bio, 100, 512, &[128, 254, 512], &[208, 376, 720])
    }

    /// Reference table for the biography emoji field.
    pub fn bio_emoji() -> Self {
        Self::reference(FieldKind::BioEmoji, 1, 32, &[32], &[80])
    }

    // Built unchecked; `FieldSpecs::validate` re-checks them at startup.
    fn reference(
        kind: FieldKind,
        max_char_length: usize,
        max_byte_length: usize,
        buckets: &[usize],
        allowed_lengths: &[usize],
    ) -> Self {
        Self {
            kind,
            max_char_length,
            max_byte_length,
            buckets: buckets.to_vec(),
            allowed_lengths: allowed_lengths.to_vec(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Character limit for UI-level enforcement; the codec checks bytes only.
    pub fn max_char_length(&self) -> usize {
        self.max_char_length
    }

    pub fn max_byte_length(&self) -> usize {
        self.max_byte_length
    }

    pub fn buckets(&self) -> &[usize] {
        &self.buckets
    }

    pub fn allowed_lengths(&self) -> &[usize] {
        &self.allowed_lengths
    }

    /// Allowed encoded length paired with `bucket`, if `bucket` is configured.
    pub fn allowed_length_for(&self, bucket: usize) -> Option<usize> {
        self.buckets
            .iter()
            .position(|&b| b == bucket)
            .map(|i| self.allowed_lengths[i])
    }

    pub fn to_table(&self) -> FieldSpecTable {
        FieldSpecTable {
            max_char_length: self.max_char_length,
            max_byte_length: self.max_byte_length,
            buckets: self.buckets.clone(),
            allowed_lengths: self.allowed_lengths.clone(),
        }
    }
}

fn first_non_ascending(values: &[usize]) -> Option<usize> {
    values.windows(2).position(|w| w[0] >= w[1]).map(|i| i + 1)
}

/// On-disk shape of a full table set.
#[derive(Debug, Deserialize)]
struct FieldSpecsDocument {
    name: FieldSpecTable,
    bio: FieldSpecTable,
    bio_emoji: FieldSpecTable,
}

/// The tables for every profile field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpecs {
    name: FieldSpec,
    bio: FieldSpec,
    bio_emoji: FieldSpec,
}

impl FieldSpecs {
    /// The built-in reference tables.
    pub fn reference() -> Self {
        Self {
            name: FieldSpec::name(),
            bio: FieldSpec::bio(),
            bio_emoji: FieldSpec::bio_emoji(),
        }
    }

    /// Parse and validate a JSON document with `name`, `bio`, and `bio_emoji`
    /// tables.
    ///
    /// # Errors
    ///
    /// Returns [`FieldSpecError::Parse`] for malformed JSON, or the first
    /// invariant violation found in any table.
    pub fn from_json(text: &str) -> Result<Self, FieldSpecError> {
        let doc: FieldSpecsDocument = serde_json::from_str(text)?;
        Ok(Self {
            name: FieldSpec::new(FieldKind::Name, doc.name)?,
            bio: FieldSpec::new(FieldKind::Bio, doc.bio)?,
            bio_emoji: FieldSpec::new(FieldKind::BioEmoji, doc.bio_emoji)?,
        })
    }

    pub fn get(&self, kind: FieldKind) -> &FieldSpec {
        match kind {
            FieldKind::Name => &self.name,
            FieldKind::Bio => &self.bio,
            FieldKind::BioEmoji => &self.bio_emoji,
        }
    }

    /// Re-check every table's shape invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`FieldSpecError`] found.
    pub fn validate(&self) -> Result<(), FieldSpecError> {
        for kind in FieldKind::ALL {
            let spec = self.get(kind);
            FieldSpec::new(kind, spec.to_table())?;
        }
        Ok(())
    }
}

impl Default for FieldSpecs {
    fn default() -> Self {
        Self::reference()
    }
}
