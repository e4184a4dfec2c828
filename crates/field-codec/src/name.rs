//! Name packing: `(given, family?)` to a single NUL-delimited byte string.
//!
//! # Wire format
//!
//! ```text
//! UTF8(given) [ 0x00 UTF8(family) ] 0x00*
//! ```
//!
//! The trailing `0x00*` run is the bucket padding added by the codec.
//!
//! # Known limitation
//!
//! The separator and the padding are both `0x00`, and [`unpack_name`] tells
//! them apart only by splitting on `0x00` and discarding empty pieces. A name
//! component that itself contains `0x00` therefore corrupts the boundary
//! silently. [`pack_name`] does not reject such input, nor an empty given
//! name; only [`unpack_name`] enforces a non-empty given name.

use common::ProfileError;
use serde::{Deserialize, Serialize};

/// Separator between the given and family name, and the padding byte.
pub const NAME_SEPARATOR: u8 = 0x00;

/// A decoded name. Produced by a successful [`unpack_name`], or by
/// deserialising a document whose given name is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNameComponents")]
pub struct NameComponents {
    given_name: String,
    family_name: Option<String>,
}

#[derive(Deserialize)]
struct RawNameComponents {
    given_name: String,
    #[serde(default)]
    family_name: Option<String>,
}

impl TryFrom<RawNameComponents> for NameComponents {
    type Error = ProfileError;

    fn try_from(raw: RawNameComponents) -> Result<Self, Self::Error> {
        if raw.given_name.is_empty() {
            return Err(ProfileError::MissingGivenName);
        }
        Ok(Self {
            given_name: raw.given_name,
            family_name: raw.family_name,
        })
    }
}

impl NameComponents {
    /// The given name; never empty.
    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    pub fn into_parts(self) -> (String, Option<String>) {
        (self.given_name, self.family_name)
    }
}

/// Pack a name into `UTF8(given) [0x00 UTF8(family)]`.
///
/// No separator is written when `family_name` is `None`.
pub fn pack_name(given_name: &str, family_name: Option<&str>) -> Vec<u8> {
    let family_len = family_name.map_or(0, |f| 1 + f.len());
    let mut out = Vec::with_capacity(given_name.len() + family_len);
    out.extend_from_slice(given_name.as_bytes());
    if let Some(family) = family_name {
        out.push(NAME_SEPARATOR);
        out.extend_from_slice(family.as_bytes());
    }
    out
}

/// Unpack a (possibly padded) packed name.
///
/// Splits on `0x00` and drops empty pieces, so trailing padding vanishes. The
/// first piece is the given name, the second the family name; any further
/// pieces are ignored. An undecodable family name is treated as absent.
///
/// # Errors
///
/// Returns [`ProfileError::MissingGivenName`] if there is no non-empty piece or
/// the first piece is not valid UTF-8.
pub fn unpack_name(bytes: &[u8]) -> Result<NameComponents, ProfileError> {
    let mut pieces = split_non_empty(bytes);

    let given_name = pieces
        .next()
        .and_then(|p| std::str::from_utf8(p).ok())
        .filter(|s| !s.is_empty())
        .ok_or(ProfileError::MissingGivenName)?
        .to_owned();

    let family_name = pieces
        .next()
        .and_then(|p| std::str::from_utf8(p).ok())
        .map(str::to_owned);

    Ok(NameComponents {
        given_name,
        family_name,
    })
}

/// Split on [`NAME_SEPARATOR`], skipping empty pieces.
fn split_non_empty(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    bytes
        .split(|&b| b == NAME_SEPARATOR)
        .filter(|piece| !piece.is_empty())
}
