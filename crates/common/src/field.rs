//! Profile field kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The profile fields that are encrypted before upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Given name plus optional family name, packed into one value.
    Name,
    /// Free-text biography.
    Bio,
    /// Single emoji shown next to the biography.
    BioEmoji,
}

impl FieldKind {
    /// All field kinds, in table order.
    pub const ALL: [FieldKind; 3] = [FieldKind::Name, FieldKind::Bio, FieldKind::BioEmoji];

    /// Returns `true` for the packed name field.
    pub fn is_name(self) -> bool {
        matches!(self, FieldKind::Name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Bio => "bio",
            FieldKind::BioEmoji => "bio_emoji",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
