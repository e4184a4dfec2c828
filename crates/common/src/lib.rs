//! Common types, protocol definitions, and errors shared across the profile
//! field encryption crates.

pub mod error;
pub mod field;
pub mod protocol;

pub use error::ProfileError;
pub use field::FieldKind;
