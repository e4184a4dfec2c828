//! Shared state handed to every request handler.

use std::sync::Arc;

use field_codec::{FieldCodec, FieldSpecs, ProfileKey};

/// Codec, field tables, and key for the lifetime of the process.
///
/// All fields are immutable and cheaply cloneable.
#[derive(Clone, Debug)]
pub struct AppState {
    pub codec: FieldCodec,
    pub specs: Arc<FieldSpecs>,
    pub key: Arc<ProfileKey>,
}

impl AppState {
    pub fn new(key: ProfileKey, specs: FieldSpecs) -> Self {
        Self {
            codec: FieldCodec::new(),
            specs: Arc::new(specs),
            key: Arc::new(key),
        }
    }
}
