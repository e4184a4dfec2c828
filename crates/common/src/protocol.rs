//! Request and response types for the `profile-tool` JSON-lines driver.
//!
//! Each line on stdin is one [`Request`]; each line written to stdout is one
//! [`Response`]. Ciphertext always travels as standard padded base64.

use serde::{Deserialize, Serialize};

use crate::field::FieldKind;
use crate::ProfileError;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// One operation read from the input stream, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Pack, pad, and encrypt a name.
    EncryptName {
        given_name: String,
        #[serde(default)]
        family_name: Option<String>,
    },
    /// Pad and encrypt a biography or biography emoji.
    EncryptText { field: FieldKind, text: String },
    /// Decrypt a base64 ciphertext for the given field.
    Decrypt { field: FieldKind, ciphertext: String },
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Successful payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Result of an encrypt operation.
    Encrypted {
        field: FieldKind,
        /// Standard padded base64 of the ciphertext.
        ciphertext: String,
    },
    /// Result of decrypting a name.
    Name {
        given_name: String,
        family_name: Option<String>,
    },
    /// Result of decrypting a text field.
    Text { text: String },
}

/// Error body returned for a failed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"oversize_value"`).
    pub code: String,
    /// Human-readable description; never contains field content.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&ProfileError> for ErrorResponse {
    fn from(e: &ProfileError) -> Self {
        Self::new(e.error_code(), e.to_string())
    }
}

/// One line written to the output stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok {
        #[serde(flatten)]
        body: ResponseBody,
    },
    Error {
        #[serde(flatten)]
        error: ErrorResponse,
    },
}

impl Response {
    pub fn ok(body: ResponseBody) -> Self {
        Response::Ok { body }
    }

    pub fn error(error: ErrorResponse) -> Self {
        Response::Error { error }
    }
}
