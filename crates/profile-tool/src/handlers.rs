//! Request handlers: one [`Request`] in, one [`Response`] out.
//!
//! Failures never escape as errors. Every failed line becomes an
//! [`ErrorResponse`] and processing continues with the next one.

use common::protocol::{ErrorResponse, Request, Response, ResponseBody};
use common::ProfileError;
use field_codec::FieldPlaintext;
use tracing::{debug, error, warn};

use crate::state::AppState;

/// Parse one input line and handle it.
pub fn handle_line(state: &AppState, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(req) => handle(state, req),
        Err(e) => {
            warn!(error = %e, "malformed request line");
            Response::error(ErrorResponse::new(
                "bad_request",
                format!("malformed request: {e}"),
            ))
        }
    }
}

/// Dispatch a parsed request to the codec.
pub fn handle(state: &AppState, req: Request) -> Response {
    let key = state.key.as_bytes();
    let result = match req {
        Request::EncryptName {
            given_name,
            family_name,
        } => {
            debug!(op = "encrypt_name", "handling request");
            let spec = state.specs.get(common::FieldKind::Name);
            state
                .codec
                .encrypt_name(&given_name, family_name.as_deref(), key, spec)
                .map(|value| ResponseBody::Encrypted {
                    field: value.kind(),
                    ciphertext: value.encoded(),
                })
        }
        Request::EncryptText { field, text } => {
            debug!(op = "encrypt_text", field = %field, "handling request");
            if field.is_name() {
                return Response::error(ErrorResponse::new(
                    "bad_request",
                    "use encrypt_name for the name field",
                ));
            }
            state
                .codec
                .encrypt_text(&text, key, state.specs.get(field))
                .map(|value| ResponseBody::Encrypted {
                    field: value.kind(),
                    ciphertext: value.encoded(),
                })
        }
        Request::Decrypt { field, ciphertext } => {
            debug!(op = "decrypt", field = %field, "handling request");
            state
                .codec
                .decrypt_encoded(&ciphertext, key, state.specs.get(field))
                .map(|plaintext| match plaintext {
                    FieldPlaintext::Name(name) => {
                        let (given_name, family_name) = name.into_parts();
                        ResponseBody::Name {
                            given_name,
                            family_name,
                        }
                    }
                    FieldPlaintext::Text(text) => ResponseBody::Text { text },
                })
        }
    };

    match result {
        Ok(body) => Response::ok(body),
        Err(e) => error_response(&e),
    }
}

fn error_response(e: &ProfileError) -> Response {
    if e.is_config_defect() {
        error!(code = e.error_code(), "field table defect");
    }
    Response::error(ErrorResponse::from(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_codec::{FieldSpecs, ProfileKey};

    fn state() -> AppState {
        AppState::new(
            ProfileKey::from_slice(&[0x42u8; 32]).unwrap(),
            FieldSpecs::reference(),
        )
    }

    fn ciphertext_of(resp: Response) -> String {
        match resp {
            Response::Ok {
                body: ResponseBody::Encrypted { ciphertext, .. },
            } => ciphertext,
            other => panic!("expected encrypted body, got {other:?}"),
        }
    }

    fn error_code_of(resp: Response) -> String {
        match resp {
            Response::Error { error } => error.code,
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn encrypt_then_decrypt_name() {
        let state = state();
        let ct = ciphertext_of(handle_line(
            &state,
            r#"{"op":"encrypt_name","given_name":"Alice","family_name":"Smith"}"#,
        ));
        assert_eq!(ct.len(), 108);

        let resp = handle(
            &state,
            Request::Decrypt {
                field: common::FieldKind::Name,
                ciphertext: ct,
            },
        );
        assert_eq!(
            resp,
            Response::ok(ResponseBody::Name {
                given_name: "Alice".into(),
                family_name: Some("Smith".into()),
            })
        );
    }

    #[test]
    fn encrypt_then_decrypt_bio() {
        let state = state();
        let ct = ciphertext_of(handle(
            &state,
            Request::EncryptText {
                field: common::FieldKind::Bio,
                text: "hi".into(),
            },
        ));
        assert_eq!(ct.len(), 208);
        let resp = handle_line(
            &state,
            &format!(r#"{{"op":"decrypt","field":"bio","ciphertext":"{ct}"}}"#),
        );
        assert_eq!(resp, Response::ok(ResponseBody::Text { text: "hi".into() }));
    }

    #[test]
    fn oversize_name_is_error_response() {
        let state = state();
        let resp = handle(
            &state,
            Request::EncryptName {
                given_name: "a".repeat(300),
                family_name: None,
            },
        );
        assert_eq!(error_code_of(resp), "oversize_value");
    }

    #[test]
    fn name_via_encrypt_text_is_rejected() {
        let state = state();
        let resp = handle(
            &state,
            Request::EncryptText {
                field: common::FieldKind::Name,
                text: "Alice".into(),
            },
        );
        assert_eq!(error_code_of(resp), "bad_request");
    }

    #[test]
    fn garbage_ciphertext_is_decryption_failure() {
        let state = state();
        let resp = handle(
            &state,
            Request::Decrypt {
                field: common::FieldKind::BioEmoji,
                ciphertext: "AAAA".into(),
            },
        );
        assert_eq!(error_code_of(resp), "decryption_failure");
    }

    #[test]
    fn malformed_line_is_bad_request() {
        let state = state();
        assert_eq!(error_code_of(handle_line(&state, "{not json")), "bad_request");
    }
}
