//! Error helpers for feed access

use onice_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Transport-level failure (connect, TLS, body read)
pub fn from_reqwest(op: &str, err: reqwest::Error) -> ExError {
    let kind = if err.is_timeout() {
        ExErrorKind::Timeout
    } else {
        ExErrorKind::ExternalService
    };
    ExError::new(kind).with_op(op).with_message(err.to_string())
}

/// The feed answered with a non-2xx status
pub fn bad_status(op: &str, status: reqwest::StatusCode, body: &str) -> ExError {
    let mut snippet: String = body.chars().take(200).collect();
    if snippet.len() < body.len() {
        snippet.push_str("...");
    }
    ExError::new(ExErrorKind::ExternalService)
        .with_op(op)
        .with_message(format!("HTTP {}: {}", status, snippet))
}

/// The payload could not be decoded
pub fn decode_error(op: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(op)
        .with_message(format!("Malformed feed payload: {}", err))
}
