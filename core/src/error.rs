//! Error types for the playback-configuration client.
//!
//! # Design
//! Status handling is a closed set: 2xx is success, 403 is `AccessDenied`,
//! everything else is `UnexpectedStatus` carrying the raw status and body.
//! `code()` and `message()` expose the (kind, message) pair of the service's
//! structured errors; the cause, if any, is reachable through `source()`.

use thiserror::Error;

/// Message attached to response bodies that fail to decode.
pub const DECODE_FAILURE_MESSAGE: &str = "failed decoding JSON RPC response";

/// Errors returned while building, signing, sending, or parsing a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request parameters could not be encoded as JSON.
    #[error("failed encoding JSON RPC request: {0}")]
    RequestEncoding(#[source] serde_json::Error),

    /// A 200 response body was not a valid playback configuration.
    #[error("failed decoding JSON RPC response: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The server returned 403. `message` is the raw response body.
    #[error("access denied: {message}")]
    AccessDenied { message: String },

    /// The server returned a status outside 2xx and other than 403.
    #[error("HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The signer refused or failed to sign the request.
    #[error("signing failed: {0}")]
    Signing(String),

    /// The transport could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// Service-style error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::RequestEncoding(_) | ApiError::Serialization(_) => "SerializationError",
            ApiError::AccessDenied { .. } => "AccessDeniedException",
            ApiError::UnexpectedStatus { .. } => "UnexpectedStatus",
            ApiError::Signing(_) => "SigningError",
            ApiError::Transport(_) => "TransportError",
        }
    }

    /// Human-readable message without the wrapped cause.
    pub fn message(&self) -> String {
        match self {
            ApiError::RequestEncoding(_) => "failed encoding JSON RPC request".to_string(),
            ApiError::Serialization(_) => DECODE_FAILURE_MESSAGE.to_string(),
            ApiError::AccessDenied { message } => message.clone(),
            ApiError::UnexpectedStatus { body, .. } => body.clone(),
            ApiError::Signing(msg) | ApiError::Transport(msg) => msg.clone(),
        }
    }

    /// HTTP status associated with the error, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::AccessDenied { .. } => Some(403),
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("not-json").unwrap_err()
    }

    #[test]
    fn serialization_error_wraps_cause() {
        let err = ApiError::Serialization(json_error());
        assert_eq!(err.code(), "SerializationError");
        assert_eq!(err.message(), DECODE_FAILURE_MESSAGE);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with(DECODE_FAILURE_MESSAGE));
    }

    #[test]
    fn access_denied_has_no_cause() {
        let err = ApiError::AccessDenied {
            message: "access denied: quota exceeded".to_string(),
        };
        assert_eq!(err.code(), "AccessDeniedException");
        assert_eq!(err.message(), "access denied: quota exceeded");
        assert_eq!(err.status(), Some(403));
        assert!(err.source().is_none());
    }

    #[test]
    fn unexpected_status_reports_code_and_body() {
        let err = ApiError::UnexpectedStatus {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.code(), "UnexpectedStatus");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn transport_errors_carry_no_status() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.message(), "connection refused");
    }
}
