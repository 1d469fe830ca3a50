//! Error taxonomy for FTPM API calls.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when communicating with the FTPM API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The base URL and endpoint do not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No response was received (connect failure, timeout, broken body).
    #[error("Cannot reach {endpoint}: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status. `message` is the
    /// `detail` from the error body, or `HTTP <status>`.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A success response could not be decoded into the expected shape.
    #[error("Failed to parse response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    /// Build a status error from a raw error body.
    ///
    /// The `detail` field wins when the body is a JSON object carrying a
    /// non-empty one; anything else yields `HTTP <status>`.
    pub(crate) fn from_error_body(status: u16, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| match value.get("detail") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            })
            .filter(|detail| !detail.is_empty());

        ApiError::Status {
            status,
            message: detail.unwrap_or_else(|| format!("HTTP {}", status)),
        }
    }

    /// HTTP status code, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when no response was received.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_becomes_message() {
        let err = ApiError::from_error_body(400, br#"{"detail": "User already exists"}"#);
        assert_eq!(err.to_string(), "User already exists");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_unparseable_body_falls_back_to_status() {
        let err = ApiError::from_error_body(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[test]
    fn test_json_without_detail_falls_back_to_status() {
        let err = ApiError::from_error_body(500, br#"{"error": "boom"}"#);
        assert_eq!(err.to_string(), "HTTP 500");

        let err = ApiError::from_error_body(500, br#"{"detail": null}"#);
        assert_eq!(err.to_string(), "HTTP 500");

        let err = ApiError::from_error_body(500, br#"{"detail": ""}"#);
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[test]
    fn test_structured_detail_is_rendered_as_json() {
        let err = ApiError::from_error_body(422, br#"{"detail": [{"loc": ["body", "username"]}]}"#);
        assert_eq!(err.to_string(), r#"[{"loc":["body","username"]}]"#);
    }

    #[test]
    fn test_empty_body() {
        let err = ApiError::from_error_body(404, b"");
        assert_eq!(err.to_string(), "HTTP 404");
        assert!(!err.is_network());
    }
}
