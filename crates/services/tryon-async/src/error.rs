use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when talking to the try-on server
#[derive(Debug, Error)]
pub enum TryOnError {
    /// HTTP transport error (connect failure, broken stream)
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-success status returned by the server
    #[error("HTTP error! status: {0}")]
    Api(ApiErrorObject),

    /// Required input missing before a request could be built
    #[error("{0}")]
    Validation(String),

    /// Error event reported by the server inside the progress stream
    #[error("Error: {0}")]
    Remote(String),

    /// Configuration error (e.g., unusable base URL)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(String),

    /// Local file error (customer image, result output)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error body returned by the server alongside a non-success status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorObject {
    /// HTTP status code
    #[serde(skip)]
    pub status_code: u16,
    /// Server-provided message, if the body carried one
    #[serde(default)]
    pub error: Option<String>,
}

impl std::fmt::Display for ApiErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.status_code)?;
        if let Some(message) = &self.error {
            write!(f, " ({message})")?;
        }
        Ok(())
    }
}

impl TryOnError {
    /// Whether this error belongs in the "connection error" family shown to users:
    /// transport failures and non-success statuses.
    #[must_use]
    pub const fn is_connection_error(&self) -> bool {
        matches!(self, Self::Reqwest(_) | Self::Api(_))
    }
}

/// Maps a serde deserialization error to a `TryOnError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> TryOnError {
    let snippet = String::from_utf8_lossy(&body[..body.len().min(400)]).to_string();
    TryOnError::Serde(format!("{e}: {snippet}"))
}

/// Builds an API error from a non-success response body
///
/// The server answers validation failures with `{"error": "..."}`; anything else
/// (HTML error pages, plain text) keeps only the status.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, body: &[u8]) -> TryOnError {
    let mut obj = serde_json::from_slice::<ApiErrorObject>(body).unwrap_or(ApiErrorObject {
        status_code: 0,
        error: None,
    });
    obj.status_code = status.as_u16();
    TryOnError::Api(obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_parses_server_message() {
        let err = deserialize_api_error(
            StatusCode::BAD_REQUEST,
            br#"{"error": "Missing customer image or clothing ID"}"#,
        );
        assert_eq!(
            err.to_string(),
            "HTTP error! status: 400 (Missing customer image or clothing ID)"
        );
        assert!(err.is_connection_error());
    }

    #[test]
    fn api_error_tolerates_non_json_body() {
        let err = deserialize_api_error(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        match err {
            TryOnError::Api(obj) => {
                assert_eq!(obj.status_code, 502);
                assert!(obj.error.is_none());
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn deser_error_caps_snippet() {
        let body = vec![b'x'; 1000];
        let e = serde_json::from_slice::<serde_json::Value>(&body).unwrap_err();
        let TryOnError::Serde(msg) = map_deser(&e, &body) else {
            panic!("Expected Serde error");
        };
        assert!(msg.len() < 500);
    }

    #[test]
    fn remote_and_validation_are_not_connection_errors() {
        assert!(!TryOnError::Remote("boom".into()).is_connection_error());
        assert!(!TryOnError::Validation("missing".into()).is_connection_error());
    }
}
