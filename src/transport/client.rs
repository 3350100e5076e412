use std::fmt;

use async_trait::async_trait;

use super::types::ChatAnswer;

/// Errors that can occur while asking the backend for an answer.
///
/// The request controller collapses all of these into a single fallback
/// message; the variants exist for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Network-level failure (connection refused, DNS, body read).
    Network(String),
    /// Backend answered with a non-success status.
    Api { status: u16, message: String },
    /// Response body was not the expected JSON shape.
    Parse(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            TransportError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Performs the outbound call for one query.
///
/// Implementations make a single attempt: no retry, no timeout.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Sends `query` to the backend and waits for its answer.
    async fn ask(&self, query: &str) -> Result<ChatAnswer, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status_and_body() {
        let err = TransportError::Api {
            status: 400,
            message: r#"{"error":"Query is missing"}"#.to_string(),
        };
        let shown = err.to_string();
        assert!(shown.contains("HTTP 400"));
        assert!(shown.contains("Query is missing"));
    }

    #[test]
    fn test_display_network_and_parse() {
        assert_eq!(
            TransportError::Network("connection refused".into()).to_string(),
            "network error: connection refused"
        );
        assert_eq!(
            TransportError::Parse("missing field `result`".into()).to_string(),
            "parse error: missing field `result`"
        );
    }
}
