//! HTTP transport for the answer-generation backend.
//!
//! One POST per query to `<base-url>/api/chat`. The base URL is resolved once
//! at startup (see `core::config`) and baked into the endpoint here.

use async_trait::async_trait;
use log::{debug, info, warn};

use super::client::{ChatTransport, TransportError};
use super::types::{ChatAnswer, ChatQuery};

/// Path appended to the configured base URL.
pub const CHAT_PATH: &str = "/api/chat";

pub struct HttpTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: endpoint_for(base_url),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Joins the base URL and [`CHAT_PATH`], ignoring trailing slashes on the base.
fn endpoint_for(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), CHAT_PATH)
}

#[async_trait]
impl ChatTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn ask(&self, query: &str) -> Result<ChatAnswer, TransportError> {
        info!("POST {} (query_len={})", self.endpoint, query.len());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatQuery { query })
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Backend response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("Backend error: {} - {}", status.as_u16(), body);
            return Err(TransportError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let answer: ChatAnswer =
            serde_json::from_str(&body).map_err(|e| TransportError::Parse(e.to_string()))?;

        debug!(
            "Answer received: {} bytes, {} sources",
            answer.result.len(),
            answer.sources.as_ref().map_or(0, Vec::len)
        );
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_chat_path() {
        assert_eq!(
            endpoint_for("http://localhost:5001"),
            "http://localhost:5001/api/chat"
        );
    }

    #[test]
    fn test_endpoint_ignores_trailing_slashes() {
        assert_eq!(
            endpoint_for("https://example.com/"),
            "https://example.com/api/chat"
        );
        assert_eq!(endpoint_for("https://example.com//"), "https://example.com/api/chat");
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let transport = HttpTransport::new("https://example.com/qa");
        assert_eq!(transport.endpoint(), "https://example.com/qa/api/chat");
        assert_eq!(transport.name(), "http");
    }
}
