//! Wire types for the `/api/chat` endpoint.
//!
//! ```text
//! POST <base-url>/api/chat      {"query": "What is X?"}
//! 200 OK                        {"result": "X is Y", "sources": ["doc1"]}
//! ```

use serde::{Deserialize, Serialize};

/// Request body sent to the backend.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatQuery<'a> {
    pub query: &'a str,
}

/// A successful answer from the backend.
///
/// `sources` is `None` when the backend omits the field or sends `null`.
/// An empty array stays `Some(vec![])`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatAnswer {
    pub result: String,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

impl ChatAnswer {
    pub fn new(result: impl Into<String>, sources: Option<Vec<String>>) -> Self {
        Self {
            result: result.into(),
            sources,
        }
    }
}
