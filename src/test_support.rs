//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::controller::RequestController;
use crate::core::state::App;
use crate::transport::{ChatAnswer, ChatTransport, TransportError};

/// Replays canned outcomes in order and records every query it was asked.
/// Runs out into a network error so a test that over-sends fails loudly.
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<ChatAnswer, TransportError>>>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(outcomes: Vec<Result<ChatAnswer, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn ask(&self, query: &str) -> Result<ChatAnswer, TransportError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("script exhausted".into())))
    }
}

/// A transport whose requests never complete.
pub struct PendingTransport;

#[async_trait]
impl ChatTransport for PendingTransport {
    fn name(&self) -> &str {
        "pending"
    }

    async fn ask(&self, _query: &str) -> Result<ChatAnswer, TransportError> {
        std::future::pending().await
    }
}

/// A controller whose transport is never expected to be called.
pub fn test_controller() -> RequestController {
    RequestController::new(ScriptedTransport::new(vec![]))
}

/// Creates a test App around [`test_controller`].
pub fn test_app() -> App {
    App::new(test_controller(), "Test Assistant".to_string(), "http://test.local".to_string())
}
