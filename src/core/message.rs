//! # Messages
//!
//! One immutable entry in the transcript. Fields are private and there are no
//! setters: once a `Message` exists its sender, text and sources never change.

use crate::transport::{ChatAnswer, TransportError};

/// Text shown in place of an answer when the request fails for any reason.
pub const FALLBACK_ERROR_TEXT: &str = "Error occurred.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    sender: Sender,
    text: String,
    sources: Option<Vec<String>>,
}

impl Message {
    /// A user query. Never carries sources.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            sources: None,
        }
    }

    /// A successful answer, with whatever citations the backend returned.
    pub fn answer(answer: ChatAnswer) -> Self {
        Self {
            sender: Sender::Bot,
            text: answer.result,
            sources: answer.sources,
        }
    }

    /// The fallback bot line for a failed request.
    pub fn error() -> Self {
        Self {
            sender: Sender::Bot,
            text: FALLBACK_ERROR_TEXT.to_string(),
            sources: None,
        }
    }

    /// Builds the bot message for a settled request. Every error kind maps to
    /// the same fallback text.
    pub fn from_outcome(outcome: Result<ChatAnswer, TransportError>) -> Self {
        match outcome {
            Ok(answer) => Self::answer(answer),
            Err(_) => Self::error(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sources(&self) -> Option<&[String]> {
        self.sources.as_deref()
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}
