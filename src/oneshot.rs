//! # One-shot Mode
//!
//! `chatline --query "..."` runs a single send cycle through the same
//! controller the TUI uses, then prints the transcript to stdout.

use std::fmt::Write;

use log::info;

use crate::core::{FALLBACK_ERROR_TEXT, Message, RequestController, Sender};

/// Sends `query` and returns the rendered transcript plus whether the
/// answer was a success.
pub async fn ask(controller: &mut RequestController, query: &str) -> (String, bool) {
    controller.draft_mut().set(query);
    controller.send().await;

    let transcript = render_transcript(controller.conversation().snapshot());
    let answered = controller
        .conversation()
        .last()
        .is_some_and(|m| !m.is_user() && m.text() != FALLBACK_ERROR_TEXT);
    info!("One-shot finished (answered={})", answered);

    (transcript, answered)
}

/// Plain-text transcript: one `you:`/`bot:` line per message, sources
/// indented underneath.
pub fn render_transcript(messages: &[Message]) -> String {
    let mut out = String::new();
    for message in messages {
        let label = match message.sender() {
            Sender::User => "you",
            Sender::Bot => "bot",
        };
        let _ = writeln!(out, "{label}: {}", message.text());
        for source in message.sources().unwrap_or_default() {
            let _ = writeln!(out, "  Source: {source}");
        }
    }
    out
}
