//! # Actions
//!
//! Everything that can happen in chatline becomes an `Action`.
//! User presses Enter or clicks Send? That's `Action::Submit`.
//! Backend answers? That's `Action::ResponseReceived(outcome)`.
//!
//! `update()` applies an action to the state and returns an `Effect` telling
//! the caller what I/O to start. No I/O happens in here.
//!
//! ```text
//! State + Action  →  update()  →  State' + Effect
//! ```
//!
//! Every send trigger funnels through `Action::Submit`, so the controller's
//! busy check covers all of them.

use log::debug;

use crate::core::state::{App, LOADING_STATUS};
use crate::transport::{ChatAnswer, TransportError};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The input surface changed; carries the full new draft text.
    EditDraft(String),
    /// Send the current draft (keyboard or pointer trigger).
    Submit,
    /// The outstanding request settled.
    ResponseReceived(Result<ChatAnswer, TransportError>),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start the outbound request for this query.
    SpawnRequest(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::EditDraft(text) => {
            app.controller.draft_mut().set(text);
            Effect::None
        }
        Action::Submit => match app.controller.begin_send() {
            Some(pending) => {
                app.status_message = LOADING_STATUS.to_string();
                Effect::SpawnRequest(pending.query)
            }
            None => Effect::None,
        },
        Action::ResponseReceived(outcome) => {
            app.controller.settle(outcome);
            if !app.controller.is_busy() {
                app.status_message.clear();
            }
            Effect::None
        }
        Action::Quit => {
            debug!("Quit requested");
            Effect::Quit
        }
    }
}
