//! # Conversation Store
//!
//! Append-only transcript. Index order is display order.
//!
//! Renderers observe changes through [`Conversation::revision`]: it goes up by
//! one on every append, so comparing it to the last drawn value tells a
//! renderer whether it needs to redraw.

use log::debug;

use super::message::Message;

#[derive(Debug, Default, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    revision: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `message` to the end of the transcript.
    pub fn append(&mut self, message: Message) {
        debug!(
            "Conversation append: {:?} at index {} ({} bytes)",
            message.sender(),
            self.messages.len(),
            message.text().len()
        );
        self.messages.push(message);
        self.revision += 1;
    }

    /// The transcript as it stands, for read-only observation.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
