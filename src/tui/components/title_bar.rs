//! # TitleBar Component
//!
//! Top status bar: application title, backend URL, transient status and a
//! "↓ New" hint when there is unseen content below the scroll position.
//!
//! Stateless: all fields are props set by the parent each frame.
//!
//! ```text
//! Chat Assistant (http://localhost:5001) | Loading... | ↓ New
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub title: String,
    pub backend_url: String,
    pub status_message: String,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(
        title: String,
        backend_url: String,
        status_message: String,
        has_unseen_content: bool,
    ) -> Self {
        Self {
            title,
            backend_url,
            status_message,
            has_unseen_content,
        }
    }

    pub fn text(&self) -> String {
        let mut text = format!("{} ({})", self.title, self.backend_url);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if self.has_unseen_content {
            text.push_str(" | ↓ New");
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
