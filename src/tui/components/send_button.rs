//! # SendButton Component
//!
//! Pointer-activated send control next to the input box. Reads `Send` when
//! idle and `Loading...` (dimmed) while a request is outstanding. Clicks are
//! hit-tested in `ui.rs` and dispatched as the same `Action::Submit` that
//! Enter produces; the controller decides whether it goes through.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::state::LOADING_STATUS;
use crate::tui::component::Component;

/// Columns reserved for the button, borders included.
pub const SEND_BUTTON_WIDTH: u16 = 14;

pub struct SendButton {
    /// Whether a request is outstanding (Prop)
    pub busy: bool,
}

impl SendButton {
    pub fn new(busy: bool) -> Self {
        Self { busy }
    }

    pub fn label(&self) -> &'static str {
        if self.busy { LOADING_STATUS } else { "Send" }
    }

    fn style(&self) -> Style {
        if self.busy {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        } else {
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        }
    }
}

impl Component for SendButton {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = self.style();
        let button = Paragraph::new(self.label())
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(style),
            );
        frame.render_widget(button, area);
    }
}
