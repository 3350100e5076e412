use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::{Message, Sender};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// A bubble never takes more than this share of the list width.
const MAX_WIDTH_PERCENT: u32 = 80;

/// A stateless component that renders one transcript entry as a bubble.
///
/// User bubbles sit flush right, bot bubbles flush left. Each bubble is only
/// as wide as its longest line (capped at [`MAX_WIDTH_PERCENT`] of the list),
/// and citation sources follow the answer text as dimmed `Source: …` lines.
///
/// Like the message list's layout cache, [`calculate_height`](Self::calculate_height)
/// predicts the rendered height with `textwrap` using options that match
/// Ratatui's `Paragraph` wrapping, so the list can lay out without rendering.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Width of the bubble for `message` inside a list of `area_width` columns.
    pub fn bubble_width(message: &Message, area_width: u16) -> u16 {
        let cap = (u32::from(area_width) * MAX_WIDTH_PERCENT / 100) as u16;
        let cap = cap.max(HORIZONTAL_OVERHEAD + 1).min(area_width);

        let longest = body_lines(message)
            .iter()
            .map(|(line, _)| line.width())
            .chain(std::iter::once(label(message.sender()).width()))
            .max()
            .unwrap_or(0);
        let wanted = u16::try_from(longest)
            .unwrap_or(u16::MAX)
            .saturating_add(HORIZONTAL_OVERHEAD);

        wanted.min(cap)
    }

    /// X offset of the bubble within the list (right edge for user messages).
    pub fn bubble_x(message: &Message, area_width: u16) -> u16 {
        match message.sender() {
            Sender::User => area_width.saturating_sub(Self::bubble_width(message, area_width)),
            Sender::Bot => 0,
        }
    }

    /// Calculate the height this message needs in a list `area_width` wide.
    pub fn calculate_height(message: &Message, area_width: u16) -> u16 {
        let width = Self::bubble_width(message, area_width);
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines: usize = body_lines(message)
            .iter()
            .map(|(line, _)| textwrap::wrap(line, &options).len().max(1))
            .sum();
        u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(VERTICAL_OVERHEAD)
    }
}

fn label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    }
}

fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Cyan),
        Sender::Bot => Style::default().fg(Color::Green),
    }
}

fn source_style() -> Style {
    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
}

/// Text lines followed by one `Source:` line per citation, each tagged with
/// whether it is a source line. Only trailing newlines are dropped.
fn body_lines(message: &Message) -> Vec<(String, bool)> {
    let mut lines: Vec<(String, bool)> = message
        .text()
        .trim_end_matches('\n')
        .split('\n')
        .map(|line| (line.to_string(), false))
        .collect();
    for source in message.sources().unwrap_or_default() {
        lines.push((format!("Source: {source}"), true));
    }
    lines
}

impl Widget for MessageBubble<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let sender = self.message.sender();
        let style = sender_style(sender);

        let block = Block::bordered()
            .title(label(sender))
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let text: Text = body_lines(self.message)
            .into_iter()
            .map(|(line, is_source)| {
                let line_style = if is_source { source_style() } else { style };
                Line::from(Span::styled(line, line_style))
            })
            .collect();

        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .render(inner_area, buf);
    }
}

impl Component for MessageBubble<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
