//! # InputBox Component
//!
//! The editing surface for the draft.
//!
//! The box keeps its own copy of the text so it can track the cursor; every
//! edit is reported as [`InputEvent::ContentChanged`] and the parent forwards
//! the new text to the core draft. When the core clears the draft after a
//! request settles, [`InputBox::sync_from`] brings the box back in line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Border (2) + padding (2) consumed horizontally by the bordered block
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to content (border + padding)
const CONTENT_OFFSET: u16 = 2;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Enter pressed
    Submit,
    /// Buffer text changed
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Shown dimmed while the buffer is empty (Prop)
    pub placeholder: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
}

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrapped lines of `text`, with an explicit empty line for a trailing newline.
fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![String::new()];
    }
    let mut lines: Vec<String> = textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        lines.push(String::new());
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Byte offset where each wrapped segment of `line` starts. Segments are
/// substrings of `line` in order; whitespace at a break is dropped.
fn segment_starts(line: &str, width: u16) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut pos = 0;
    for segment in textwrap::wrap(line, wrap_options(width)) {
        let start = line[pos..].find(segment.as_ref()).map_or(pos, |i| pos + i);
        starts.push(start);
        pos = start + segment.len();
    }
    if starts.is_empty() {
        starts.push(0);
    }
    starts
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl InputBox {
    pub fn new(placeholder: String) -> Self {
        Self {
            buffer: String::new(),
            placeholder,
            cursor: 0,
        }
    }

    /// Replaces the buffer when it differs from `text`, moving the cursor to
    /// the end. Returns true if anything changed.
    pub fn sync_from(&mut self, text: &str) -> bool {
        if self.buffer == text {
            return false;
        }
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
        true
    }

    /// Height for the current buffer, clamped to
    /// `[1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD]`.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let lines = wrapped_lines(&self.buffer, inner_width(area_width)).len();
        let visible = u16::try_from(lines).unwrap_or(u16::MAX).clamp(1, MAX_VISIBLE_LINES);
        visible + VERTICAL_OVERHEAD
    }

    /// Row and column of the cursor within the wrapped text.
    ///
    /// Wraps the whole buffer, the same text `render` draws, and finds the
    /// segment holding the cursor.
    fn cursor_row_col(&self, width: u16) -> (u16, u16) {
        if width == 0 {
            return (0, 0);
        }
        let mut row = 0;
        let mut line_start = 0;
        for logical in self.buffer.split('\n') {
            let line_end = line_start + logical.len();
            let starts = segment_starts(logical, width);
            if self.cursor <= line_end {
                let offset = self.cursor - line_start;
                let segment = starts.iter().rposition(|&s| s <= offset).unwrap_or(0);
                let col = logical[starts[segment]..offset]
                    .width()
                    .min(usize::from(width - 1));
                return (
                    u16::try_from(row + segment).unwrap_or(u16::MAX),
                    u16::try_from(col).unwrap_or(0),
                );
            }
            row += starts.len();
            line_start = line_end + 1;
        }
        (u16::try_from(row).unwrap_or(u16::MAX), 0)
    }

    /// First wrapped line to show so the cursor row stays visible.
    fn scroll_offset(&self, width: u16) -> u16 {
        let (row, _) = self.cursor_row_col(width);
        (row + 1).saturating_sub(MAX_VISIBLE_LINES)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .title("Message");

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder.as_str()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            let offset = usize::from(self.scroll_offset(width));
            let visible = wrapped_lines(&self.buffer, width)
                .into_iter()
                .skip(offset)
                .take(usize::from(MAX_VISIBLE_LINES))
                .collect::<Vec<_>>()
                .join("\n");
            Paragraph::new(visible).style(Style::default().fg(Color::White))
        };

        frame.render_widget(paragraph.block(block), area);

        let (row, col) = self.cursor_row_col(width);
        let row = row - self.scroll_offset(width);
        frame.set_cursor_position((area.x + CONTENT_OFFSET + col, area.y + 1 + row));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                None
            }
            // Blank-draft and busy checks belong to the controller
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn input() -> InputBox {
        InputBox::new("Ask a question...".to_string())
    }

    fn screen_text(input: &mut InputBox, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                input.render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_handle_input() {
        let mut input = input();

        assert_eq!(input.handle_event(&TuiEvent::InputChar('a')), Some(InputEvent::ContentChanged));
        assert_eq!(input.handle_event(&TuiEvent::InputChar('b')), Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "ab");

        assert_eq!(input.handle_event(&TuiEvent::Backspace), Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = input();
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = input();
        input.handle_event(&TuiEvent::Paste("héllo".into()));
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::CursorRight);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "hllo");
    }

    #[test]
    fn test_submit_keeps_buffer() {
        let mut input = input();
        input.handle_event(&TuiEvent::Paste("hello".into()));

        assert_eq!(input.handle_event(&TuiEvent::Submit), Some(InputEvent::Submit));
        assert_eq!(input.buffer, "hello");
    }

    #[test]
    fn test_sync_from_clears_after_settle() {
        let mut input = input();
        input.handle_event(&TuiEvent::Paste("hello".into()));

        assert!(input.sync_from(""));
        assert!(input.buffer.is_empty());
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
        assert!(!input.sync_from(""));
    }

    #[test]
    fn test_height_grows_with_newlines_and_caps() {
        let mut input = input();
        assert_eq!(input.calculate_height(40), 1 + VERTICAL_OVERHEAD);

        input.handle_event(&TuiEvent::Paste("a\nb\n".into()));
        assert_eq!(input.calculate_height(40), 3 + VERTICAL_OVERHEAD);

        input.handle_event(&TuiEvent::Paste("c\nd\ne\nf\ng".into()));
        assert_eq!(input.calculate_height(40), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_cursor_after_trailing_space() {
        let mut input = input();
        input.handle_event(&TuiEvent::Paste("hi ".into()));
        assert_eq!(input.cursor_row_col(20), (0, 3));

        input.handle_event(&TuiEvent::InputChar('\n'));
        assert_eq!(input.cursor_row_col(20), (1, 0));
    }

    #[test]
    fn test_cursor_mid_word_follows_full_wrap() {
        let mut input = input();
        // Width 8 wraps the full buffer as "aaaa" | "bbbbbb"
        input.handle_event(&TuiEvent::Paste("aaaa bbbbbb".into()));
        for _ in 0..3 {
            input.handle_event(&TuiEvent::CursorLeft);
        }
        assert_eq!(input.cursor_row_col(8), (1, 3));

        input.handle_event(&TuiEvent::CursorHome);
        assert_eq!(input.cursor_row_col(8), (0, 0));
    }

    #[test]
    fn test_cursor_after_wrapped_line_and_newline() {
        let mut input = input();
        input.handle_event(&TuiEvent::Paste("aaaa bbbbbb\ncc".into()));
        assert_eq!(input.cursor_row_col(8), (2, 2));
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let mut input = input();
        let text = screen_text(&mut input, 40, 3);
        assert!(text.contains("Ask a question..."));
    }

    #[test]
    fn test_render_shows_buffer() {
        let mut input = input();
        input.handle_event(&TuiEvent::Paste("What is X?".into()));
        let text = screen_text(&mut input, 40, 3);
        assert!(text.contains("What is X?"));
        assert!(!text.contains("Ask a question..."));
    }
}
