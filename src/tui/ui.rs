use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, SEND_BUTTON_WIDTH, SendButton, TitleBar};

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub messages: Rect,
    pub input: Rect,
    pub send_button: Rect,
}

/// Width available to the input box once the send button is placed.
pub fn input_width(frame_width: u16) -> u16 {
    frame_width.saturating_sub(SEND_BUTTON_WIDTH)
}

/// Splits the frame: title row, transcript, then the input row with the send
/// button on its right. `input_height` comes from `InputBox::calculate_height`.
pub fn screen_layout(frame_area: Rect, input_height: u16) -> ScreenLayout {
    use Constraint::{Length, Min};

    let [title, messages, input_row] =
        Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(frame_area);
    let [input, send_row] =
        Layout::horizontal([Min(0), Length(SEND_BUTTON_WIDTH)]).areas(input_row);
    // Button keeps a fixed 3-row height at the bottom of the input row
    let button_height = send_row.height.min(3);
    let send_button = Rect::new(
        send_row.x,
        send_row.y + send_row.height - button_height,
        send_row.width,
        button_height,
    );

    ScreenLayout {
        title,
        messages,
        input,
        send_button,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let frame_area = frame.area();
    let input_height = tui.input_box.calculate_height(input_width(frame_area.width));
    let layout = screen_layout(frame_area, input_height);

    let busy = app.is_busy();
    let messages = app.controller.conversation().snapshot();

    MessageList::new(&mut tui.message_list, messages, busy, spinner_frame)
        .render(frame, layout.messages);

    TitleBar::new(
        app.title.clone(),
        app.backend_url.clone(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content(),
    )
    .render(frame, layout.title);

    tui.input_box.render(frame, layout.input);
    SendButton::new(busy).render(frame, layout.send_button);
}

/// True when a click at (`column`, `row`) lands on the send button.
pub fn hit_test_send_button(column: u16, row: u16, frame_area: Rect, input_height: u16) -> bool {
    screen_layout(frame_area, input_height)
        .send_button
        .contains(Position::new(column, row))
}
