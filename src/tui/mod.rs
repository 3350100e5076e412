//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates terminal events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Send triggers
//!
//! Enter in the input box and a left click on the send button both dispatch
//! `Action::Submit`. Neither checks the busy flag itself; the controller
//! refuses a second send while one is outstanding, so both paths behave the
//! same.
//!
//! ## Redraw Strategy
//!
//! - **Busy**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms and only redraws on events, on a new
//!   conversation revision, or on a completed request.

mod component;
pub mod components;
mod event;
pub mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::RequestController;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::transport::ChatTransport;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Conversation revision at the last draw
    pub seen_revision: u64,
}

impl TuiState {
    pub fn new(placeholder: String) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(placeholder),
            seen_revision: 0,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals without it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // Non-blinking: continuous redraws reset the blink timer
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Applies `action` and starts whatever I/O the resulting effect asks for.
/// Returns true when the app should quit.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::SpawnRequest(query) => {
            spawn_request(app.controller.transport(), query, tx.clone());
            false
        }
        Effect::Quit => true,
    }
}

pub fn run(controller: RequestController, config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(controller, &config);
    let mut tui = TuiState::new(config.placeholder.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let revision = app.controller.conversation().revision();
        if revision != tui.seen_revision {
            tui.seen_revision = revision;
            needs_redraw = true;
        }

        let animating = app.is_busy();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::ForceQuit | TuiEvent::Quit => {
                    should_quit |= dispatch(&mut app, Action::Quit, &tx);
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.message_list.handle_event(&event);
                }
                TuiEvent::MouseClick(column, row) => {
                    let frame_area = terminal.get_frame().area();
                    let input_height = tui
                        .input_box
                        .calculate_height(ui::input_width(frame_area.width));
                    if ui::hit_test_send_button(column, row, frame_area, input_height) {
                        debug!("Send button clicked");
                        should_quit |= dispatch(&mut app, Action::Submit, &tx);
                    }
                }
                _ => match tui.input_box.handle_event(&event) {
                    Some(InputEvent::ContentChanged) => {
                        let text = tui.input_box.buffer.clone();
                        should_quit |= dispatch(&mut app, Action::EditDraft(text), &tx);
                    }
                    Some(InputEvent::Submit) => {
                        should_quit |= dispatch(&mut app, Action::Submit, &tx);
                    }
                    None => {}
                },
            }
        }

        if should_quit {
            break;
        }

        // Completed requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &tx) {
                should_quit = true;
            }
        }

        // The controller clears the draft when a request settles
        if tui.input_box.sync_from(app.controller.draft().get()) {
            needs_redraw = true;
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

fn spawn_request(transport: Arc<dyn ChatTransport>, query: String, tx: mpsc::Sender<Action>) {
    info!("Spawning request via {}", transport.name());

    tokio::spawn(async move {
        let request_start = Instant::now();
        let outcome = transport.ask(&query).await;
        debug!(
            "Request settled in {}ms (ok={})",
            request_start.elapsed().as_millis(),
            outcome.is_ok()
        );
        if tx.send(Action::ResponseReceived(outcome)).is_err() {
            warn!("Failed to deliver response: receiver dropped");
        }
    });
}
