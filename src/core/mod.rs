//! # Core Application Logic
//!
//! chatline's request lifecycle. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                 ┌──────────────────────────────┐
//!                 │            CORE              │
//!                 │                              │
//!                 │  • Conversation (append-only)│
//!                 │  • Draft                     │
//!                 │  • RequestController (busy)  │
//!                 │  • Action → update → Effect  │
//!                 └──────────────┬───────────────┘
//!                                │
//!                 ┌──────────────┴───────────────┐
//!                 ▼                              ▼
//!          ┌────────────┐                 ┌────────────┐
//!          │    TUI     │                 │  one-shot  │
//!          │ (ratatui)  │                 │  (stdout)  │
//!          └────────────┘                 └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: `Message`, the immutable transcript entry
//! - [`conversation`]: the append-only store
//! - [`draft`]: the text being composed
//! - [`controller`]: one send cycle at a time, with scoped cleanup
//! - [`state`]: the `App` struct the renderer observes
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`config`]: layered configuration

pub mod action;
pub mod config;
pub mod controller;
pub mod conversation;
pub mod draft;
pub mod message;
pub mod state;

pub use controller::RequestController;
pub use conversation::Conversation;
pub use draft::Draft;
pub use message::{FALLBACK_ERROR_TEXT, Message, Sender};
