//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: title, backend URL, status
//! - `MessageBubble`: one transcript entry with its sources
//! - `SendButton`: pointer send control, dimmed while busy
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: draft editing surface
//! - `MessageList`: scrollable transcript with layout caching
//!
//! Components receive external data as props, never by reaching into `App`.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── input_box.rs
//! └── send_button.rs
//! ```

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod send_button;
mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use message::MessageBubble;
pub use message_list::{MessageList, MessageListState};
pub use send_button::{SEND_BUTTON_WIDTH, SendButton};
pub use title_bar::TitleBar;
