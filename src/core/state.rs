//! # Application State
//!
//! Core state for chatline. No TUI types here; presentation state lives in
//! the `tui` module.
//!
//! ```text
//! App
//! ├── controller: RequestController   // conversation, draft, busy flag
//! ├── title: String                   // header text
//! ├── backend_url: String             // shown in the title bar
//! └── status_message: String          // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::controller::RequestController;

/// Status line text while a request is outstanding.
pub const LOADING_STATUS: &str = "Loading...";

pub struct App {
    pub controller: RequestController,
    pub title: String,
    pub backend_url: String,
    pub status_message: String,
}

impl App {
    pub fn new(controller: RequestController, title: String, backend_url: String) -> Self {
        Self {
            controller,
            title,
            backend_url,
            status_message: String::new(),
        }
    }

    pub fn from_config(controller: RequestController, config: &ResolvedConfig) -> Self {
        Self::new(controller, config.title.clone(), config.base_url.clone())
    }

    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }
}
