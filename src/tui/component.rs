use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive their data as props (struct fields), may hold
/// presentation state, and draw themselves into a `Rect`. `render` takes
/// `&mut self` so stateful components can refresh layout caches during the
/// render pass, in line with Ratatui's `StatefulWidget`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns low-level terminal events into its own events.
pub trait EventHandler {
    type Event;

    /// Handle a `TuiEvent`, optionally emitting a component event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
