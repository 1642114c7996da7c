//! Component system for the tutorial TUI.
//!
//! Components are self-contained UI elements: they handle the keys routed to
//! them, react to application messages, and render themselves into a `Rect`.
//! Side effects are reported back as [`Effect`]s rather than performed
//! in place.

use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::{App, Effect, Msg};

/// A UI component with its own local behavior.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: keys arrive through `handle_key_events()`
/// 2. **State Updates**: `update()` sees every application message
/// 3. **Rendering**: `render()` draws into the provided frame area
pub(crate) trait Component {
    /// Handle a key routed to this component.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// React to an application message.
    fn update(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing;
    /// view-state bookkeeping such as clamping a scroll offset is fine.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hint bar while this component is relevant.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }
}
