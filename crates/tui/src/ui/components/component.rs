//! Component system for the sidenav TUI.
//!
//! Components own local UI behavior, render themselves into a provided `Rect`
//! and report side effects back to the application as [`Effect`]s instead of
//! executing them.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect, text::Span};
use sidenav_types::Effect;

use crate::app::App;

/// A UI element with its own event handling and rendering.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: input arrives through `handle_key_events()` or
///    `handle_mouse_events()`; the returned effects are executed by `App` in order
/// 2. **Rendering**: `render()` draws the component into the provided frame area
///
/// # Example Implementation
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct StatusComponent;
///
/// impl Component for StatusComponent {
///     fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
///         let text = app.status.clone().unwrap_or_default();
///         frame.render_widget(Paragraph::new(text), rect);
///     }
/// }
/// ```
pub(crate) trait Component {
    /// Handle key events routed to this component.
    #[allow(dead_code)]
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events routed to this component.
    ///
    /// Effects are returned in execution order.
    #[allow(dead_code)]
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations may record geometry on `app` for later hit testing but
    /// should not change interaction state here.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hint bar while this component is on screen.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }
}
