use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};
use sidenav_types::Effect;

use super::components::sidebar::sidebar_width;
use super::components::{Component, ContentComponent, SidebarComponent};
use super::theme::{Theme, theme_helpers as th};
use crate::app::App;

/// Root view: sidebar on the left, content pane on the right and a hint bar
/// along the bottom.
#[derive(Debug, Default)]
pub struct MainView {
    pub sidebar_view: SidebarComponent,
    pub content_view: ContentComponent,
}

impl MainView {
    pub fn new() -> Self {
        Self {
            sidebar_view: SidebarComponent::new(),
            content_view: ContentComponent::new(),
        }
    }

    /// Splits `area` into `[sidebar, content, hints]`.
    fn get_preferred_layout(&self, app: &App, area: Rect) -> [Rect; 3] {
        let [body, hints] = Layout::vertical([
            Constraint::Min(1),    // Sidebar and content
            Constraint::Length(1), // Hints bar
        ])
        .areas(area);
        let [sidebar, content] = Layout::horizontal([
            Constraint::Length(sidebar_width(app.sidebar.mode().expanded)),
            Constraint::Min(0),
        ])
        .areas(body);
        [sidebar, content, hints]
    }
}

impl Component for MainView {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.should_quit = true,
            KeyCode::Char('s') => app.toggle_sidebar(),
            KeyCode::Backspace => app.go_back(),
            _ => {}
        }
        Vec::new()
    }

    /// The sidebar owns every pointer interaction, including leaving it.
    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        self.sidebar_view.handle_mouse_events(app, mouse)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        frame.render_widget(Block::default().style(th::background_style(&*app.theme)), area);

        let [sidebar, content, hints] = self.get_preferred_layout(app, area);
        // Content first so a collapsed-mode flyout can draw over it.
        self.content_view.render(frame, content, app);
        self.sidebar_view.render(frame, sidebar, app);

        let hint_spans = self.get_hint_spans(app);
        let hints_widget = Paragraph::new(Line::from(hint_spans)).style(th::background_style(&*app.theme));
        frame.render_widget(hints_widget, hints);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.theme.text_muted_style())];
        hint_spans.extend(self.sidebar_view.get_hint_spans(app));
        hint_spans.extend(self.content_view.get_hint_spans(app));
        hint_spans.extend(th::build_hint_spans(&*app.theme, &[(" q", " Quit ")]));
        hint_spans
    }
}
