//! Content pane: stands in for the routed page and shows where the sidebar
//! navigated to.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use sidenav_engine::is_active;

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::{Theme, theme_helpers as th};

/// Number of history entries listed under the current location.
const HISTORY_LINES: usize = 8;

#[derive(Debug, Default)]
pub struct ContentComponent;

impl ContentComponent {
    pub fn new() -> Self {
        Self
    }
}

/// Names of every node that considers itself active for the current location,
/// in tree order.
pub(crate) fn active_trail(app: &App) -> Vec<String> {
    let current = app.sidebar.current_path();
    let mut names = Vec::new();
    app.sidebar.tree().walk(|_, item| {
        if is_active(item, current) {
            names.push(item.name.clone());
        }
    });
    names
}

impl Component for ContentComponent {
    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.theme;
        let block = th::block(theme, Some("Location"), false).style(th::background_style(theme));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [header, trail, history, status] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let location = app.sidebar.current_path();
        let location = if location.is_empty() { "(none)" } else { location };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Current path: ", theme.text_secondary_style()),
                Span::styled(location.to_string(), theme.accent_emphasis_style().add_modifier(Modifier::BOLD)),
            ])),
            header,
        );

        let names = active_trail(app);
        let trail_text = if names.is_empty() { "nothing matches".to_string() } else { names.join(" › ") };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Active: ", theme.text_secondary_style()),
                Span::styled(trail_text, theme.text_primary_style()),
            ]))
            .wrap(Wrap { trim: true }),
            trail,
        );

        let entries = app.history.entries();
        let lines: Vec<Line> = entries
            .iter()
            .rev()
            .take(HISTORY_LINES)
            .enumerate()
            .map(|(index, entry)| {
                let style = if index == 0 { theme.text_primary_style() } else { theme.text_muted_style() };
                Line::from(Span::styled(format!("  {entry}"), style))
            })
            .collect();
        let mut history_lines = vec![Line::from(Span::styled("History:", theme.text_secondary_style()))];
        history_lines.extend(lines);
        frame.render_widget(Paragraph::new(history_lines), history);

        if let Some(message) = app.status.as_deref() {
            frame.render_widget(Paragraph::new(Span::styled(message.to_string(), theme.status_info())), status);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.theme, &[(" Backspace", " Back ")])
    }
}
