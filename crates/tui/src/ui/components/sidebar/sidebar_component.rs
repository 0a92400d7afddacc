use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};
use sidenav_engine::{ClickOutcome, NavItemView};
use sidenav_types::Effect;
use tracing::debug;

use super::layout::{HitTarget, RowSlot, compute_layout, flatten, hit_test, rail_rows};
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::{Theme, theme_helpers as th};
use crate::ui::utils::{display_width, truncate_to_width};

const DEFAULT_ICON: &str = "•";
const CHEVRON_OPEN: &str = "▾";
const CHEVRON_CLOSED: &str = "▸";

/// Collapsible navigation sidebar.
///
/// In expanded mode every visible node gets a labelled row and branches open
/// inline on click. In icon-only mode the rail shows root icons and hovering a
/// branch opens a flyout with its children. All state lives in
/// `App::sidebar`; this component only translates pointer input and draws the
/// projection.
#[derive(Debug, Default)]
pub struct SidebarComponent;

impl SidebarComponent {
    pub fn new() -> Self {
        Self
    }
}

/// Builds the line for a labelled row: indent, icon, label, then badge and
/// chevron flushed right.
fn labelled_row<'a>(theme: &dyn Theme, view: &NavItemView, width: usize, hovered: bool) -> Line<'a> {
    let icon = view.icon.as_deref().unwrap_or(DEFAULT_ICON);
    let indent = "  ".repeat(view.depth);

    let mut right: Vec<Span<'a>> = Vec::new();
    if view.badge_visible {
        right.push(th::badge_span(theme, view.aggregated_badge));
    }
    if view.has_children {
        let chevron = if view.is_open { CHEVRON_OPEN } else { CHEVRON_CLOSED };
        right.push(Span::styled(format!(" {chevron}"), theme.accent_primary_style()));
    }
    let right_width: usize = right.iter().map(|span| display_width(&span.content)).sum();

    let prefix = format!(" {indent}{icon} ");
    let label_budget = width.saturating_sub(display_width(&prefix) + right_width + 1);
    let label = truncate_to_width(&view.name, label_budget);
    let padding = width.saturating_sub(display_width(&prefix) + display_width(&label) + right_width);

    let mut spans = vec![
        Span::styled(prefix, th::icon_style(theme, true, view.is_active, hovered)),
        Span::styled(label, th::label_style(theme, view.is_active)),
        Span::raw(" ".repeat(padding)),
    ];
    spans.extend(right);
    Line::from(spans).style(th::row_style(theme, true, hovered))
}

/// Builds the line for an icon-only rail row.
fn icon_row<'a>(theme: &dyn Theme, view: &NavItemView, hovered: bool) -> Line<'a> {
    let icon = view.icon.clone().unwrap_or_else(|| DEFAULT_ICON.to_string());
    Line::from(Span::styled(icon, th::icon_style(theme, false, view.is_active, hovered)))
        .centered()
        .style(th::row_style(theme, false, hovered))
}

fn find_view<'a>(views: &[&'a NavItemView], slot: &RowSlot) -> Option<&'a NavItemView> {
    views.iter().copied().find(|view| view.path == slot.path)
}

impl Component for SidebarComponent {
    /// Pointer movement drives hover; a left click on a row toggles a branch or
    /// returns the node's effects.
    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let target = hit_test(&app.sidebar_layout, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let next = target.hover_path();
                if app.sidebar.hovered() != next.as_ref() {
                    app.sidebar.set_hovered(next);
                    app.mark_dirty();
                }
                Vec::new()
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let HitTarget::Row(path) = target else {
                    return Vec::new();
                };
                match app.sidebar.click(&path) {
                    ClickOutcome::Toggled(visibility) => {
                        debug!(node = %path, visibility = ?visibility, "sidebar branch toggled");
                        app.mark_dirty();
                        Vec::new()
                    }
                    ClickOutcome::Effects(effects) => effects,
                    ClickOutcome::Ignored => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let expanded = app.sidebar.mode().expanded;
        let views = app.sidebar.project();
        let layout = compute_layout(area, frame.area(), &views, expanded);
        let theme = &*app.theme;
        let hovered = app.sidebar.hovered();

        let title = if expanded { Some("Menu") } else { None };
        frame.render_widget(th::block(theme, title, false), area);

        let rail = rail_rows(&views, expanded);
        for slot in &layout.rows {
            let Some(view) = find_view(&rail, slot) else {
                continue;
            };
            let is_hovered = hovered == Some(&view.path);
            let line = if expanded {
                labelled_row(theme, view, usize::from(slot.area.width), is_hovered)
            } else {
                icon_row(theme, view, is_hovered)
            };
            frame.render_widget(Paragraph::new(line), slot.area);
        }

        if let Some(flyout) = &layout.flyout {
            let owner_name = views
                .iter()
                .find(|view| view.path == flyout.owner)
                .map(|view| view.name.as_str());
            let children = views
                .iter()
                .find(|view| view.path == flyout.owner)
                .map(|view| flatten(&view.children))
                .unwrap_or_default();

            frame.render_widget(Clear, flyout.area);
            frame.render_widget(th::block(theme, owner_name, true), flyout.area);
            for slot in &flyout.rows {
                let Some(view) = find_view(&children, slot) else {
                    continue;
                };
                let is_hovered = hovered == Some(&view.path);
                let line = labelled_row(theme, view, usize::from(slot.area.width), is_hovered);
                frame.render_widget(Paragraph::new(line), slot.area);
            }
        }

        app.sidebar_layout = layout;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let toggle = if app.sidebar.mode().expanded {
            (" Click", " Open/Go ")
        } else {
            (" Hover", " Peek ")
        };
        th::build_hint_spans(&*app.theme, &[toggle, (" s", " Sidebar ")])
    }
}
