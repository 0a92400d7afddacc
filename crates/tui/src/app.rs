//! Application state for the sidenav TUI.
//!
//! `App` owns the sidebar state, the in-memory location history that stands in
//! for a router, and the theme. Components report [`Effect`]s; `App` executes
//! them in order.

use sidenav_engine::SidebarState;
use sidenav_types::Effect;
use tracing::{debug, info};

use crate::ui::components::sidebar::SidebarLayout;
use crate::ui::theme::Theme;

/// Minimal router stand-in: a stack of visited locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationHistory {
    entries: Vec<String>,
}

impl LocationHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
        }
    }

    pub fn current(&self) -> &str {
        self.entries.last().map(String::as_str).unwrap_or("/")
    }

    pub fn push(&mut self, location: impl Into<String>) {
        self.entries.push(location.into());
    }

    /// Pops the current location. The first entry is never removed.
    pub fn back(&mut self) -> Option<&str> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop();
        Some(self.current())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

pub struct App {
    /// Tree, location, mode and per-branch interaction state.
    pub sidebar: SidebarState,
    /// Visited locations; the last entry mirrors `sidebar.current_path()`.
    pub history: LocationHistory,
    pub theme: Box<dyn Theme>,
    /// Geometry of the last rendered sidebar, used for mouse hit testing.
    pub sidebar_layout: SidebarLayout,
    /// Last message shown in the content pane.
    pub status: Option<String>,
    pub should_quit: bool,
    dirty: bool,
}

impl App {
    pub fn new(sidebar: SidebarState, theme: Box<dyn Theme>) -> Self {
        let history = LocationHistory::new(sidebar.current_path());
        Self {
            sidebar,
            history,
            theme,
            sidebar_layout: SidebarLayout::default(),
            status: None,
            should_quit: false,
            dirty: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Executes effects in the order they were produced.
    pub fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        debug!(effect = ?effect, "applying effect");
        match effect {
            Effect::CloseSidebar => {
                if self.sidebar.mode().dismissible && self.sidebar.mode().expanded {
                    self.sidebar.set_expanded(false);
                    self.sidebar.close_all();
                }
            }
            Effect::Navigate(location) => {
                self.history.push(location.clone());
                self.sidebar.set_current_path(location.clone());
                self.status = Some(format!("Navigated to {location}"));
            }
            Effect::OpenExternal(location) => {
                info!(location = %location, "external navigation requested");
                self.status = Some(format!("Opening external link {location}"));
            }
            Effect::RunAction(action) => {
                info!(action = %action, "navigation action triggered");
                self.status = Some(format!("Ran action '{action}'"));
            }
        }
        self.mark_dirty();
    }

    /// Switches between the expanded and icon-only sidebar.
    pub fn toggle_sidebar(&mut self) {
        let expanded = !self.sidebar.mode().expanded;
        self.sidebar.set_expanded(expanded);
        self.sidebar.close_all();
        self.mark_dirty();
    }

    /// Returns to the previous location, if any.
    pub fn go_back(&mut self) {
        if let Some(location) = self.history.back().map(str::to_string) {
            self.sidebar.set_current_path(location.clone());
            self.status = Some(format!("Back to {location}"));
            self.mark_dirty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;
    use sidenav_types::{ActionId, NavItem, NavTree, NodePath, SidebarMode};

    fn app(mode: SidebarMode) -> App {
        let tree = NavTree::new(vec![
            NavItem::leaf("Home", "/"),
            NavItem::branch("Reports", vec![NavItem::leaf("Daily", "/r/daily")]),
        ]);
        let sidebar = SidebarState::new(tree, mode).with_current_path("/");
        App::new(sidebar, Box::new(DraculaTheme::new()))
    }

    #[test]
    fn history_never_pops_the_first_entry() {
        let mut history = LocationHistory::new("/");
        history.push("/a");
        assert_eq!(history.back(), Some("/"));
        assert_eq!(history.back(), None);
        assert_eq!(history.entries(), &["/".to_string()]);
    }

    #[test]
    fn close_then_navigate_collapses_and_moves() {
        let mut app = app(SidebarMode::expanded());
        app.sidebar.click(&NodePath::root(1));
        app.apply_effects(vec![Effect::CloseSidebar, Effect::Navigate("/r/daily".into())]);

        assert!(!app.sidebar.mode().expanded);
        assert!(!app.sidebar.is_open(&NodePath::root(1)));
        assert_eq!(app.sidebar.current_path(), "/r/daily");
        assert_eq!(app.history.current(), "/r/daily");

        app.go_back();
        assert_eq!(app.sidebar.current_path(), "/");
    }

    #[test]
    fn non_dismissible_sidebar_stays_expanded() {
        let mut app = app(SidebarMode::expanded().with_dismissible(false));
        app.apply_effects(vec![Effect::CloseSidebar]);
        assert!(app.sidebar.mode().expanded);
    }

    #[test]
    fn actions_and_external_links_only_report_status() {
        let mut app = app(SidebarMode::expanded());
        app.apply_effects(vec![Effect::RunAction(ActionId::new("sign-out"))]);
        assert_eq!(app.status.as_deref(), Some("Ran action 'sign-out'"));
        app.apply_effects(vec![Effect::OpenExternal("https://example.com".into())]);
        assert_eq!(app.history.entries().len(), 1);
        assert!(app.take_dirty());
        assert!(!app.take_dirty());
    }
}
