//! Per-node interaction state machine and click dispatch.
//!
//! A node is either `Closed` or `Open`. Which input moves it between the two
//! depends on the sidebar mode:
//!
//! | mode      | hover enter | hover leave | click on branch |
//! |-----------|-------------|-------------|-----------------|
//! | collapsed | Open        | Closed      | no change       |
//! | expanded  | no change   | no change   | toggle          |
//!
//! Clicks on non-branch nodes never touch the state; they resolve to an ordered
//! list of [`Effect`]s for the host to execute.

use serde::Serialize;
use sidenav_types::{Effect, LinkKind, NavItem, NavKind, SidebarMode};
use tracing::debug;

/// Visibility of a branch's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

impl Visibility {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }
}

/// What a click on a node's primary row resolves to, before any state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// The node has children: flip its visibility.
    ToggleChildren,
    /// Effects to run, in order.
    Dispatch(Vec<Effect>),
    /// The node has nothing to do.
    Noop,
}

/// Resolves a click on `item` using strict precedence: children, then callback,
/// then plain navigation.
///
/// A close request is prepended to callback and navigation effects when the
/// sidebar is dismissible. Toggling children never closes the sidebar.
pub fn resolve_click(item: &NavItem, mode: SidebarMode) -> ClickAction {
    if item.is_branch() {
        return ClickAction::ToggleChildren;
    }
    let target = match &item.kind {
        NavKind::Action { action, .. } => Effect::RunAction(action.clone()),
        NavKind::Leaf {
            href,
            link: LinkKind::External,
        } => Effect::OpenExternal(href.clone()),
        NavKind::Leaf {
            href,
            link: LinkKind::Internal,
        } => Effect::Navigate(href.clone()),
        // A branch without children behaves like an internal link when it has a
        // route and like nothing otherwise.
        NavKind::Branch { href: Some(href), .. } => Effect::Navigate(href.clone()),
        NavKind::Branch { href: None, .. } => return ClickAction::Noop,
    };
    let mut effects = Vec::with_capacity(2);
    if mode.dismissible {
        effects.push(Effect::CloseSidebar);
    }
    effects.push(target);
    ClickAction::Dispatch(effects)
}

/// Result of feeding a click into a [`NavItemController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The branch changed visibility.
    Toggled(Visibility),
    /// Effects for the host to execute in order.
    Effects(Vec<Effect>),
    /// Nothing happened.
    Ignored,
}

/// Interaction state for a single node.
///
/// Lives as long as the node is mounted; starts closed and is never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavItemController {
    visibility: Visibility,
}

impl NavItemController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    /// Pointer entered the node. Opens it in collapsed mode.
    ///
    /// Returns `true` when the visibility changed.
    pub fn mouse_enter(&mut self, mode: SidebarMode) -> bool {
        if mode.expanded {
            return false;
        }
        self.set(Visibility::Open)
    }

    /// Pointer left the node. Closes it in collapsed mode.
    ///
    /// Returns `true` when the visibility changed.
    pub fn mouse_leave(&mut self, mode: SidebarMode) -> bool {
        if mode.expanded {
            return false;
        }
        self.set(Visibility::Closed)
    }

    /// Primary click on the node's row.
    pub fn click(&mut self, item: &NavItem, mode: SidebarMode) -> ClickOutcome {
        match resolve_click(item, mode) {
            ClickAction::ToggleChildren if mode.expanded => {
                self.visibility = self.visibility.toggled();
                debug!(item = %item.name, visibility = ?self.visibility, "navigation branch toggled");
                ClickOutcome::Toggled(self.visibility)
            }
            ClickAction::ToggleChildren | ClickAction::Noop => ClickOutcome::Ignored,
            ClickAction::Dispatch(effects) => {
                debug!(item = %item.name, effect_count = effects.len(), "navigation click dispatched");
                ClickOutcome::Effects(effects)
            }
        }
    }

    fn set(&mut self, visibility: Visibility) -> bool {
        let changed = self.visibility != visibility;
        self.visibility = visibility;
        changed
    }
}
