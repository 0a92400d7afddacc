//! Shared type definitions for the sidenav workspace.
//!
//! The navigation tree is supplied by the host once and never mutated by the
//! derivation or interaction layers. Everything those layers produce is either a
//! pure projection of the tree or an [`Effect`] the host is expected to execute.

mod nav;
mod raw;

use serde::Serialize;

pub use nav::{ActionId, LinkKind, NavItem, NavKind, NavTree, NodePath, ParseNodePathError};
pub use raw::{NavTreeError, RawNavDocument, RawNavItem};

/// Side effects produced by a click on a navigation node.
///
/// Effects are returned in the order the host must execute them. A close request
/// always precedes the navigation or action it accompanies so an overlay sidebar
/// is dismissed before the route changes underneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", content = "target", rename_all = "snake_case")]
pub enum Effect {
    /// Ask the host to close the whole sidebar.
    CloseSidebar,
    /// Run the host action registered under the given key.
    RunAction(ActionId),
    /// Push the route onto the in-app navigation history.
    Navigate(String),
    /// Leave the app and perform a full navigation to the given location.
    OpenExternal(String),
}

/// Presentation mode shared by every node of one sidebar instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SidebarMode {
    /// Labels and badges are visible and clicks drive branch visibility.
    /// When `false` the sidebar is icon-only and hover drives visibility.
    pub expanded: bool,
    /// Whether the host registered a close handler. When `false`, clicks never
    /// emit [`Effect::CloseSidebar`].
    pub dismissible: bool,
}

impl SidebarMode {
    pub fn expanded() -> Self {
        Self {
            expanded: true,
            dismissible: true,
        }
    }

    pub fn collapsed() -> Self {
        Self {
            expanded: false,
            dismissible: true,
        }
    }

    pub fn with_dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }
}

impl Default for SidebarMode {
    fn default() -> Self {
        Self::expanded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_serialize_with_snake_case_tags() {
        let navigate = serde_json::to_value(Effect::Navigate("/r/daily".into())).expect("serialize effect");
        assert_eq!(navigate["effect"], "navigate");
        assert_eq!(navigate["target"], "/r/daily");

        let close = serde_json::to_value(Effect::CloseSidebar).expect("serialize effect");
        assert_eq!(close["effect"], "close_sidebar");
        assert!(close.get("target").is_none());

        let action = serde_json::to_value(Effect::RunAction(ActionId::new("logout"))).expect("serialize effect");
        assert_eq!(action["target"], "logout");
    }

    #[test]
    fn default_mode_is_expanded_and_dismissible() {
        let mode = SidebarMode::default();
        assert!(mode.expanded);
        assert!(mode.dismissible);
        assert!(!SidebarMode::collapsed().with_dismissible(false).dismissible);
    }
}
