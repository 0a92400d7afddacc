//! Sidebar-wide state and the render-ready projection of the tree.

use std::collections::BTreeMap;

use serde::Serialize;
use sidenav_types::{NavItem, NavTree, NodePath, SidebarMode};
use tracing::debug;

use crate::controller::{ClickOutcome, NavItemController, Visibility};
use crate::derive::{aggregated_badge, is_active};

/// Everything a renderer needs to draw one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItemView {
    pub path: NodePath,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub depth: usize,
    pub is_active: bool,
    pub has_children: bool,
    pub is_open: bool,
    pub aggregated_badge: i64,
    /// The summary badge is shown only on a closed node in expanded mode, and only
    /// when there is something to count.
    pub badge_visible: bool,
    /// Projected children. Empty unless the node is open.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItemView>,
}

impl NavItemView {
    /// Visits this view and its projected descendants depth-first.
    pub fn for_each<'a>(&'a self, visit: &mut impl FnMut(&'a NavItemView)) {
        visit(self);
        for child in &self.children {
            child.for_each(visit);
        }
    }
}

/// Owns the tree, the location, the mode and one controller per branch instance.
#[derive(Debug, Clone)]
pub struct SidebarState {
    tree: NavTree,
    current_path: String,
    mode: SidebarMode,
    controllers: BTreeMap<NodePath, NavItemController>,
    hovered: Option<NodePath>,
}

impl SidebarState {
    pub fn new(tree: NavTree, mode: SidebarMode) -> Self {
        Self {
            tree,
            current_path: String::new(),
            mode,
            controllers: BTreeMap::new(),
            hovered: None,
        }
    }

    pub fn with_current_path(mut self, current_path: impl Into<String>) -> Self {
        self.current_path = current_path.into();
        self
    }

    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    pub fn mode(&self) -> SidebarMode {
        self.mode
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn hovered(&self) -> Option<&NodePath> {
        self.hovered.as_ref()
    }

    /// Replaces the tree. Interaction state belongs to node instances, so it is
    /// discarded along with them.
    pub fn set_tree(&mut self, tree: NavTree) {
        self.tree = tree;
        self.controllers.clear();
        self.hovered = None;
    }

    /// Updates the location. Returns `true` when it changed.
    pub fn set_current_path(&mut self, current_path: impl Into<String>) -> bool {
        let current_path = current_path.into();
        if self.current_path == current_path {
            return false;
        }
        debug!(from = %self.current_path, to = %current_path, "sidebar location changed");
        self.current_path = current_path;
        true
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.mode.expanded = expanded;
    }

    pub fn is_open(&self, path: &NodePath) -> bool {
        self.controllers.get(path).is_some_and(NavItemController::is_open)
    }

    /// Pointer entered the node at `path`.
    pub fn mouse_enter(&mut self, path: &NodePath) -> bool {
        let mode = self.mode;
        self.controller_mut(path).is_some_and(|controller| controller.mouse_enter(mode))
    }

    /// Pointer left the node at `path`.
    pub fn mouse_leave(&mut self, path: &NodePath) -> bool {
        let mode = self.mode;
        let changed = self.controller_mut(path).is_some_and(|controller| controller.mouse_leave(mode));
        if changed {
            self.unmount_descendants(path);
        }
        changed
    }

    /// Moves the pointer to `target`, or off the sidebar with `None`.
    ///
    /// A pointer over a node is also over each of its ancestors, so those keep
    /// their hover. Nodes no longer under the pointer receive a leave, newly covered
    /// ones an enter. Returns `true` when any visibility changed.
    pub fn set_hovered(&mut self, target: Option<NodePath>) -> bool {
        if self.hovered == target {
            return false;
        }
        let previous = self.hovered.as_ref().map(ancestors_and_self).unwrap_or_default();
        let next = target.as_ref().map(ancestors_and_self).unwrap_or_default();
        let mut changed = false;
        for path in previous.iter().rev().filter(|path| !next.contains(path)) {
            changed |= self.mouse_leave(path);
        }
        for path in next.iter().filter(|path| !previous.contains(path)) {
            changed |= self.mouse_enter(path);
        }
        self.hovered = target;
        changed
    }

    /// Primary click on the node at `path`. Unknown paths are ignored.
    pub fn click(&mut self, path: &NodePath) -> ClickOutcome {
        let mode = self.mode;
        let Some(item) = self.tree.get(path) else {
            return ClickOutcome::Ignored;
        };
        let controller = self.controllers.entry(path.clone()).or_default();
        let outcome = controller.click(item, mode);
        if outcome == ClickOutcome::Toggled(Visibility::Closed) {
            self.unmount_descendants(path);
        }
        outcome
    }

    /// Closes every branch.
    pub fn close_all(&mut self) {
        self.controllers.clear();
    }

    /// Projects the tree for rendering.
    pub fn project(&self) -> Vec<NavItemView> {
        self.tree
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| self.project_item(NodePath::root(index), item))
            .collect()
    }

    fn project_item(&self, path: NodePath, item: &NavItem) -> NavItemView {
        let has_children = item.is_branch();
        let is_open = has_children && self.is_open(&path);
        let badge = aggregated_badge(item);
        let children = if is_open {
            item.children()
                .iter()
                .enumerate()
                .map(|(index, child)| self.project_item(path.child(index), child))
                .collect()
        } else {
            Vec::new()
        };
        NavItemView {
            depth: path.depth(),
            name: item.name.clone(),
            icon: item.icon.clone(),
            is_active: is_active(item, &self.current_path),
            has_children,
            is_open,
            aggregated_badge: badge,
            badge_visible: self.mode.expanded && !is_open && badge > 0,
            children,
            path,
        }
    }

    /// A closed branch no longer shows its children, so their state starts over
    /// the next time they appear.
    fn unmount_descendants(&mut self, path: &NodePath) {
        let before = self.controllers.len();
        self.controllers.retain(|key, _| !key.is_descendant_of(path));
        let dropped = before - self.controllers.len();
        if dropped > 0 {
            debug!(node = %path, dropped, "reset state below closed branch");
        }
    }

    /// Controller for a branch node; `None` for anything that cannot open.
    fn controller_mut(&mut self, path: &NodePath) -> Option<&mut NavItemController> {
        if !self.tree.get(path).is_some_and(NavItem::is_branch) {
            return None;
        }
        Some(self.controllers.entry(path.clone()).or_default())
    }
}

fn ancestors_and_self(path: &NodePath) -> Vec<NodePath> {
    let indices = path.indices();
    (1..=indices.len()).map(|len| NodePath::from(indices[..len].to_vec())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidenav_types::{ActionId, Effect};

    fn tree() -> NavTree {
        NavTree::new(vec![
            NavItem::leaf("Home", "/").with_exact(true),
            NavItem::branch(
                "Reports",
                vec![
                    NavItem::leaf("Daily", "/r/daily").with_badge(3),
                    NavItem::leaf("Weekly", "/r/weekly").with_badge(0),
                ],
            ),
            NavItem::action("Logout", ActionId::new("logout")),
        ])
    }

    fn reports() -> NodePath {
        NodePath::root(1)
    }

    #[test]
    fn closed_branch_shows_summary_badge_and_hides_children() {
        let state = SidebarState::new(tree(), SidebarMode::expanded()).with_current_path("/r/daily/2024");
        let views = state.project();
        assert!(!views[0].is_active);
        let reports = &views[1];
        assert!(reports.is_active);
        assert!(reports.has_children);
        assert!(!reports.is_open);
        assert_eq!(reports.aggregated_badge, 3);
        assert!(reports.badge_visible);
        assert!(reports.children.is_empty());
    }

    #[test]
    fn open_branch_projects_children_and_hides_summary() {
        let mut state = SidebarState::new(tree(), SidebarMode::expanded()).with_current_path("/r/daily/2024");
        assert_eq!(state.click(&reports()), ClickOutcome::Toggled(Visibility::Open));
        let views = state.project();
        let reports = &views[1];
        assert!(!reports.badge_visible);
        assert_eq!(reports.children.len(), 2);
        assert_eq!(reports.children[0].path, NodePath::from(vec![1, 0]));
        assert_eq!(reports.children[0].depth, 1);
        assert!(reports.children[0].is_active);
        assert!(reports.children[0].badge_visible);
        assert!(!reports.children[1].badge_visible);
    }

    #[test]
    fn collapsed_mode_never_shows_badges() {
        let state = SidebarState::new(tree(), SidebarMode::collapsed());
        assert!(state.project().iter().all(|view| !view.badge_visible));
    }

    #[test]
    fn hovering_a_child_keeps_its_parent_open() {
        let mut state = SidebarState::new(tree(), SidebarMode::collapsed());
        assert!(state.set_hovered(Some(reports())));
        assert!(state.is_open(&reports()));
        assert!(!state.set_hovered(Some(NodePath::from(vec![1, 0]))));
        assert!(state.is_open(&reports()));
        assert!(state.set_hovered(Some(NodePath::root(0))));
        assert!(!state.is_open(&reports()));
    }

    #[test]
    fn hover_on_leaves_and_unknown_paths_is_ignored() {
        let mut state = SidebarState::new(tree(), SidebarMode::collapsed());
        assert!(!state.mouse_enter(&NodePath::root(0)));
        assert!(!state.mouse_enter(&NodePath::root(9)));
        assert_eq!(state.click(&NodePath::root(9)), ClickOutcome::Ignored);
    }

    #[test]
    fn action_click_emits_close_then_action() {
        let mut state = SidebarState::new(tree(), SidebarMode::expanded());
        assert_eq!(
            state.click(&NodePath::root(2)),
            ClickOutcome::Effects(vec![Effect::CloseSidebar, Effect::RunAction(ActionId::new("logout"))])
        );
    }

    #[test]
    fn replacing_the_tree_resets_interaction_state() {
        let mut state = SidebarState::new(tree(), SidebarMode::expanded());
        state.click(&reports());
        assert!(state.is_open(&reports()));
        state.set_tree(tree());
        assert!(!state.is_open(&reports()));
    }

    fn nested() -> NavTree {
        NavTree::new(vec![NavItem::branch(
            "Reports",
            vec![NavItem::branch("Archive", vec![NavItem::leaf("2023", "/r/2023")])],
        )])
    }

    #[test]
    fn closing_a_branch_resets_its_descendants() {
        let reports = NodePath::root(0);
        let archive = NodePath::from(vec![0, 0]);
        let mut state = SidebarState::new(nested(), SidebarMode::expanded());
        state.click(&reports);
        state.click(&archive);
        assert!(state.is_open(&archive));

        assert_eq!(state.click(&reports), ClickOutcome::Toggled(Visibility::Closed));
        assert!(!state.is_open(&archive));
        state.click(&reports);
        assert!(!state.project()[0].children[0].is_open);
    }

    #[test]
    fn leaving_a_flyout_resets_nested_flyouts() {
        let reports = NodePath::root(0);
        let archive = NodePath::from(vec![0, 0]);
        let mut state = SidebarState::new(nested(), SidebarMode::collapsed());
        state.set_hovered(Some(archive.clone()));
        assert!(state.is_open(&reports) && state.is_open(&archive));
        assert!(state.set_hovered(None));
        assert!(!state.is_open(&archive));
        assert!(state.mouse_enter(&reports));
        assert!(!state.is_open(&archive));
    }

    #[test]
    fn projection_serializes_paths_as_index_lists() {
        let mut state = SidebarState::new(tree(), SidebarMode::expanded());
        state.click(&reports());
        let json = serde_json::to_value(state.project()).expect("serialize projection");
        assert_eq!(json[1]["path"], serde_json::json!([1]));
        assert_eq!(json[1]["children"][0]["path"], serde_json::json!([1, 0]));
        assert!(json[0].get("children").is_none());
        assert!(json[0].get("icon").is_none());
    }

    #[test]
    fn location_changes_rederive_activity() {
        let mut state = SidebarState::new(tree(), SidebarMode::expanded()).with_current_path("/");
        assert!(state.project()[0].is_active);
        assert!(state.set_current_path("/r/weekly"));
        assert!(!state.set_current_path("/r/weekly"));
        let views = state.project();
        assert!(!views[0].is_active);
        assert!(views[1].is_active);
    }
}
