use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// How a leaf's route is resolved when it is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Route handled by the in-app history.
    #[default]
    Internal,
    /// Location outside the app; bypasses in-app routing.
    External,
}

/// Opaque key identifying a host-side action.
///
/// The tree carries keys rather than closures so that it stays plain data that can
/// be loaded from a file, cloned, and compared. The host maps the key to its
/// behaviour when it receives [`crate::Effect::RunAction`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a node does and which fields it needs to do it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavKind {
    /// A plain link.
    Leaf { href: String, link: LinkKind },
    /// A node grouping child items. The optional href only participates in
    /// active matching; clicking a branch never navigates.
    Branch { href: Option<String>, children: Vec<NavItem> },
    /// A node running a host action instead of navigating.
    Action { href: Option<String>, action: ActionId },
}

/// A single entry of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Display label.
    pub name: String,
    /// Glyph rendered in the icon column. Opaque to the derivation layer.
    pub icon: Option<String>,
    /// This node's own notification count.
    pub badge: Option<i64>,
    /// Require exact path equality instead of containment when matching.
    /// Also governs how direct children are matched.
    pub exact: bool,
    pub kind: NavKind,
}

impl NavItem {
    fn with_kind(name: impl Into<String>, kind: NavKind) -> Self {
        Self {
            name: name.into(),
            icon: None,
            badge: None,
            exact: false,
            kind,
        }
    }

    /// Creates an internal link.
    pub fn leaf(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            NavKind::Leaf {
                href: href.into(),
                link: LinkKind::Internal,
            },
        )
    }

    /// Creates a link that leaves the app.
    pub fn external(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            NavKind::Leaf {
                href: href.into(),
                link: LinkKind::External,
            },
        )
    }

    pub fn branch(name: impl Into<String>, children: Vec<NavItem>) -> Self {
        Self::with_kind(name, NavKind::Branch { href: None, children })
    }

    pub fn action(name: impl Into<String>, action: ActionId) -> Self {
        Self::with_kind(name, NavKind::Action { href: None, action })
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_badge(mut self, badge: i64) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn with_exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Sets the route used for active matching. On a leaf this replaces the link
    /// target.
    pub fn with_href(mut self, new_href: impl Into<String>) -> Self {
        let new_href = new_href.into();
        match &mut self.kind {
            NavKind::Leaf { href, .. } => *href = new_href,
            NavKind::Branch { href, .. } | NavKind::Action { href, .. } => *href = Some(new_href),
        }
        self
    }

    pub fn href(&self) -> Option<&str> {
        match &self.kind {
            NavKind::Leaf { href, .. } => Some(href),
            NavKind::Branch { href, .. } | NavKind::Action { href, .. } => href.as_deref(),
        }
    }

    pub fn children(&self) -> &[NavItem] {
        match &self.kind {
            NavKind::Branch { children, .. } => children,
            NavKind::Leaf { .. } | NavKind::Action { .. } => &[],
        }
    }

    /// True when the node has at least one child.
    pub fn is_branch(&self) -> bool {
        !self.children().is_empty()
    }
}

/// Position of a node in the tree as indices from the root list downwards.
///
/// Interaction state is keyed by position rather than by href because several
/// nodes may share the same route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Zero for root items.
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// True when `self` lies strictly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &NodePath) -> bool {
        self.0.len() > ancestor.0.len() && self.0.starts_with(&ancestor.0)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for index in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{index}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid node path '{input}'; expected dot separated indices such as '2.0'")]
pub struct ParseNodePathError {
    input: String,
}

impl FromStr for NodePath {
    type Err = ParseNodePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseNodePathError { input: s.to_string() });
        }
        trimmed
            .split('.')
            .map(|segment| segment.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(|_| ParseNodePathError { input: s.to_string() })
    }
}

/// The root list of a navigation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavTree {
    pub items: Vec<NavItem>,
}

impl NavTree {
    pub fn new(items: Vec<NavItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up the node at `path`.
    pub fn get(&self, path: &NodePath) -> Option<&NavItem> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.items.get(*first)?;
        for index in rest {
            node = node.children().get(*index)?;
        }
        Some(node)
    }

    /// Visits every node depth-first in display order.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&NodePath, &'a NavItem)) {
        fn descend<'a>(path: NodePath, item: &'a NavItem, visit: &mut impl FnMut(&NodePath, &'a NavItem)) {
            visit(&path, item);
            for (index, child) in item.children().iter().enumerate() {
                descend(path.child(index), child, visit);
            }
        }
        for (index, item) in self.items.iter().enumerate() {
            descend(NodePath::root(index), item, &mut visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reports() -> NavItem {
        NavItem::branch(
            "Reports",
            vec![
                NavItem::leaf("Daily", "/r/daily").with_badge(3),
                NavItem::leaf("Weekly", "/r/weekly").with_badge(0),
            ],
        )
    }

    #[test]
    fn href_follows_kind() {
        assert_eq!(NavItem::leaf("Home", "/").href(), Some("/"));
        assert_eq!(reports().href(), None);
        assert_eq!(reports().with_href("/r").href(), Some("/r"));
        assert_eq!(NavItem::action("Logout", ActionId::new("logout")).href(), None);
    }

    #[test]
    fn branch_with_empty_children_is_not_a_branch() {
        assert!(reports().is_branch());
        assert!(!NavItem::branch("Empty", vec![]).is_branch());
        assert!(NavItem::leaf("Home", "/").children().is_empty());
    }

    #[test]
    fn node_path_parses_and_displays() {
        let path: NodePath = "2.0".parse().expect("valid path");
        assert_eq!(path.indices(), &[2, 0]);
        assert_eq!(path.depth(), 1);
        assert_eq!(path.to_string(), "2.0");
        assert!("".parse::<NodePath>().is_err());
        assert!("1.x".parse::<NodePath>().is_err());
    }

    #[test]
    fn tree_lookup_and_walk_follow_display_order() {
        let tree = NavTree::new(vec![NavItem::leaf("Home", "/"), reports()]);
        assert_eq!(tree.get(&NodePath::from(vec![1, 1])).map(|n| n.name.as_str()), Some("Weekly"));
        assert!(tree.get(&NodePath::from(vec![0, 0])).is_none());
        assert!(tree.get(&NodePath::default()).is_none());

        let reports = NodePath::root(1);
        assert!(NodePath::from(vec![1, 1]).is_descendant_of(&reports));
        assert!(!reports.is_descendant_of(&reports));
        assert!(!NodePath::from(vec![10, 1]).is_descendant_of(&reports));

        let mut visited = Vec::new();
        tree.walk(|path, item| visited.push(format!("{path}:{}", item.name)));
        assert_eq!(visited, vec!["0:Home", "1:Reports", "1.0:Daily", "1.1:Weekly"]);
    }
}
