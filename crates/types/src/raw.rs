//! Loose serde shape for navigation trees read from configuration files and the
//! checked conversion into [`NavItem`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::nav::{ActionId, LinkKind, NavItem, NavKind, NavTree};

/// Error surfaced when a raw item cannot be turned into a [`NavItem`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavTreeError {
    /// The item has no children, no callback and no href, so it can neither open,
    /// act nor navigate.
    #[error("navigation item '{name}' needs an href, children or a callback")]
    MissingTarget { name: String },
    /// The item declares both children and a callback.
    #[error("navigation item '{name}' declares both children and a callback")]
    ConflictingTargets { name: String },
}

/// A navigation item as written in a tree file.
///
/// Every field except `name` is optional. `itens` is accepted as an alias for
/// `children` for trees exported from older hosts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNavItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub exact: bool,
    #[serde(default, rename = "type")]
    pub link: LinkKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<i64>,
    #[serde(default, alias = "itens", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawNavItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
}

/// Top-level layout of a tree file: either a bare list or `{ items: [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawNavDocument {
    List(Vec<RawNavItem>),
    Wrapped { items: Vec<RawNavItem> },
}

impl RawNavDocument {
    pub fn into_items(self) -> Vec<RawNavItem> {
        match self {
            Self::List(items) | Self::Wrapped { items } => items,
        }
    }
}

impl RawNavItem {
    fn into_item(self, kind: NavKind) -> NavItem {
        NavItem {
            name: self.name,
            icon: self.icon,
            badge: self.badge,
            exact: self.exact,
            kind,
        }
    }

    /// Rejects the two shapes the closed union has no faithful variant for, then
    /// resolves like [`RawNavItem::resolve_lenient`].
    fn resolve(self, children: Vec<NavItem>) -> Result<NavItem, NavTreeError> {
        let has_href = self.href.as_deref().is_some_and(is_route);
        match (children.is_empty(), self.callback.is_some(), has_href) {
            (false, true, _) => Err(NavTreeError::ConflictingTargets { name: self.name }),
            (true, false, false) => Err(NavTreeError::MissingTarget { name: self.name }),
            _ => Ok(self.resolve_lenient(children)),
        }
    }

    /// Picks the variant for an item whose children were already converted.
    ///
    /// A blank href counts as no href. Children win over a callback, and an item
    /// with no target at all becomes an inert, childless branch.
    fn resolve_lenient(mut self, children: Vec<NavItem>) -> NavItem {
        let callback = self.callback.take();
        let href = self.href.take().filter(|href| is_route(href));
        let link = self.link;
        match (children.is_empty(), callback, href) {
            (false, Some(action), href) => {
                warn!(item = %self.name, action = %action, "Ignoring callback on navigation item with children");
                self.into_item(NavKind::Branch { href, children })
            }
            (false, None, href) => self.into_item(NavKind::Branch { href, children }),
            (true, Some(action), href) => self.into_item(NavKind::Action {
                href,
                action: ActionId::new(action),
            }),
            (true, None, Some(href)) => self.into_item(NavKind::Leaf { href, link }),
            (true, None, None) => {
                warn!(item = %self.name, "Navigation item has no href, children or callback; it will do nothing");
                self.into_item(NavKind::Branch { href: None, children })
            }
        }
    }

    /// Converts the item without failing.
    ///
    /// Malformed items are kept with a warning: they render but are never active,
    /// and a click on them only toggles their children, if any.
    pub fn into_nav_item_lenient(mut self) -> NavItem {
        let children = std::mem::take(&mut self.children)
            .into_iter()
            .map(RawNavItem::into_nav_item_lenient)
            .collect();
        self.resolve_lenient(children)
    }
}

fn is_route(href: &str) -> bool {
    !href.trim().is_empty()
}

impl TryFrom<RawNavItem> for NavItem {
    type Error = NavTreeError;

    fn try_from(mut raw: RawNavItem) -> Result<Self, Self::Error> {
        let children = std::mem::take(&mut raw.children)
            .into_iter()
            .map(NavItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        raw.resolve(children)
    }
}

impl NavTree {
    /// Builds a tree, failing on the first malformed item.
    pub fn from_raw(items: Vec<RawNavItem>) -> Result<Self, NavTreeError> {
        items
            .into_iter()
            .map(NavItem::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Builds a tree, keeping malformed items as degraded nodes with a warning.
    pub fn from_raw_lenient(items: Vec<RawNavItem>) -> Self {
        Self::new(items.into_iter().map(RawNavItem::into_nav_item_lenient).collect())
    }
}
