//! # Sidenav Engine
//!
//! Derives everything a sidebar renderer needs from a navigation tree, the current
//! location and local interaction state. Nothing here performs I/O or owns a
//! router; clicks resolve to [`sidenav_types::Effect`]s that the host executes.
//!
//! ## Modules
//!
//! - **`derive`**: active matching and badge aggregation for a single item
//! - **`controller`**: the open/closed state machine and click precedence
//! - **`sidebar`**: per-branch state keyed by node path and the render projection
//!
//! ## Usage
//!
//! ```rust
//! use sidenav_engine::{ClickOutcome, SidebarState};
//! use sidenav_types::{NavItem, NavTree, NodePath, SidebarMode};
//!
//! let tree = NavTree::new(vec![NavItem::branch(
//!     "Reports",
//!     vec![NavItem::leaf("Daily", "/r/daily").with_badge(3)],
//! )]);
//! let mut sidebar = SidebarState::new(tree, SidebarMode::expanded()).with_current_path("/r/daily/2024");
//!
//! let views = sidebar.project();
//! assert!(views[0].is_active);
//! assert_eq!(views[0].aggregated_badge, 3);
//!
//! assert!(matches!(sidebar.click(&NodePath::root(0)), ClickOutcome::Toggled(_)));
//! assert_eq!(sidebar.project()[0].children.len(), 1);
//! ```

pub mod controller;
pub mod derive;
pub mod sidebar;

pub use controller::{ClickAction, ClickOutcome, NavItemController, Visibility, resolve_click};
pub use derive::{aggregated_badge, is_active};
pub use sidebar::{NavItemView, SidebarState};
