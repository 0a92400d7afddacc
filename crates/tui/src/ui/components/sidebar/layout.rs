//! Geometry of the sidebar: which node occupies which terminal row, where the
//! collapsed-mode flyout goes, and what lies under the pointer.

use ratatui::layout::{Position, Rect};
use sidenav_engine::NavItemView;
use sidenav_types::NodePath;

/// Total width of the expanded sidebar, borders included.
pub const EXPANDED_WIDTH: u16 = 30;
/// Total width of the icon-only rail, borders included.
pub const COLLAPSED_WIDTH: u16 = 5;
/// Total width of a collapsed-mode flyout, borders included.
pub const FLYOUT_WIDTH: u16 = 26;

pub fn sidebar_width(expanded: bool) -> u16 {
    if expanded { EXPANDED_WIDTH } else { COLLAPSED_WIDTH }
}

/// A single-line row occupied by a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSlot {
    pub area: Rect,
    pub path: NodePath,
}

/// Popup listing an open branch's children next to the icon-only rail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flyout {
    pub area: Rect,
    /// Root branch the flyout belongs to.
    pub owner: NodePath,
    pub rows: Vec<RowSlot>,
}

/// Last rendered sidebar geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarLayout {
    pub area: Rect,
    pub rows: Vec<RowSlot>,
    pub flyout: Option<Flyout>,
}

/// What the pointer is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// A node row, in the rail or in the flyout.
    Row(NodePath),
    /// Flyout chrome (border or title) of the given owner.
    Flyout(NodePath),
    /// Sidebar chrome or empty space below the last row.
    Sidebar,
    Outside,
}

impl HitTarget {
    /// Node considered hovered for this target. Chrome of a flyout keeps its
    /// owner hovered so the flyout does not vanish while the pointer crosses it.
    pub fn hover_path(&self) -> Option<NodePath> {
        match self {
            Self::Row(path) | Self::Flyout(path) => Some(path.clone()),
            Self::Sidebar | Self::Outside => None,
        }
    }
}

/// Depth-first list of `views` and their projected children.
pub fn flatten(views: &[NavItemView]) -> Vec<&NavItemView> {
    let mut rows = Vec::new();
    for view in views {
        view.for_each(&mut |row| rows.push(row));
    }
    rows
}

/// Rows drawn inside the sidebar itself. The icon-only rail shows root items only;
/// their children live in the flyout.
pub fn rail_rows(views: &[NavItemView], expanded: bool) -> Vec<&NavItemView> {
    if expanded { flatten(views) } else { views.iter().collect() }
}

fn stack_rows<'a>(inner: Rect, rows: impl IntoIterator<Item = &'a NavItemView>) -> Vec<RowSlot> {
    rows.into_iter()
        .zip(inner.y..inner.bottom())
        .map(|(view, y)| RowSlot {
            area: Rect::new(inner.x, y, inner.width, 1),
            path: view.path.clone(),
        })
        .collect()
}

/// Computes the sidebar geometry for `area`. `bounds` limits where a flyout may
/// be placed, usually the whole frame.
pub fn compute_layout(area: Rect, bounds: Rect, views: &[NavItemView], expanded: bool) -> SidebarLayout {
    let inner = area.inner(ratatui::layout::Margin::new(1, 1));
    let rows = stack_rows(inner, rail_rows(views, expanded));
    let flyout = if expanded { None } else { compute_flyout(area, bounds, views, &rows) };
    SidebarLayout { area, rows, flyout }
}

fn compute_flyout(area: Rect, bounds: Rect, views: &[NavItemView], rail: &[RowSlot]) -> Option<Flyout> {
    let owner = views.iter().find(|view| view.is_open && !view.children.is_empty())?;
    let anchor = rail.iter().find(|slot| slot.path == owner.path)?;
    let children = flatten(&owner.children);

    let x = area.right();
    let available_width = bounds.right().saturating_sub(x);
    if available_width < 3 {
        return None;
    }
    let width = FLYOUT_WIDTH.min(available_width);
    let height = u16::try_from(children.len() + 2).unwrap_or(u16::MAX).min(bounds.height);
    // Align the first child with the hovered icon, shifting up near the bottom.
    let preferred_y = anchor.area.y.saturating_sub(1).max(bounds.y);
    let y = preferred_y.min(bounds.bottom().saturating_sub(height));
    let flyout_area = Rect::new(x, y, width, height);

    let inner = flyout_area.inner(ratatui::layout::Margin::new(1, 1));
    Some(Flyout {
        area: flyout_area,
        owner: owner.path.clone(),
        rows: stack_rows(inner, children),
    })
}

/// Finds what lies under the cell at (`column`, `row`). The flyout is checked
/// first because it is drawn on top.
pub fn hit_test(layout: &SidebarLayout, column: u16, row: u16) -> HitTarget {
    let position = Position::new(column, row);
    if let Some(flyout) = &layout.flyout {
        if let Some(slot) = flyout.rows.iter().find(|slot| slot.area.contains(position)) {
            return HitTarget::Row(slot.path.clone());
        }
        if flyout.area.contains(position) {
            return HitTarget::Flyout(flyout.owner.clone());
        }
    }
    if let Some(slot) = layout.rows.iter().find(|slot| slot.area.contains(position)) {
        return HitTarget::Row(slot.path.clone());
    }
    if layout.area.contains(position) {
        return HitTarget::Sidebar;
    }
    HitTarget::Outside
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidenav_engine::SidebarState;
    use sidenav_types::{NavItem, NavTree, SidebarMode};

    fn sidebar(mode: SidebarMode) -> SidebarState {
        SidebarState::new(
            NavTree::new(vec![
                NavItem::leaf("Home", "/"),
                NavItem::branch(
                    "Reports",
                    vec![NavItem::leaf("Daily", "/r/daily"), NavItem::leaf("Weekly", "/r/weekly")],
                ),
            ]),
            mode,
        )
    }

    #[test]
    fn expanded_rows_include_open_children() {
        let mut state = sidebar(SidebarMode::expanded());
        state.click(&NodePath::root(1));
        let views = state.project();
        let layout = compute_layout(Rect::new(0, 0, EXPANDED_WIDTH, 20), Rect::new(0, 0, 80, 20), &views, true);

        let paths: Vec<String> = layout.rows.iter().map(|slot| slot.path.to_string()).collect();
        assert_eq!(paths, vec!["0", "1", "1.0", "1.1"]);
        assert_eq!(layout.rows[0].area, Rect::new(1, 1, EXPANDED_WIDTH - 2, 1));
        assert!(layout.flyout.is_none());
    }

    #[test]
    fn rows_are_clipped_to_the_available_height() {
        let mut state = sidebar(SidebarMode::expanded());
        state.click(&NodePath::root(1));
        let views = state.project();
        let layout = compute_layout(Rect::new(0, 0, EXPANDED_WIDTH, 4), Rect::new(0, 0, 80, 4), &views, true);
        assert_eq!(layout.rows.len(), 2);
    }

    #[test]
    fn collapsed_open_branch_gets_a_flyout_beside_the_rail() {
        let mut state = sidebar(SidebarMode::collapsed());
        state.set_hovered(Some(NodePath::root(1)));
        let views = state.project();
        let layout = compute_layout(Rect::new(0, 0, COLLAPSED_WIDTH, 20), Rect::new(0, 0, 80, 20), &views, false);

        assert_eq!(layout.rows.len(), 2);
        let flyout = layout.flyout.as_ref().expect("flyout for hovered branch");
        assert_eq!(flyout.owner, NodePath::root(1));
        assert_eq!(flyout.area, Rect::new(COLLAPSED_WIDTH, 1, FLYOUT_WIDTH, 4));
        assert_eq!(flyout.rows[0].area.y, layout.rows[1].area.y);

        assert_eq!(hit_test(&layout, COLLAPSED_WIDTH + 2, 2), HitTarget::Row(NodePath::from(vec![1, 0])));
        assert_eq!(hit_test(&layout, COLLAPSED_WIDTH, 1), HitTarget::Flyout(NodePath::root(1)));
        assert_eq!(hit_test(&layout, 2, 1), HitTarget::Row(NodePath::root(0)));
        assert_eq!(hit_test(&layout, 2, 10), HitTarget::Sidebar);
        assert_eq!(hit_test(&layout, 60, 10), HitTarget::Outside);
    }

    #[test]
    fn flyout_shifts_up_near_the_bottom() {
        let mut state = sidebar(SidebarMode::collapsed());
        state.set_hovered(Some(NodePath::root(1)));
        let views = state.project();
        let layout = compute_layout(Rect::new(0, 0, COLLAPSED_WIDTH, 4), Rect::new(0, 0, 80, 4), &views, false);
        let flyout = layout.flyout.expect("flyout");
        assert_eq!(flyout.area.y, 0);
        assert_eq!(flyout.area.bottom(), 4);
    }

    #[test]
    fn hover_path_keeps_flyout_owner() {
        assert_eq!(HitTarget::Flyout(NodePath::root(1)).hover_path(), Some(NodePath::root(1)));
        assert_eq!(HitTarget::Sidebar.hover_path(), None);
    }
}
