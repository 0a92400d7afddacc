//! Pure derivations over a navigation item: active matching and badge
//! aggregation. Both look at the item and its direct children only.

use sidenav_types::NavItem;

/// Matches a single href against the location under the given exactness rule.
///
/// Non-exact matching is containment, not prefix: `/settings` matches
/// `/admin/settings/users`. An empty href never matches.
fn href_matches(href: &str, current_path: &str, exact: bool) -> bool {
    if href.is_empty() {
        return false;
    }
    if exact { current_path == href } else { current_path.contains(href) }
}

/// Returns whether `item` should render as active for `current_path`.
///
/// The item's own href is tried first. If it does not match, each direct child's
/// href is tried in order using the *parent's* `exact` flag; the child's own flag
/// is ignored. Grandchildren are never examined.
pub fn is_active(item: &NavItem, current_path: &str) -> bool {
    if item
        .href()
        .is_some_and(|href| href_matches(href, current_path, item.exact))
    {
        return true;
    }
    item.children().iter().any(|child| {
        child
            .href()
            .is_some_and(|href| href_matches(href, current_path, item.exact))
    })
}

/// Sums the item's own badge and the own badges of its direct children.
///
/// Missing badges count as zero. Negative values are not validated and flow
/// through unchanged.
pub fn aggregated_badge(item: &NavItem) -> i64 {
    item.children()
        .iter()
        .fold(item.badge.unwrap_or(0), |total, child| total + child.badge.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidenav_types::{ActionId, NavItem};

    fn reports(exact: bool) -> NavItem {
        NavItem::branch(
            "Reports",
            vec![
                NavItem::leaf("Daily", "/r/daily").with_badge(3),
                NavItem::leaf("Weekly", "/r/weekly").with_badge(0),
            ],
        )
        .with_exact(exact)
    }

    #[test]
    fn reports_example_aggregates_and_activates_by_containment() {
        let item = reports(false);
        assert_eq!(aggregated_badge(&item), 3);
        assert!(is_active(&item, "/r/daily/2024"));
    }

    #[test]
    fn parent_exact_flag_is_inherited_by_children() {
        let item = reports(true);
        assert!(!is_active(&item, "/r/daily/2024"));
        assert!(is_active(&item, "/r/daily"));
    }

    #[test]
    fn child_exact_flag_is_ignored() {
        let item = NavItem::branch("Reports", vec![NavItem::leaf("Daily", "/r/daily").with_exact(true)]);
        assert!(is_active(&item, "/r/daily/2024"));
    }

    #[test]
    fn own_href_matches_by_containment_or_equality() {
        let item = NavItem::leaf("Settings", "/settings");
        assert!(is_active(&item, "/admin/settings/users"));
        assert!(!is_active(&item, "/profile"));

        let exact = item.clone().with_exact(true);
        assert!(is_active(&exact, "/settings"));
        assert!(!is_active(&exact, "/settings/users"));
    }

    #[test]
    fn items_without_routes_are_never_active() {
        let action = NavItem::action("Logout", ActionId::new("logout"));
        assert!(!is_active(&action, "/"));
        assert!(!is_active(&NavItem::branch("Empty", vec![]), "/anything"));

        let routeless_children = NavItem::branch(
            "Tools",
            vec![NavItem::action("Refresh", ActionId::new("refresh"))],
        );
        assert!(!is_active(&routeless_children, "/tools"));
    }

    #[test]
    fn empty_hrefs_never_match() {
        assert!(!is_active(&NavItem::leaf("Root", ""), "/x"));
        assert!(!is_active(&NavItem::leaf("Root", "").with_exact(true), ""));
        let item = NavItem::branch("Tools", vec![NavItem::leaf("Blank", "")]);
        assert!(!is_active(&item, "/tools"));
    }

    #[test]
    fn grandchildren_are_not_examined() {
        let item = NavItem::branch(
            "Admin",
            vec![NavItem::branch("Users", vec![NavItem::leaf("Invites", "/admin/users/invites")])],
        );
        assert!(!is_active(&item, "/admin/users/invites"));
    }

    #[test]
    fn aggregation_ignores_grandchildren_and_counts_own_badge() {
        let item = NavItem::branch(
            "Inbox",
            vec![
                NavItem::leaf("Unread", "/inbox/unread").with_badge(2),
                NavItem::branch("Folders", vec![NavItem::leaf("Work", "/inbox/work").with_badge(40)]).with_badge(1),
                NavItem::leaf("Archive", "/inbox/archive"),
            ],
        )
        .with_badge(5);
        assert_eq!(aggregated_badge(&item), 8);
    }

    #[test]
    fn negative_badges_propagate() {
        let item = NavItem::branch("Odd", vec![NavItem::leaf("A", "/a").with_badge(-4)]).with_badge(1);
        assert_eq!(aggregated_badge(&item), -3);
    }
}
