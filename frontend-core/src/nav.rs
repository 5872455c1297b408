//! Declarative navigation tree and the permission-driven filter over it.
//!
//! The static tree is the single source of truth for both menu rendering and
//! per-request authorization. [`filter_nav`] never mutates its input and
//! keeps sibling order, so repeated calls with different permission sets are
//! independent.

use serde::{Deserialize, Serialize};

use crate::permission::PermissionSet;

/// One navigable view (or a pure menu group when `view` is `None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavNode {
    pub path: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Required permission codes; empty means any authenticated session.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Hidden nodes are excluded from menus but stay directly routable.
    #[serde(default)]
    pub hidden: bool,
    /// Opaque view identifier interpreted by the renderer; `None` marks a
    /// menu group without content of its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(default)]
    pub children: Vec<NavNode>,
}

impl NavNode {
    pub fn view(path: &str, title: &str, view: &str) -> Self {
        Self {
            path: path.to_string(),
            title: title.to_string(),
            icon: None,
            permissions: Vec::new(),
            hidden: false,
            view: Some(view.to_string()),
            children: Vec::new(),
        }
    }

    pub fn group(path: &str, title: &str) -> Self {
        Self {
            path: path.to_string(),
            title: title.to_string(),
            icon: None,
            permissions: Vec::new(),
            hidden: false,
            view: None,
            children: Vec::new(),
        }
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn permissions<S: Into<String>>(mut self, codes: impl IntoIterator<Item = S>) -> Self {
        self.permissions = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn children(mut self, children: Vec<NavNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether this node covers `path`: an exact match or a sub-path of it.
    pub fn covers(&self, path: &str) -> bool {
        path == self.path || path.strip_prefix(&self.path).is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Depth-first, order-preserving filter. A node is retained iff the ANY-of
/// predicate accepts its own requirement; children are filtered recursively
/// and inherit nothing from their parent. Parents left with zero children are
/// retained — dropping childless groups is a separate, explicit policy
/// ([`prune_childless_groups`]).
pub fn filter_nav(nodes: &[NavNode], granted: &PermissionSet) -> Vec<NavNode> {
    nodes
        .iter()
        .filter(|node| granted.has_any(&node.permissions))
        .map(|node| {
            let mut kept = node.clone();
            kept.children = filter_nav(&node.children, granted);
            kept
        })
        .collect()
}

/// Menu policy: a group without a view of its own and with no surviving
/// children renders as nothing, so it is dropped here rather than in
/// [`filter_nav`].
pub fn prune_childless_groups(nodes: Vec<NavNode>) -> Vec<NavNode> {
    nodes
        .into_iter()
        .filter_map(|mut node| {
            node.children = prune_childless_groups(node.children);
            if node.view.is_none() && node.children.is_empty() {
                None
            } else {
                Some(node)
            }
        })
        .collect()
}

/// The sidebar view of a permitted tree: hidden nodes removed, then
/// childless groups pruned.
pub fn menu_view(nodes: &[NavNode]) -> Vec<NavNode> {
    fn strip_hidden(nodes: &[NavNode]) -> Vec<NavNode> {
        nodes
            .iter()
            .filter(|node| !node.hidden)
            .map(|node| {
                let mut kept = node.clone();
                kept.children = strip_hidden(&node.children);
                kept
            })
            .collect()
    }
    prune_childless_groups(strip_hidden(nodes))
}

/// Whether any node in the tree covers `path` (exact match or sub-path).
pub fn covers_path(nodes: &[NavNode], path: &str) -> bool {
    nodes
        .iter()
        .any(|node| node.covers(path) || covers_path(&node.children, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::WILDCARD;

    fn sample_tree() -> Vec<NavNode> {
        vec![
            NavNode::view("/dashboard", "Dashboard", "dashboard")
                .permissions(["dashboard:view"]),
            NavNode::group("/operations", "Operations")
                .permissions(["order:view", "expense:view"])
                .children(vec![
                    NavNode::view("/orders", "Orders", "orders").permissions(["order:view"]),
                    NavNode::view("/expenses", "Expenses", "expenses")
                        .permissions(["expense:view"]),
                ]),
            NavNode::view("/help", "Help", "help"),
            NavNode::view("/orders/archive", "Archive", "orders-archive")
                .permissions(["order:view"])
                .hidden(),
        ]
    }

    fn perms(codes: &[&str]) -> PermissionSet {
        PermissionSet::new(codes.iter().copied())
    }

    fn paths(nodes: &[NavNode]) -> Vec<String> {
        nodes.iter().map(|n| n.path.clone()).collect()
    }

    #[test]
    fn preserves_sibling_order() {
        let filtered = filter_nav(&sample_tree(), &perms(&[WILDCARD]));
        assert_eq!(
            paths(&filtered),
            ["/dashboard", "/operations", "/help", "/orders/archive"]
        );
        assert_eq!(paths(&filtered[1].children), ["/orders", "/expenses"]);
    }

    #[test]
    fn wildcard_is_identity() {
        let tree = sample_tree();
        assert_eq!(filter_nav(&tree, &perms(&[WILDCARD])), tree);
    }

    #[test]
    fn idempotent() {
        let tree = sample_tree();
        let granted = perms(&["order:view"]);
        let once = filter_nav(&tree, &granted);
        let twice = filter_nav(&once, &granted);
        assert_eq!(once, twice);
    }

    #[test]
    fn unrestricted_nodes_always_survive() {
        let filtered = filter_nav(&sample_tree(), &perms(&[]));
        assert_eq!(paths(&filtered), ["/help"]);
    }

    #[test]
    fn children_evaluated_independently_of_parent() {
        // order:view admits the group and the orders child, not expenses.
        let filtered = filter_nav(&sample_tree(), &perms(&["order:view"]));
        let group = filtered.iter().find(|n| n.path == "/operations").unwrap();
        assert_eq!(paths(&group.children), ["/orders"]);
    }

    #[test]
    fn monotone_under_grant_growth() {
        let tree = sample_tree();
        let small = filter_nav(&tree, &perms(&["order:view"]));
        let large = filter_nav(&tree, &perms(&["order:view", "expense:view"]));
        fn flat(nodes: &[NavNode], out: &mut Vec<String>) {
            for n in nodes {
                out.push(n.path.clone());
                flat(&n.children, out);
            }
        }
        let mut small_paths = Vec::new();
        let mut large_paths = Vec::new();
        flat(&small, &mut small_paths);
        flat(&large, &mut large_paths);
        for p in small_paths {
            assert!(large_paths.contains(&p));
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let tree = sample_tree();
        let before = tree.clone();
        let _ = filter_nav(&tree, &perms(&["expense:view"]));
        assert_eq!(tree, before);
    }

    #[test]
    fn filter_keeps_emptied_groups_until_pruned() {
        // Group requirement passes (ANY includes expense:view) but both
        // children fail under a disjoint grant: the group survives the
        // filter and is only dropped by the explicit menu policy.
        let tree = vec![NavNode::group("/operations", "Operations")
            .permissions(["order:view", "expense:view"])
            .children(vec![NavNode::view("/orders", "Orders", "orders")
                .permissions(["order:view"])])];
        let granted = perms(&["expense:view"]);
        let filtered = filter_nav(&tree, &granted);
        assert_eq!(paths(&filtered), ["/operations"]);
        assert!(filtered[0].children.is_empty());
        assert!(prune_childless_groups(filtered).is_empty());
    }

    #[test]
    fn menu_view_hides_hidden_nodes() {
        let menu = menu_view(&filter_nav(&sample_tree(), &perms(&[WILDCARD])));
        assert!(!menu.iter().any(|n| n.path == "/orders/archive"));
    }

    #[test]
    fn covers_path_matches_sub_paths() {
        let tree = sample_tree();
        assert!(covers_path(&tree, "/orders"));
        assert!(covers_path(&tree, "/orders/42"));
        assert!(covers_path(&tree, "/expenses/export"));
        assert!(!covers_path(&tree, "/budget"));
        assert!(!covers_path(&tree, "/ordersx"));
    }
}
