//! The static navigation tree: single source of truth for menu rendering and
//! per-request authorization. Consumed, never mutated.

use frontend_core::nav::NavNode;

/// Permission codes granted by the backend's role model.
pub mod codes {
    pub const DASHBOARD_VIEW: &str = "dashboard:view";
    pub const ORDER_VIEW: &str = "order:view";
    pub const EXPENSE_VIEW: &str = "expense:view";
    pub const BUDGET_VIEW: &str = "budget:view";
    pub const BUDGET_MANAGE: &str = "budget:manage";
    pub const KPI_VIEW: &str = "kpi:view";
    pub const CVP_VIEW: &str = "cvp:view";
    pub const REPORT_VIEW: &str = "report:view";
    pub const AUDIT_VIEW: &str = "audit:view";
}

pub fn nav_tree() -> Vec<NavNode> {
    use codes::*;

    vec![
        NavNode::view("/dashboard", "Dashboard", "dashboard")
            .icon("chart")
            .permissions([DASHBOARD_VIEW]),
        NavNode::group("/operations", "Operations")
            .icon("folder")
            .permissions([ORDER_VIEW, EXPENSE_VIEW, BUDGET_VIEW, BUDGET_MANAGE])
            .children(vec![
                NavNode::view("/orders", "Orders", "orders")
                    .icon("document")
                    .permissions([ORDER_VIEW]),
                NavNode::view("/expenses", "Expenses", "expenses")
                    .icon("money")
                    .permissions([EXPENSE_VIEW]),
                NavNode::view("/budget", "Budget", "budget")
                    .icon("wallet")
                    .permissions([BUDGET_VIEW, BUDGET_MANAGE]),
            ]),
        NavNode::group("/analysis", "Analysis")
            .icon("trend")
            .permissions([KPI_VIEW, CVP_VIEW, REPORT_VIEW])
            .children(vec![
                NavNode::view("/kpi", "KPI Analysis", "kpi")
                    .icon("trend")
                    .permissions([KPI_VIEW]),
                NavNode::view("/comparison", "Period Comparison", "comparison")
                    .icon("trend")
                    .permissions([KPI_VIEW]),
                NavNode::view("/cvp", "CVP Analysis", "cvp")
                    .icon("trend")
                    .permissions([CVP_VIEW])
                    .children(vec![NavNode::view("/cvp/config", "Cost Behavior", "cvp-config")
                        .permissions([CVP_VIEW])
                        .hidden()]),
                NavNode::view("/reports", "Reports", "reports")
                    .icon("document")
                    .permissions([REPORT_VIEW]),
            ]),
        NavNode::group("/system", "System")
            .icon("setting")
            .permissions([AUDIT_VIEW])
            .children(vec![NavNode::view("/audit-logs", "Audit Logs", "audit-logs")
                .icon("list")
                .permissions([AUDIT_VIEW])]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontend_core::nav::{covers_path, filter_nav, menu_view};
    use frontend_core::permission::PermissionSet;

    #[test]
    fn tree_covers_every_screen_path() {
        let tree = nav_tree();
        for path in [
            "/dashboard",
            "/orders",
            "/orders/export",
            "/expenses",
            "/budget",
            "/kpi",
            "/comparison",
            "/cvp",
            "/cvp/config",
            "/reports",
            "/audit-logs",
            "/audit-logs/17",
        ] {
            assert!(covers_path(&tree, path), "uncovered path: {path}");
        }
        assert!(!covers_path(&tree, "/login"));
    }

    #[test]
    fn order_only_analyst_gets_a_trimmed_menu() {
        let granted = PermissionSet::new(["order:view"]);
        let menu = menu_view(&filter_nav(&nav_tree(), &granted));
        let titles: Vec<&str> = menu.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["Operations"]);
        assert_eq!(menu[0].children.len(), 1);
        assert_eq!(menu[0].children[0].path, "/orders");
    }
}
