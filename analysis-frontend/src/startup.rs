use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use frontend_core::middleware::tracing::request_id_middleware;
use time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::handlers::{
    app::{fallback, forbidden_page, health_check, index, not_found_page},
    audit::{audit_log_detail, audit_logs_page},
    auth::{login_handler, login_page, logout_handler},
    budgets::{budget_page, save_budgets},
    comparison::comparison_page,
    cvp::{config_page, cvp_page, simulate, update_config},
    dashboard::dashboard_page,
    expenses::{create_expense, expenses_page, export_expenses},
    kpi::kpi_page,
    orders::{create_order, export_orders, order_detail, orders_page},
    reports::{export_report, reports_page},
};
use crate::middleware::auth::navigation_guard;
use crate::middleware::metrics::metrics_middleware;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    // Sessions survive page reloads; state is replaced wholesale on login
    // and cleared on logout or expiry.
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // behind TLS termination in production
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(crate::handlers::metrics::metrics))
        .route("/login", get(login_page).post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/403", get(forbidden_page))
        .route("/404", get(not_found_page))
        .route("/dashboard", get(dashboard_page))
        .route("/orders", get(orders_page).post(create_order))
        .route("/orders/export", get(export_orders))
        .route("/orders/:id", get(order_detail))
        .route("/expenses", get(expenses_page).post(create_expense))
        .route("/expenses/export", get(export_expenses))
        .route("/budget", get(budget_page).post(save_budgets))
        .route("/kpi", get(kpi_page))
        .route("/comparison", get(comparison_page))
        .route("/cvp", get(cvp_page))
        .route("/cvp/simulate", post(simulate))
        .route("/cvp/config", get(config_page).post(update_config))
        .route("/reports", get(reports_page))
        .route("/reports/export", get(export_report))
        .route("/audit-logs", get(audit_logs_page))
        .route("/audit-logs/:id", get(audit_log_detail))
        .nest_service("/static", ServeDir::new("analysis-frontend/static"))
        .fallback(fallback)
        // The guard runs inside the session layer: every navigation resolves
        // to exactly one outcome before a handler sees it.
        .layer(from_fn_with_state(state.clone(), navigation_guard))
        .layer(session_layer)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
