use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::audit::{self as audit_api, AuditLog, AuditLogPage, AuditLogQuery};
use crate::handlers::{fail, opt_i64, opt_str, ScreenContext};
use crate::models::context::{CurrentSession, PermittedNav};
use crate::AppState;

#[derive(Template)]
#[template(path = "audit_logs.html")]
pub struct AuditLogsTemplate {
    pub ctx: ScreenContext,
    pub page: AuditLogPage,
    pub filters: AuditLogQuery,
}

#[derive(Template)]
#[template(path = "audit_log_detail.html")]
pub struct AuditLogDetailTemplate {
    pub ctx: ScreenContext,
    pub log: AuditLog,
}

#[derive(Debug, Deserialize)]
pub struct AuditParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub username: Option<String>,
    pub action: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub async fn audit_logs_page(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Query(params): Query<AuditParams>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/audit-logs");

    let filters = AuditLogQuery {
        page: opt_i64(&params.page).unwrap_or(1),
        page_size: opt_i64(&params.page_size).unwrap_or(20),
        username: opt_str(params.username),
        action: opt_str(params.action),
        resource_type: None,
        status: opt_str(params.status),
        start_date: opt_str(params.start_date),
        end_date: opt_str(params.end_date),
    };

    match audit_api::list(&state.api, &current.0.token, &filters).await {
        Ok(page) => AuditLogsTemplate { ctx, page, filters }.into_response(),
        Err(err) => fail(&state, &session, snapshot, ctx, err).await,
    }
}

pub async fn audit_log_detail(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Path(id): Path<i64>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/audit-logs");

    match audit_api::detail(&state.api, &current.0.token, id).await {
        Ok(log) => AuditLogDetailTemplate { ctx, log }.into_response(),
        Err(err) => fail(&state, &session, snapshot, ctx, err).await,
    }
}
