use askama::Template;
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::reports::{
    self as reports_api, DailySummaryRow, ExpenseBreakdownRow, MonthlySummaryRow, ReportQuery,
    StorePerformanceRow,
};
use crate::api::stores::StoreInfo;
use crate::handlers::{default_range, fail, opt_i64, opt_str, store_options, ScreenContext};
use crate::models::context::{CurrentSession, PermittedNav};
use crate::AppState;

/// Which of the four report tables is being shown.
pub enum ReportRows {
    Daily(Vec<DailySummaryRow>),
    Monthly(Vec<MonthlySummaryRow>),
    StorePerformance(Vec<StorePerformanceRow>),
    ExpenseBreakdown(Vec<ExpenseBreakdownRow>),
}

#[derive(Template)]
#[template(path = "reports.html")]
pub struct ReportsTemplate {
    pub ctx: ScreenContext,
    pub rows: ReportRows,
    pub report: String,
    pub stores: Vec<StoreInfo>,
    pub start_date: String,
    pub end_date: String,
    pub store_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReportsParams {
    pub report: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub store_id: Option<String>,
    pub top_n: Option<String>,
}

impl ReportsParams {
    fn into_parts(self) -> (String, ReportQuery) {
        let (default_start, default_end) = default_range();
        let report = opt_str(self.report).unwrap_or_else(|| "daily".to_string());
        let query = ReportQuery {
            start_date: opt_str(self.start_date).unwrap_or(default_start),
            end_date: opt_str(self.end_date).unwrap_or(default_end),
            store_id: opt_i64(&self.store_id),
            top_n: opt_i64(&self.top_n),
        };
        (report, query)
    }
}

pub async fn reports_page(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Query(params): Query<ReportsParams>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/reports");
    let token = current.0.token.clone();
    let (report, query) = params.into_parts();

    let rows = match report.as_str() {
        "monthly" => reports_api::monthly_summary(&state.api, &token, &query)
            .await
            .map(ReportRows::Monthly),
        "store" => reports_api::store_performance(&state.api, &token, &query)
            .await
            .map(ReportRows::StorePerformance),
        "expense" => reports_api::expense_breakdown(&state.api, &token, &query)
            .await
            .map(ReportRows::ExpenseBreakdown),
        _ => reports_api::daily_summary(&state.api, &token, &query)
            .await
            .map(ReportRows::Daily),
    };

    let rows = match rows {
        Ok(rows) => rows,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    let stores = match store_options(&state, &current.0).await {
        Ok(stores) => stores,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    ReportsTemplate {
        ctx,
        rows,
        report,
        stores,
        start_date: query.start_date,
        end_date: query.end_date,
        store_id: query.store_id,
    }
    .into_response()
}

pub async fn export_report(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Query(params): Query<ReportsParams>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/reports");
    let (_, query) = params.into_parts();

    match reports_api::export(&state.api, &current.0.token, &query).await {
        Ok(download) => (
            [
                (header::CONTENT_TYPE, download.content_type),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"report.xlsx\"".to_string(),
                ),
            ],
            download.bytes,
        )
            .into_response(),
        Err(err) => fail(&state, &session, snapshot, ctx, err).await,
    }
}
