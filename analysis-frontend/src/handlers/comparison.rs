use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::comparison::{
    self as comparison_api, ComparisonQuery, PeriodComparison, StoreComparisonItem,
    TrendComparison, TrendComparisonQuery,
};
use crate::api::stores::StoreInfo;
use crate::handlers::{default_range, fail, opt_i64, opt_str, store_options, ScreenContext};
use crate::models::context::{CurrentSession, PermittedNav};
use crate::AppState;

#[derive(Template)]
#[template(path = "comparison.html")]
pub struct ComparisonTemplate {
    pub ctx: ScreenContext,
    pub period: PeriodComparison,
    pub trend: TrendComparison,
    pub store_rows: Vec<StoreComparisonItem>,
    pub stores: Vec<StoreInfo>,
    pub start_date: String,
    pub end_date: String,
    pub compare_type: String,
    pub store_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ComparisonParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub compare_type: Option<String>,
    pub compare_start_date: Option<String>,
    pub compare_end_date: Option<String>,
    pub store_id: Option<String>,
    pub metric: Option<String>,
}

pub async fn comparison_page(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Query(params): Query<ComparisonParams>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/comparison");
    let token = current.0.token.clone();

    let (default_start, default_end) = default_range();
    let compare_type = opt_str(params.compare_type).unwrap_or_else(|| "yoy".to_string());
    let base = ComparisonQuery {
        start_date: opt_str(params.start_date).unwrap_or(default_start),
        end_date: opt_str(params.end_date).unwrap_or(default_end),
        compare_type: Some(compare_type.clone()),
        compare_start_date: opt_str(params.compare_start_date),
        compare_end_date: opt_str(params.compare_end_date),
        store_id: opt_i64(&params.store_id),
    };

    let period = match comparison_api::period(&state.api, &token, &base).await {
        Ok(period) => period,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    let trend_query = TrendComparisonQuery {
        base: base.clone(),
        metric: opt_str(params.metric),
    };
    let trend = match comparison_api::trend(&state.api, &token, &trend_query).await {
        Ok(trend) => trend,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    let store_rows = match comparison_api::stores(&state.api, &token, &base).await {
        Ok(rows) => rows,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    let stores = match store_options(&state, &current.0).await {
        Ok(stores) => stores,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    ComparisonTemplate {
        ctx,
        period,
        trend,
        store_rows,
        stores,
        start_date: base.start_date,
        end_date: base.end_date,
        compare_type,
        store_id: base.store_id,
    }
    .into_response()
}
