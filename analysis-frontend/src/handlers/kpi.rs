use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::kpi::{
    self as kpi_api, ExpenseCategoryItem, KpiQuery, KpiSummary, KpiTrendItem, StoreRankingItem,
};
use crate::api::stores::StoreInfo;
use crate::handlers::{default_range, fail, opt_i64, opt_str, store_options, ScreenContext};
use crate::models::context::{CurrentSession, PermittedNav};
use crate::AppState;

#[derive(Template)]
#[template(path = "kpi.html")]
pub struct KpiTemplate {
    pub ctx: ScreenContext,
    pub summary: KpiSummary,
    pub trend: Vec<KpiTrendItem>,
    pub categories: Vec<ExpenseCategoryItem>,
    pub ranking: Vec<StoreRankingItem>,
    pub stores: Vec<StoreInfo>,
    pub filters: KpiQuery,
}

#[derive(Debug, Deserialize)]
pub struct KpiParams {
    pub store_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub granularity: Option<String>,
    pub top_n: Option<String>,
}

pub async fn kpi_page(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Query(params): Query<KpiParams>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/kpi");
    let token = current.0.token.clone();

    let (default_start, default_end) = default_range();
    let filters = KpiQuery {
        store_id: opt_i64(&params.store_id),
        start_date: Some(opt_str(params.start_date).unwrap_or(default_start)),
        end_date: Some(opt_str(params.end_date).unwrap_or(default_end)),
        granularity: opt_str(params.granularity),
        top_n: opt_i64(&params.top_n),
    };

    let summary = match kpi_api::summary(&state.api, &token, &filters).await {
        Ok(summary) => summary,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };
    let trend = match kpi_api::trend(&state.api, &token, &filters).await {
        Ok(trend) => trend,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };
    let categories = match kpi_api::expense_category(&state.api, &token, &filters).await {
        Ok(categories) => categories,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };
    let ranking = match kpi_api::store_ranking(&state.api, &token, &filters).await {
        Ok(ranking) => ranking,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };
    let stores = match store_options(&state, &current.0).await {
        Ok(stores) => stores,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    KpiTemplate {
        ctx,
        summary,
        trend,
        categories,
        ranking,
        stores,
        filters,
    }
    .into_response()
}
