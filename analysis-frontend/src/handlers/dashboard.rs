use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::dashboard::{self as dashboard_api, DashboardOverview, DashboardQuery};
use crate::api::stores::StoreInfo;
use crate::handlers::{default_range, fail, opt_i64, opt_str, store_options, ScreenContext};
use crate::models::context::{CurrentSession, PermittedNav};
use crate::AppState;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: ScreenContext,
    pub overview: DashboardOverview,
    pub stores: Vec<StoreInfo>,
    pub start_date: String,
    pub end_date: String,
    pub store_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub store_id: Option<String>,
}

pub async fn dashboard_page(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Query(params): Query<DashboardParams>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/dashboard");
    let token = current.0.token.clone();

    let (default_start, default_end) = default_range();
    let start_date = opt_str(params.start_date).unwrap_or(default_start);
    let end_date = opt_str(params.end_date).unwrap_or(default_end);
    let store_id = opt_i64(&params.store_id);

    let query = DashboardQuery {
        start_date: start_date.clone(),
        end_date: end_date.clone(),
        store_id,
    };

    let overview = match dashboard_api::overview(&state.api, &token, &query).await {
        Ok(overview) => overview,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    let stores = match store_options(&state, &current.0).await {
        Ok(stores) => stores,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    DashboardTemplate {
        ctx,
        overview,
        stores,
        start_date,
        end_date,
        store_id,
    }
    .into_response()
}
