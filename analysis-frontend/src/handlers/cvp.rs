use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::cvp::{
    self as cvp_api, CostBehaviorUpdate, CvpAnalysis, CvpQuery, CvpSimulation, CvpSimulationResult,
};
use crate::api::expenses::{self as expenses_api, ExpenseType};
use crate::api::stores::StoreInfo;
use crate::handlers::{default_range, fail, opt_i64, opt_str, store_options, ScreenContext};
use crate::models::context::{CurrentSession, PermittedNav};
use crate::AppState;

#[derive(Template)]
#[template(path = "cvp.html")]
pub struct CvpTemplate {
    pub ctx: ScreenContext,
    pub analysis: CvpAnalysis,
    pub simulation: Option<CvpSimulationResult>,
    pub stores: Vec<StoreInfo>,
    pub start_date: String,
    pub end_date: String,
    pub store_id: Option<i64>,
}

#[derive(Template)]
#[template(path = "cvp_config.html")]
pub struct CvpConfigTemplate {
    pub ctx: ScreenContext,
    pub expense_types: Vec<ExpenseType>,
}

#[derive(Debug, Deserialize)]
pub struct CvpParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub store_id: Option<String>,
}

impl CvpParams {
    fn into_query(self) -> CvpQuery {
        let (default_start, default_end) = default_range();
        CvpQuery {
            start_date: opt_str(self.start_date).unwrap_or(default_start),
            end_date: opt_str(self.end_date).unwrap_or(default_end),
            store_id: opt_i64(&self.store_id),
        }
    }
}

pub async fn cvp_page(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Query(params): Query<CvpParams>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/cvp");
    let token = current.0.token.clone();
    let query = params.into_query();

    let analysis = match cvp_api::analysis(&state.api, &token, &query).await {
        Ok(analysis) => analysis,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    let stores = match store_options(&state, &current.0).await {
        Ok(stores) => stores,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    CvpTemplate {
        ctx,
        analysis,
        simulation: None,
        stores,
        start_date: query.start_date,
        end_date: query.end_date,
        store_id: query.store_id,
    }
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct SimulateForm {
    pub start_date: String,
    pub end_date: String,
    pub store_id: Option<String>,
    pub fixed_cost_change_rate: Option<String>,
    pub variable_cost_change_rate: Option<String>,
}

/// Runs the what-if simulation and re-renders the analysis screen with the
/// simulated break-even figures alongside the baseline.
pub async fn simulate(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Form(form): Form<SimulateForm>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/cvp");
    let token = current.0.token.clone();

    let query = CvpQuery {
        start_date: form.start_date,
        end_date: form.end_date,
        store_id: opt_i64(&form.store_id),
    };
    let simulation = CvpSimulation {
        fixed_cost_change_rate: form
            .fixed_cost_change_rate
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0.0),
        variable_cost_change_rate: form
            .variable_cost_change_rate
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0.0),
    };

    let analysis = match cvp_api::analysis(&state.api, &token, &query).await {
        Ok(analysis) => analysis,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };
    let result = match cvp_api::simulate(&state.api, &token, &query, &simulation).await {
        Ok(result) => result,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };
    let stores = match store_options(&state, &current.0).await {
        Ok(stores) => stores,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    CvpTemplate {
        ctx,
        analysis,
        simulation: Some(result),
        stores,
        start_date: query.start_date,
        end_date: query.end_date,
        store_id: query.store_id,
    }
    .into_response()
}

pub async fn config_page(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/cvp/config");

    match expenses_api::types_all(&state.api, &current.0.token).await {
        Ok(expense_types) => CvpConfigTemplate { ctx, expense_types }.into_response(),
        Err(err) => fail(&state, &session, snapshot, ctx, err).await,
    }
}

#[derive(Debug, Deserialize)]
pub struct CostBehaviorForm {
    pub expense_type_id: Option<String>,
    pub cost_behavior: String,
}

pub async fn update_config(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Form(form): Form<CostBehaviorForm>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/cvp/config");

    let update = CostBehaviorUpdate {
        expense_type_id: opt_i64(&form.expense_type_id).unwrap_or(0),
        cost_behavior: form.cost_behavior,
    };

    match cvp_api::update_cost_behavior(&state.api, &current.0.token, &update).await {
        Ok(()) => Redirect::to("/cvp/config").into_response(),
        Err(err) => fail(&state, &session, snapshot, ctx, err).await,
    }
}
