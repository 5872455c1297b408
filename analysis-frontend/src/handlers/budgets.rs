use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::budgets::{self as budgets_api, BudgetAnalysis, BudgetBatchCreate, BudgetItemInput, BudgetQuery};
use crate::api::expenses::{self as expenses_api, ExpenseType};
use crate::api::stores::StoreInfo;
use crate::handlers::{fail, opt_i64, store_options, ScreenContext};
use crate::models::context::{CurrentSession, PermittedNav};
use crate::AppState;

#[derive(Template)]
#[template(path = "budget.html")]
pub struct BudgetTemplate {
    pub ctx: ScreenContext,
    pub analysis: Option<BudgetAnalysis>,
    pub expense_types: Vec<ExpenseType>,
    pub stores: Vec<StoreInfo>,
    pub store_id: Option<i64>,
    pub year: i32,
    pub month: u32,
    /// Whether the entry form is offered (requires every manage code).
    pub can_manage: bool,
}

#[derive(Debug, Deserialize)]
pub struct BudgetParams {
    pub store_id: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub notice: Option<String>,
}

pub async fn budget_page(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Query(params): Query<BudgetParams>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let notice = params.notice.as_deref().map(|code| match code {
        "saved" => "Budgets saved.".to_string(),
        _ => code.to_string(),
    });
    let ctx = ScreenContext::new(&current, &nav, "/budget").with_notice(notice);
    let token = current.0.token.clone();

    let today = chrono::Local::now().date_naive();
    let year = opt_i64(&params.year)
        .map(|y| y as i32)
        .unwrap_or_else(|| chrono::Datelike::year(&today));
    let month = opt_i64(&params.month)
        .map(|m| m as u32)
        .unwrap_or_else(|| chrono::Datelike::month(&today));
    let store_id = opt_i64(&params.store_id);

    let expense_types = match expenses_api::types_all(&state.api, &token).await {
        Ok(types) => types,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    let stores = match store_options(&state, &current.0).await {
        Ok(stores) => stores,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    // The variance analysis needs a concrete store; without one the screen
    // only offers the selection form.
    let analysis = match store_id {
        Some(store_id) => {
            let query = BudgetQuery {
                store_id,
                year,
                month,
            };
            match budgets_api::analysis(&state.api, &token, &query).await {
                Ok(analysis) => Some(analysis),
                Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
            }
        }
        None => None,
    };

    let can_manage = current
        .0
        .permission_set()
        .has_all(&[crate::nav_config::codes::BUDGET_MANAGE]);

    BudgetTemplate {
        ctx,
        analysis,
        expense_types,
        stores,
        store_id,
        year,
        month,
        can_manage,
    }
    .into_response()
}

/// The batch form posts one `amount_<expense_type_id>` field per line; blank
/// lines are skipped.
pub async fn save_budgets(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/budget");

    let mut store_id = None;
    let mut year = None;
    let mut month = None;
    let mut items = Vec::new();

    for (key, value) in &fields {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "store_id" => store_id = value.parse::<i64>().ok(),
            "year" => year = value.parse::<i32>().ok(),
            "month" => month = value.parse::<u32>().ok(),
            other => {
                if let Some(raw_id) = other.strip_prefix("amount_") {
                    if let (Ok(expense_type_id), Ok(amount)) =
                        (raw_id.parse::<i64>(), value.parse::<f64>())
                    {
                        items.push(BudgetItemInput {
                            expense_type_id,
                            amount,
                        });
                    }
                }
            }
        }
    }

    let batch = BudgetBatchCreate {
        store_id: store_id.unwrap_or(0),
        year: year.unwrap_or(0),
        month: month.unwrap_or(0),
        items,
    };

    match budgets_api::batch_save(&state.api, &current.0.token, &batch).await {
        Ok(()) => Redirect::to(&format!(
            "/budget?notice=saved&store_id={}&year={}&month={}",
            batch.store_id, batch.year, batch.month
        ))
        .into_response(),
        Err(err) => fail(&state, &session, snapshot, ctx, err).await,
    }
}
