use askama::Template;
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use frontend_core::envelope::Page;
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::expenses::{
    self as expenses_api, ExpenseRecord, ExpenseRecordCreate, ExpenseRecordQuery, ExpenseType,
};
use crate::api::stores::StoreInfo;
use crate::handlers::{fail, opt_i64, opt_str, store_options, ScreenContext};
use crate::models::context::{CurrentSession, PermittedNav};
use crate::AppState;

#[derive(Template)]
#[template(path = "expenses.html")]
pub struct ExpensesTemplate {
    pub ctx: ScreenContext,
    pub page: Page<ExpenseRecord>,
    pub expense_types: Vec<ExpenseType>,
    pub stores: Vec<StoreInfo>,
    pub filters: ExpenseRecordQuery,
}

#[derive(Debug, Deserialize)]
pub struct ExpensesParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub store_id: Option<String>,
    pub expense_type_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub notice: Option<String>,
}

impl ExpensesParams {
    fn into_query(self) -> ExpenseRecordQuery {
        ExpenseRecordQuery {
            page: opt_i64(&self.page).unwrap_or(1),
            page_size: opt_i64(&self.page_size).unwrap_or(10),
            store_id: opt_i64(&self.store_id),
            expense_type_id: opt_i64(&self.expense_type_id),
            start_date: opt_str(self.start_date),
            end_date: opt_str(self.end_date),
        }
    }
}

pub async fn expenses_page(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Query(params): Query<ExpensesParams>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let notice = params.notice.as_deref().map(|code| match code {
        "created" => "Expense record created.".to_string(),
        _ => code.to_string(),
    });
    let ctx = ScreenContext::new(&current, &nav, "/expenses").with_notice(notice);
    let token = current.0.token.clone();
    let filters = params.into_query();

    let page = match expenses_api::list(&state.api, &token, &filters).await {
        Ok(page) => page,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    let expense_types = match expenses_api::types_all(&state.api, &token).await {
        Ok(types) => types,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    let stores = match store_options(&state, &current.0).await {
        Ok(stores) => stores,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    ExpensesTemplate {
        ctx,
        page,
        expense_types,
        stores,
        filters,
    }
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct ExpenseCreateForm {
    pub store_id: Option<String>,
    pub expense_type_id: Option<String>,
    pub amount: Option<String>,
    pub expense_date: String,
    pub remark: Option<String>,
}

pub async fn create_expense(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Form(form): Form<ExpenseCreateForm>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/expenses");

    let record = ExpenseRecordCreate {
        store_id: opt_i64(&form.store_id).unwrap_or(0),
        expense_type_id: opt_i64(&form.expense_type_id).unwrap_or(0),
        amount: form
            .amount
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0.0),
        expense_date: form.expense_date,
        remark: opt_str(form.remark),
    };

    match expenses_api::create(&state.api, &current.0.token, &record).await {
        Ok(_) => Redirect::to("/expenses?notice=created").into_response(),
        Err(err) => fail(&state, &session, snapshot, ctx, err).await,
    }
}

pub async fn export_expenses(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Query(params): Query<ExpensesParams>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/expenses");
    let filters = params.into_query();

    match expenses_api::export(&state.api, &current.0.token, &filters).await {
        Ok(download) => (
            [
                (header::CONTENT_TYPE, download.content_type),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"expense-records.csv\"".to_string(),
                ),
            ],
            download.bytes,
        )
            .into_response(),
        Err(err) => fail(&state, &session, snapshot, ctx, err).await,
    }
}
