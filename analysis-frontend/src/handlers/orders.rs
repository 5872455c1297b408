use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use frontend_core::envelope::Page;
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::orders::{self as orders_api, OrderCreate, OrderInfo, OrderQuery};
use crate::api::stores::StoreInfo;
use crate::handlers::{fail, opt_i64, opt_str, store_options, ScreenContext};
use crate::models::context::{CurrentSession, PermittedNav};
use crate::AppState;

#[derive(Template)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub ctx: ScreenContext,
    pub page: Page<OrderInfo>,
    pub stores: Vec<StoreInfo>,
    pub filters: OrderQuery,
}

#[derive(Template)]
#[template(path = "order_detail.html")]
pub struct OrderDetailTemplate {
    pub ctx: ScreenContext,
    pub order: OrderInfo,
}

#[derive(Debug, Deserialize)]
pub struct OrdersParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub store_id: Option<String>,
    pub channel: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub order_no: Option<String>,
    pub notice: Option<String>,
}

impl OrdersParams {
    fn into_query(self) -> OrderQuery {
        OrderQuery {
            page: opt_i64(&self.page).unwrap_or(1),
            page_size: opt_i64(&self.page_size).unwrap_or(10),
            store_id: opt_i64(&self.store_id),
            channel: opt_str(self.channel),
            start_date: opt_str(self.start_date),
            end_date: opt_str(self.end_date),
            order_no: opt_str(self.order_no),
        }
    }
}

pub async fn orders_page(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Query(params): Query<OrdersParams>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let notice = params.notice.as_deref().map(|code| match code {
        "created" => "Order created.".to_string(),
        _ => code.to_string(),
    });
    let ctx = ScreenContext::new(&current, &nav, "/orders").with_notice(notice);
    let token = current.0.token.clone();
    let filters = params.into_query();

    let page = match orders_api::list(&state.api, &token, &filters).await {
        Ok(page) => page,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    let stores = match store_options(&state, &current.0).await {
        Ok(stores) => stores,
        Err(err) => return fail(&state, &session, snapshot, ctx, err).await,
    };

    OrdersTemplate {
        ctx,
        page,
        stores,
        filters,
    }
    .into_response()
}

pub async fn order_detail(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Path(id): Path<i64>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/orders");

    match orders_api::detail(&state.api, &current.0.token, id).await {
        Ok(order) => OrderDetailTemplate { ctx, order }.into_response(),
        Err(err) => fail(&state, &session, snapshot, ctx, err).await,
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderCreateForm {
    pub store_id: Option<String>,
    pub order_no: String,
    pub amount: Option<String>,
    pub channel: String,
    pub order_time: String,
    pub remark: Option<String>,
}

pub async fn create_order(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Form(form): Form<OrderCreateForm>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/orders");

    let order = OrderCreate {
        store_id: opt_i64(&form.store_id).unwrap_or(0),
        order_no: form.order_no,
        amount: form
            .amount
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0.0),
        channel: form.channel,
        order_time: form.order_time,
        remark: opt_str(form.remark),
    };

    match orders_api::create(&state.api, &current.0.token, &order).await {
        Ok(_) => Redirect::to("/orders?notice=created").into_response(),
        Err(err) => fail(&state, &session, snapshot, ctx, err).await,
    }
}

pub async fn export_orders(
    State(state): State<AppState>,
    session: Session,
    current: CurrentSession,
    nav: PermittedNav,
    Query(params): Query<OrdersParams>,
) -> Response {
    let snapshot = state.expiry_guard.snapshot();
    let ctx = ScreenContext::new(&current, &nav, "/orders");
    let filters = params.into_query();

    match orders_api::export(&state.api, &current.0.token, &filters).await {
        Ok(download) => (
            [
                (header::CONTENT_TYPE, download.content_type),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"orders.csv\"".to_string(),
                ),
            ],
            download.bytes,
        )
            .into_response(),
        Err(err) => fail(&state, &session, snapshot, ctx, err).await,
    }
}
