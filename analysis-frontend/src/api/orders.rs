use frontend_core::envelope::Page;
use frontend_core::error::ApiError;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::api_client::{ApiClient, RawDownload};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderInfo {
    pub id: i64,
    pub store_id: i64,
    pub store_name: String,
    pub order_no: String,
    pub amount: f64,
    pub channel: String,
    pub order_time: String,
    #[serde(default)]
    pub remark: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderQuery {
    pub page: i64,
    pub page_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_no: Option<String>,
}

#[derive(Debug, Serialize, Validate)]
pub struct OrderCreate {
    #[validate(range(min = 1, message = "store is required"))]
    pub store_id: i64,
    #[validate(length(min = 1, message = "order no is required"))]
    pub order_no: String,
    #[validate(range(min = 0.01, message = "amount must be positive"))]
    pub amount: f64,
    #[validate(length(min = 1, message = "channel is required"))]
    pub channel: String,
    pub order_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

pub async fn list(
    api: &ApiClient,
    token: &str,
    query: &OrderQuery,
) -> Result<Page<OrderInfo>, ApiError> {
    api.get("/orders", Some(token), Some(query)).await
}

pub async fn detail(api: &ApiClient, token: &str, id: i64) -> Result<OrderInfo, ApiError> {
    api.get(&format!("/orders/{id}"), Some(token), None::<&()>)
        .await
}

pub async fn create(
    api: &ApiClient,
    token: &str,
    order: &OrderCreate,
) -> Result<OrderInfo, ApiError> {
    order.validate()?;
    api.post("/orders", Some(token), order).await
}

pub async fn export(
    api: &ApiClient,
    token: &str,
    query: &OrderQuery,
) -> Result<RawDownload, ApiError> {
    api.get_raw("/orders/export", Some(token), Some(query)).await
}
