use frontend_core::envelope::Page;
use frontend_core::error::ApiError;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::api_client::{ApiClient, RawDownload};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseType {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `fixed` or `variable`; drives the CVP cost split.
    #[serde(default)]
    pub cost_behavior: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub store_id: i64,
    pub store_name: String,
    pub expense_type_id: i64,
    pub expense_type_name: String,
    pub expense_type_code: String,
    pub amount: f64,
    pub expense_date: String,
    #[serde(default)]
    pub remark: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExpenseRecordQuery {
    pub page: i64,
    pub page_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize, Validate)]
pub struct ExpenseRecordCreate {
    #[validate(range(min = 1, message = "store is required"))]
    pub store_id: i64,
    #[validate(range(min = 1, message = "expense type is required"))]
    pub expense_type_id: i64,
    #[validate(range(min = 0.01, message = "amount must be positive"))]
    pub amount: f64,
    pub expense_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

pub async fn types_all(api: &ApiClient, token: &str) -> Result<Vec<ExpenseType>, ApiError> {
    api.get("/expense-types/all", Some(token), None::<&()>).await
}

pub async fn list(
    api: &ApiClient,
    token: &str,
    query: &ExpenseRecordQuery,
) -> Result<Page<ExpenseRecord>, ApiError> {
    api.get("/expense-records", Some(token), Some(query)).await
}

pub async fn detail(api: &ApiClient, token: &str, id: i64) -> Result<ExpenseRecord, ApiError> {
    api.get(&format!("/expense-records/{id}"), Some(token), None::<&()>)
        .await
}

pub async fn create(
    api: &ApiClient,
    token: &str,
    record: &ExpenseRecordCreate,
) -> Result<ExpenseRecord, ApiError> {
    record.validate()?;
    api.post("/expense-records", Some(token), record).await
}

pub async fn export(
    api: &ApiClient,
    token: &str,
    query: &ExpenseRecordQuery,
) -> Result<RawDownload, ApiError> {
    api.get_raw("/expense-records/export", Some(token), Some(query))
        .await
}
