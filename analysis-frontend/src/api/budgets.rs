use frontend_core::error::ApiError;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::api_client::ApiClient;

#[derive(Debug, Clone, Serialize)]
pub struct BudgetItemInput {
    pub expense_type_id: i64,
    pub amount: f64,
}

#[derive(Debug, Serialize, Validate)]
pub struct BudgetBatchCreate {
    #[validate(range(min = 1, message = "store is required"))]
    pub store_id: i64,
    #[validate(range(min = 2000, max = 2100, message = "year out of range"))]
    pub year: i32,
    #[validate(range(min = 1, max = 12, message = "month out of range"))]
    pub month: u32,
    #[validate(length(min = 1, message = "at least one budget line is required"))]
    pub items: Vec<BudgetItemInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetQuery {
    pub store_id: i64,
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BudgetAnalysisItem {
    pub expense_type_id: i64,
    pub expense_type_name: String,
    pub budget_amount: f64,
    pub actual_amount: f64,
    /// actual - budget
    pub variance: f64,
    pub variance_rate: f64,
    pub is_over_budget: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BudgetAnalysis {
    pub total_budget: f64,
    pub total_actual: f64,
    pub total_variance: f64,
    pub items: Vec<BudgetAnalysisItem>,
}

pub async fn batch_save(
    api: &ApiClient,
    token: &str,
    batch: &BudgetBatchCreate,
) -> Result<(), ApiError> {
    batch.validate()?;
    api.post_ack("/budgets/batch", Some(token), batch).await
}

pub async fn analysis(
    api: &ApiClient,
    token: &str,
    query: &BudgetQuery,
) -> Result<BudgetAnalysis, ApiError> {
    api.get("/budgets/analysis", Some(token), Some(query)).await
}
