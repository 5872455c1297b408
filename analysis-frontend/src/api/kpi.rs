use frontend_core::error::ApiError;
use serde::{Deserialize, Serialize};

use crate::services::api_client::ApiClient;

#[derive(Debug, Clone, Default, Serialize)]
pub struct KpiQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// `day`, `week` or `month`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_n: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KpiSummary {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub profit_rate: f64,
    pub order_count: i64,
    pub expense_count: i64,
    pub store_count: i64,
    pub date_range: DateRange,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KpiTrendItem {
    pub date: String,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    pub profit_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseCategoryItem {
    pub category: String,
    pub category_name: String,
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreRankingItem {
    pub store_id: i64,
    pub store_name: String,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub profit_rate: f64,
    pub rank: i64,
}

pub async fn summary(api: &ApiClient, token: &str, query: &KpiQuery) -> Result<KpiSummary, ApiError> {
    api.get("/kpi/summary", Some(token), Some(query)).await
}

pub async fn trend(
    api: &ApiClient,
    token: &str,
    query: &KpiQuery,
) -> Result<Vec<KpiTrendItem>, ApiError> {
    api.get("/kpi/trend", Some(token), Some(query)).await
}

pub async fn expense_category(
    api: &ApiClient,
    token: &str,
    query: &KpiQuery,
) -> Result<Vec<ExpenseCategoryItem>, ApiError> {
    api.get("/kpi/expense-category", Some(token), Some(query))
        .await
}

pub async fn store_ranking(
    api: &ApiClient,
    token: &str,
    query: &KpiQuery,
) -> Result<Vec<StoreRankingItem>, ApiError> {
    api.get("/kpi/store-ranking", Some(token), Some(query)).await
}
