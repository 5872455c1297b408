use frontend_core::error::ApiError;
use serde::{Deserialize, Serialize};

use crate::services::api_client::{ApiClient, RawDownload};

#[derive(Debug, Clone, Serialize)]
pub struct ReportQuery {
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_n: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailySummaryRow {
    pub biz_date: String,
    pub store_id: i64,
    pub store_name: String,
    pub revenue: f64,
    pub net_revenue: f64,
    pub cost_total: f64,
    pub expense_total: f64,
    pub order_count: i64,
    pub gross_profit: f64,
    pub operating_profit: f64,
    #[serde(default)]
    pub gross_profit_rate: Option<f64>,
    #[serde(default)]
    pub operating_profit_rate: Option<f64>,
    pub cost_material: f64,
    pub cost_labor: f64,
    pub discount_amount: f64,
    pub refund_amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthlySummaryRow {
    pub year: i32,
    pub month: u32,
    pub store_id: i64,
    pub store_name: String,
    pub revenue: f64,
    pub net_revenue: f64,
    pub cost_total: f64,
    pub expense_total: f64,
    pub order_count: i64,
    pub gross_profit: f64,
    pub operating_profit: f64,
    #[serde(default)]
    pub gross_profit_rate: Option<f64>,
    #[serde(default)]
    pub operating_profit_rate: Option<f64>,
    pub avg_daily_revenue: f64,
    pub avg_daily_order_count: f64,
    pub day_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorePerformanceRow {
    pub store_id: i64,
    pub store_name: String,
    pub revenue: f64,
    pub net_revenue: f64,
    pub order_count: i64,
    pub avg_order_amount: f64,
    pub gross_profit: f64,
    pub operating_profit: f64,
    #[serde(default)]
    pub gross_profit_rate: Option<f64>,
    #[serde(default)]
    pub operating_profit_rate: Option<f64>,
    pub revenue_rank: i64,
    pub profit_rank: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseBreakdownRow {
    pub expense_type_id: i64,
    pub type_code: String,
    pub type_name: String,
    pub category: String,
    pub total_amount: f64,
    pub record_count: i64,
    pub avg_amount: f64,
    pub percentage: f64,
}

pub async fn daily_summary(
    api: &ApiClient,
    token: &str,
    query: &ReportQuery,
) -> Result<Vec<DailySummaryRow>, ApiError> {
    api.get("/reports/daily-summary", Some(token), Some(query))
        .await
}

pub async fn monthly_summary(
    api: &ApiClient,
    token: &str,
    query: &ReportQuery,
) -> Result<Vec<MonthlySummaryRow>, ApiError> {
    api.get("/reports/monthly-summary", Some(token), Some(query))
        .await
}

pub async fn store_performance(
    api: &ApiClient,
    token: &str,
    query: &ReportQuery,
) -> Result<Vec<StorePerformanceRow>, ApiError> {
    api.get("/reports/store-performance", Some(token), Some(query))
        .await
}

pub async fn expense_breakdown(
    api: &ApiClient,
    token: &str,
    query: &ReportQuery,
) -> Result<Vec<ExpenseBreakdownRow>, ApiError> {
    api.get("/reports/expense-breakdown", Some(token), Some(query))
        .await
}

pub async fn export(
    api: &ApiClient,
    token: &str,
    query: &ReportQuery,
) -> Result<RawDownload, ApiError> {
    api.get_raw("/reports/export", Some(token), Some(query)).await
}
