use frontend_core::error::ApiError;
use serde::{Deserialize, Serialize};

use crate::services::api_client::ApiClient;

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonQuery {
    pub start_date: String,
    pub end_date: String,
    /// `yoy`, `mom` or `custom`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendComparisonQuery {
    #[serde(flatten)]
    pub base: ComparisonQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricComparison {
    pub metric_name: String,
    pub metric_label: String,
    pub current_value: f64,
    pub previous_value: f64,
    pub difference: f64,
    /// `None` when the previous period had no data to grow from.
    pub growth_rate: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PeriodComparison {
    pub current_period: String,
    pub previous_period: String,
    pub metrics: Vec<MetricComparison>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendComparisonItem {
    pub date_label: String,
    pub current_value: f64,
    pub previous_value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendComparison {
    pub current_period: String,
    pub previous_period: String,
    pub metric_name: String,
    pub metric_label: String,
    pub data: Vec<TrendComparisonItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreComparisonItem {
    pub store_id: i64,
    pub store_name: String,
    pub current_revenue: f64,
    pub previous_revenue: f64,
    pub revenue_growth_rate: Option<f64>,
    pub current_profit: f64,
    pub previous_profit: f64,
    pub profit_growth_rate: Option<f64>,
    pub current_order_count: i64,
    pub previous_order_count: i64,
    pub order_growth_rate: Option<f64>,
    pub current_avg_order_value: f64,
    pub previous_avg_order_value: f64,
    pub avg_order_value_growth_rate: Option<f64>,
}

pub async fn period(
    api: &ApiClient,
    token: &str,
    query: &ComparisonQuery,
) -> Result<PeriodComparison, ApiError> {
    api.get("/comparison/period", Some(token), Some(query)).await
}

pub async fn trend(
    api: &ApiClient,
    token: &str,
    query: &TrendComparisonQuery,
) -> Result<TrendComparison, ApiError> {
    api.get("/comparison/trend", Some(token), Some(query)).await
}

pub async fn stores(
    api: &ApiClient,
    token: &str,
    query: &ComparisonQuery,
) -> Result<Vec<StoreComparisonItem>, ApiError> {
    api.get("/comparison/stores", Some(token), Some(query)).await
}
