use frontend_core::error::ApiError;
use serde::{Deserialize, Serialize};

use crate::services::api_client::ApiClient;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardQuery {
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryCard {
    pub label: String,
    pub value: f64,
    pub unit: String,
    pub yoy_growth: Option<f64>,
    pub mom_growth: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendDataPoint {
    pub date: String,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreRankItem {
    pub store_name: String,
    pub revenue: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseStructureItem {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelDistribution {
    pub dine_in: f64,
    pub takeout: f64,
    pub delivery: f64,
    pub online: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardOverview {
    pub summary_cards: Vec<SummaryCard>,
    pub revenue_trend: Vec<TrendDataPoint>,
    pub store_ranking: Vec<StoreRankItem>,
    pub expense_structure: Vec<ExpenseStructureItem>,
    pub channel_distribution: ChannelDistribution,
    pub profit_rate: f64,
    pub profit_rate_target: f64,
}

pub async fn overview(
    api: &ApiClient,
    token: &str,
    query: &DashboardQuery,
) -> Result<DashboardOverview, ApiError> {
    api.get("/dashboard/overview", Some(token), Some(query)).await
}
