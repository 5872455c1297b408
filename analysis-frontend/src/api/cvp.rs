use frontend_core::error::ApiError;
use serde::{Deserialize, Serialize};

use crate::services::api_client::ApiClient;

#[derive(Debug, Clone, Serialize)]
pub struct CvpQuery {
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CvpAnalysis {
    pub total_revenue: f64,
    pub variable_cost: f64,
    pub fixed_cost: f64,
    pub contribution_margin: f64,
    pub contribution_margin_rate: f64,
    pub break_even_point: f64,
    pub break_even_sales_ratio: f64,
    pub safety_margin: f64,
    pub safety_margin_rate: f64,
    pub operating_leverage: f64,
    pub operating_profit: f64,
}

/// Reclassify one expense type as a fixed or variable cost.
#[derive(Debug, Clone, Serialize)]
pub struct CostBehaviorUpdate {
    pub expense_type_id: i64,
    pub cost_behavior: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CvpSimulation {
    pub fixed_cost_change_rate: f64,
    pub variable_cost_change_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CvpSimulationResult {
    pub original_bep: f64,
    pub simulated_bep: f64,
    pub bep_change: f64,
    pub bep_change_rate: f64,
}

pub async fn analysis(api: &ApiClient, token: &str, query: &CvpQuery) -> Result<CvpAnalysis, ApiError> {
    api.get("/cvp/analysis", Some(token), Some(query)).await
}

pub async fn update_cost_behavior(
    api: &ApiClient,
    token: &str,
    update: &CostBehaviorUpdate,
) -> Result<(), ApiError> {
    api.put_ack("/cvp/config", Some(token), update).await
}

pub async fn simulate(
    api: &ApiClient,
    token: &str,
    query: &CvpQuery,
    simulation: &CvpSimulation,
) -> Result<CvpSimulationResult, ApiError> {
    api.post_with_query("/cvp/simulate", Some(token), query, simulation)
        .await
}
