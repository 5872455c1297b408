use frontend_core::error::ApiError;
use serde::{Deserialize, Serialize};

use crate::services::api_client::ApiClient;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditLogQuery {
    pub page: i64,
    pub page_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditLog {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub username: String,
    pub action: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub resource_id: Option<i64>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    pub created_at: String,
}

/// Audit listings carry their own page shape (with a precomputed
/// `total_pages`), unlike the other paginated endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditLogPage {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub items: Vec<AuditLog>,
}

pub async fn list(
    api: &ApiClient,
    token: &str,
    query: &AuditLogQuery,
) -> Result<AuditLogPage, ApiError> {
    api.get("/audit/logs", Some(token), Some(query)).await
}

pub async fn detail(api: &ApiClient, token: &str, id: i64) -> Result<AuditLog, ApiError> {
    api.get(&format!("/audit/logs/{id}"), Some(token), None::<&()>)
        .await
}
