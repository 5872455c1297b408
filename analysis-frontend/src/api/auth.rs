use frontend_core::error::ApiError;
use frontend_core::session::{SessionRecord, UserProfile};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::api_client::ApiClient;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user_info: CurrentUser,
}

/// Profile plus grants, as returned by login and `/auth/me`.
#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    /// `None` = unrestricted; `Some([])` = no stores.
    #[serde(default)]
    pub accessible_stores: Option<Vec<i64>>,
}

impl CurrentUser {
    pub fn into_record(self, token: String) -> SessionRecord {
        SessionRecord {
            token,
            user: UserProfile {
                id: self.id,
                username: self.username,
                email: self.email,
                full_name: self.full_name,
                is_active: self.is_active,
                is_superuser: self.is_superuser,
                roles: self.roles,
            },
            permissions: self.permissions,
            accessible_stores: self.accessible_stores,
        }
    }
}

pub async fn login(api: &ApiClient, credentials: &LoginRequest) -> Result<TokenResponse, ApiError> {
    credentials.validate()?;
    api.post("/auth/login", None, credentials).await
}

pub async fn current_user(api: &ApiClient, token: &str) -> Result<CurrentUser, ApiError> {
    api.get("/auth/me", Some(token), None::<&()>).await
}

pub async fn logout(api: &ApiClient, token: &str) -> Result<(), ApiError> {
    api.post_ack("/auth/logout", Some(token), &serde_json::json!({}))
        .await
}
