use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::auth as auth_api;
use crate::middleware::auth::DEFAULT_LANDING;
use crate::services::session as session_store;
use crate::AppState;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub redirect: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginPageParams {
    pub redirect: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub redirect: Option<String>,
}

pub async fn login_page(Query(params): Query<LoginPageParams>) -> impl IntoResponse {
    let error = params.error.as_deref().map(|code| match code {
        "session_expired" => "Your session has expired, please sign in again.".to_string(),
        _ => "Sign-in failed, please try again.".to_string(),
    });
    LoginTemplate {
        error,
        redirect: params.redirect,
    }
}

pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let credentials = auth_api::LoginRequest {
        username: form.username,
        password: form.password,
    };

    match auth_api::login(&state.api, &credentials).await {
        Ok(tokens) => {
            let record = tokens.user_info.into_record(tokens.access_token);
            if let Err(e) = session_store::establish(&session, &state, &record).await {
                tracing::error!(error = %e, "failed to persist session after login");
                return e.into_response();
            }

            tracing::info!(
                user_id = record.user.id,
                username = %record.user.username,
                "user logged in"
            );

            let target = form
                .redirect
                .filter(|t| t.starts_with('/') && !t.starts_with("//"))
                .unwrap_or_else(|| DEFAULT_LANDING.to_string());
            Redirect::to(&target).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "login failed");
            // A 401 here is a rejected credential, not an expired session.
            let message = match &err {
                frontend_core::error::ApiError::AuthenticationExpired => {
                    "Invalid username or password.".to_string()
                }
                other => other.user_message(),
            };
            LoginTemplate {
                error: Some(message),
                redirect: None,
            }
            .into_response()
        }
    }
}

pub async fn logout_handler(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    session_store::logout(&session, &state.api, false).await;
    Redirect::to("/login")
}
