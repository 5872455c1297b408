pub mod app;
pub mod audit;
pub mod auth;
pub mod budgets;
pub mod comparison;
pub mod cvp;
pub mod dashboard;
pub mod expenses;
pub mod kpi;
pub mod metrics;
pub mod orders;
pub mod reports;

use askama::Template;
use axum::response::{IntoResponse, Redirect, Response};
use frontend_core::error::ApiError;
use frontend_core::nav::NavNode;
use tower_sessions::Session;

use crate::middleware::auth::{FORBIDDEN_PATH, LOGIN_PATH};
use crate::models::context::{CurrentSession, PermittedNav};
use crate::services::session as session_store;
use crate::AppState;

/// Everything the shared layout needs: sidebar menu, user name, active path,
/// and at most one notification banner.
pub struct ScreenContext {
    pub username: String,
    pub menu: Vec<NavNode>,
    pub current: String,
    pub notice: Option<String>,
    pub error: Option<String>,
}

impl ScreenContext {
    pub fn new(session: &CurrentSession, nav: &PermittedNav, current: &str) -> Self {
        Self {
            username: session.0.user.username.clone(),
            menu: nav.menu(),
            current: current.to_string(),
            notice: None,
            error: None,
        }
    }

    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    ctx: ScreenContext,
    message: String,
}

/// HTML forms submit empty inputs as empty strings; treat those as absent.
pub fn opt_str(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn opt_i64(value: &Option<String>) -> Option<i64> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}

/// Default reporting window: the last 30 days.
pub fn default_range() -> (String, String) {
    let today = chrono::Local::now().date_naive();
    let start = today - chrono::Duration::days(30);
    (
        start.format("%Y-%m-%d").to_string(),
        today.format("%Y-%m-%d").to_string(),
    )
}

/// Store choices for filter dropdowns, narrowed to what this session may see.
pub async fn store_options(
    state: &AppState,
    record: &frontend_core::session::SessionRecord,
) -> Result<Vec<crate::api::stores::StoreInfo>, ApiError> {
    let all = crate::api::stores::all(&state.api, &record.token).await?;
    Ok(crate::api::stores::accessible(all, record))
}

/// Resolve a failed remote call to one user-visible outcome.
///
/// Auth expiry terminates the session silently — once across concurrent
/// requests, guarded by the generation snapshot taken before the call — and
/// redirects; everything else renders a single error banner in place.
pub async fn fail(
    state: &AppState,
    session: &Session,
    snapshot: u64,
    ctx: ScreenContext,
    err: ApiError,
) -> Response {
    match err {
        ApiError::AuthenticationExpired => {
            if state.expiry_guard.claim(snapshot) {
                tracing::warn!("authentication expired, terminating session");
                session_store::logout(session, &state.api, true).await;
            }
            Redirect::to(&format!("{LOGIN_PATH}?error=session_expired")).into_response()
        }
        ApiError::Forbidden => Redirect::to(FORBIDDEN_PATH).into_response(),
        err => {
            tracing::error!(error = %err, "screen data fetch failed");
            ErrorTemplate {
                message: err.user_message(),
                ctx,
            }
            .into_response()
        }
    }
}
