//! Navigation guard: runs on every request and resolves each navigation to
//! exactly one outcome — proceed, redirect to login, redirect to the default
//! landing route, or redirect to the error page.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use frontend_core::nav::{covers_path, filter_nav};
use tower_sessions::Session;

use crate::api::auth as auth_api;
use crate::models::context::{CurrentSession, PermittedNav};
use crate::nav_config;
use crate::services::session as session_store;
use crate::AppState;

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_LANDING: &str = "/dashboard";
pub const FORBIDDEN_PATH: &str = "/403";

/// Paths reachable without a session.
const ALLOW_LIST: &[&str] = &["/", "/login", "/403", "/404", "/health", "/metrics"];

fn allow_listed(path: &str) -> bool {
    ALLOW_LIST.contains(&path) || path.starts_with("/static/")
}

pub async fn navigation_guard(
    State(state): State<AppState>,
    session: Session,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let record = match session_store::load_record(&session).await {
        Some(record) => record,
        None => {
            if allow_listed(&path) {
                return next.run(request).await;
            }
            return Redirect::to(&format!("{LOGIN_PATH}?redirect={path}")).into_response();
        }
    };

    // A signed-in user never sees the login screen.
    if path == LOGIN_PATH {
        return Redirect::to(DEFAULT_LANDING).into_response();
    }

    let (record, nav) = match session_store::load_nav(&session).await {
        Some(nav) => (record, nav),
        None => {
            // First navigation of this session: refresh profile and
            // permissions, then generate the permitted tree exactly once.
            let snapshot = state.expiry_guard.snapshot();
            match auth_api::current_user(&state.api, &record.token).await {
                Ok(user) => {
                    let refreshed = user.into_record(record.token.clone());
                    let nav = filter_nav(&nav_config::nav_tree(), &refreshed.permission_set());
                    if let Err(e) = session_store::refresh(&session, &refreshed).await {
                        tracing::error!(error = %e, "failed to persist refreshed session");
                        return e.into_response();
                    }
                    if let Err(e) = session_store::save_nav(&session, &nav).await {
                        tracing::error!(error = %e, "failed to cache permitted navigation");
                        return e.into_response();
                    }
                    (refreshed, nav)
                }
                Err(err) => {
                    // One termination and one notification no matter how
                    // many navigations raced here.
                    if state.expiry_guard.claim(snapshot) {
                        tracing::warn!(error = %err, "profile refresh failed, terminating session");
                        session_store::logout(&session, &state.api, true).await;
                    }
                    return Redirect::to(&format!("{LOGIN_PATH}?error=session_expired"))
                        .into_response();
                }
            }
        }
    };

    // Screens the static tree knows about but the permitted tree does not
    // are forbidden for this session.
    let full_tree = nav_config::nav_tree();
    if covers_path(&full_tree, &path) && !covers_path(&nav, &path) {
        return Redirect::to(FORBIDDEN_PATH).into_response();
    }

    request.extensions_mut().insert(CurrentSession(record));
    request.extensions_mut().insert(PermittedNav(nav));
    next.run(request).await
}
