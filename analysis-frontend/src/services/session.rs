//! Session persistence: one namespaced record for the auth state, one for
//! the cached permitted navigation tree. A record that is missing or fails
//! to decode reads as "no session" — never an error.

use frontend_core::error::ApiError;
use frontend_core::nav::NavNode;
use frontend_core::session::{SessionRecord, NAV_KEY, SESSION_KEY};
use tower_sessions::Session;

use crate::services::api_client::ApiClient;
use crate::AppState;

pub async fn load_record(session: &Session) -> Option<SessionRecord> {
    session
        .get::<SessionRecord>(SESSION_KEY)
        .await
        .ok()
        .flatten()
}

pub async fn load_nav(session: &Session) -> Option<Vec<NavNode>> {
    session.get::<Vec<NavNode>>(NAV_KEY).await.ok().flatten()
}

fn store_error(err: tower_sessions::session::Error) -> ApiError {
    ApiError::Server(format!("session store failure: {err}"))
}

/// Replace the whole record atomically and drop the cached navigation tree
/// so it is regenerated for the new permission set.
pub async fn establish(
    session: &Session,
    state: &AppState,
    record: &SessionRecord,
) -> Result<(), ApiError> {
    session
        .insert(SESSION_KEY, record)
        .await
        .map_err(store_error)?;
    let _: Option<Vec<NavNode>> = session.remove(NAV_KEY).await.map_err(store_error)?;
    // Late auth-expired responses from before this login must not kill the
    // new session.
    state.expiry_guard.advance();
    Ok(())
}

/// Overwrite the record in place (profile/permission refresh). Idempotent,
/// so a late resolution from a superseded navigation is harmless.
pub async fn refresh(session: &Session, record: &SessionRecord) -> Result<(), ApiError> {
    session
        .insert(SESSION_KEY, record)
        .await
        .map_err(store_error)
}

pub async fn save_nav(session: &Session, nav: &[NavNode]) -> Result<(), ApiError> {
    session.insert(NAV_KEY, nav).await.map_err(store_error)
}

/// Clear all session state. With `silent` set, only local state is touched;
/// otherwise the remote logout endpoint is invoked best-effort first (its
/// failure is logged and swallowed).
pub async fn logout(session: &Session, api: &ApiClient, silent: bool) {
    if !silent {
        if let Some(record) = load_record(session).await {
            if let Err(e) = crate::api::auth::logout(api, &record.token).await {
                tracing::warn!(error = %e, "remote logout failed, clearing local session anyway");
            }
        }
    }
    session.clear().await;
}
