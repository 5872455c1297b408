//! Per-request context inserted by the navigation guard and consumed by
//! screen handlers as extractors.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use frontend_core::nav::{menu_view, NavNode};
use frontend_core::session::SessionRecord;

/// The authenticated session for this request.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionRecord);

/// The permitted navigation tree generated for this session.
#[derive(Debug, Clone)]
pub struct PermittedNav(pub Vec<NavNode>);

impl PermittedNav {
    /// Sidebar entries: hidden nodes removed, childless groups pruned.
    pub fn menu(&self) -> Vec<NavNode> {
        menu_view(&self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .ok_or_else(|| Redirect::to("/login").into_response())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PermittedNav
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<PermittedNav>()
            .cloned()
            .ok_or_else(|| Redirect::to("/login").into_response())
    }
}
