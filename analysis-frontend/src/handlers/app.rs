use askama::Template;
use axum::response::{IntoResponse, Redirect};

use crate::middleware::auth::DEFAULT_LANDING;

#[derive(Template)]
#[template(path = "403.html")]
pub struct ForbiddenTemplate {}

#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {}

pub async fn index() -> impl IntoResponse {
    Redirect::to(DEFAULT_LANDING)
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn forbidden_page() -> impl IntoResponse {
    ForbiddenTemplate {}
}

pub async fn not_found_page() -> impl IntoResponse {
    NotFoundTemplate {}
}

/// Unknown paths render the 404 view rather than an empty body.
pub async fn fallback() -> impl IntoResponse {
    NotFoundTemplate {}
}
