//! frontend-core: shared infrastructure for the analysis frontend.
pub mod envelope;
pub mod error;
pub mod middleware;
pub mod nav;
pub mod observability;
pub mod permission;
pub mod session;

pub use axum;
pub use reqwest;
pub use serde;
pub use serde_json;
pub use tracing;
pub use validator;
