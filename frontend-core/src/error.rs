use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Client-side failure taxonomy. Every variant maps to exactly one
/// user-facing message; none are retried automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication expired")]
    AuthenticationExpired,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("server error: {0}")]
    Server(String),

    #[error("gateway timeout")]
    GatewayTimeout,

    #[error("network unreachable: {0}")]
    Network(String),

    #[error("application error {code}: {message}")]
    Application { code: i64, message: String },

    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Map an upstream HTTP status to the taxonomy. `detail` is the
    /// message extracted from the response body, when one was present.
    pub fn from_status(status: StatusCode, detail: Option<String>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::AuthenticationExpired,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            StatusCode::GATEWAY_TIMEOUT => ApiError::GatewayTimeout,
            s if s.is_server_error() => {
                ApiError::Server(detail.unwrap_or_else(|| s.to_string()))
            }
            s => ApiError::Application {
                code: i64::from(s.as_u16()),
                message: detail.unwrap_or_else(|| "request failed".to_string()),
            },
        }
    }

    /// The single notification text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::AuthenticationExpired => {
                "Your session has expired, please sign in again.".to_string()
            }
            ApiError::Forbidden => "You do not have permission to access this.".to_string(),
            ApiError::NotFound => "The requested resource does not exist.".to_string(),
            ApiError::Server(_) => "Server error, please try again later.".to_string(),
            ApiError::GatewayTimeout => {
                "The request timed out, narrow the query range or try again later.".to_string()
            }
            ApiError::Network(_) => {
                "Network error, please check your connection.".to_string()
            }
            ApiError::Application { message, .. } => {
                if message.is_empty() {
                    "Request failed.".to_string()
                } else {
                    message.clone()
                }
            }
            ApiError::Validation(_) => "Please correct the highlighted fields.".to_string(),
            ApiError::Config(_) => "Configuration error.".to_string(),
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthenticationExpired)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::GatewayTimeout
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::Config(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::AuthenticationExpired => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Network(_) => StatusCode::BAD_GATEWAY,
            ApiError::Application { .. } | ApiError::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Server(_) | ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.user_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_covers_the_taxonomy() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, None),
            ApiError::AuthenticationExpired
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, None),
            ApiError::Forbidden
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, None),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, None),
            ApiError::Server(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::GATEWAY_TIMEOUT, None),
            ApiError::GatewayTimeout
        ));
    }

    #[test]
    fn unexpected_status_keeps_the_body_detail() {
        let err = ApiError::from_status(StatusCode::CONFLICT, Some("duplicate order no".into()));
        match err {
            ApiError::Application { code, message } => {
                assert_eq!(code, 409);
                assert_eq!(message, "duplicate order no");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn every_variant_has_a_user_message() {
        let errors = [
            ApiError::AuthenticationExpired,
            ApiError::Forbidden,
            ApiError::NotFound,
            ApiError::Server("boom".into()),
            ApiError::GatewayTimeout,
            ApiError::Network("refused".into()),
            ApiError::Application {
                code: 4001,
                message: "insufficient balance".into(),
            },
            ApiError::Config("missing base_url".into()),
        ];
        for err in errors {
            assert!(!err.user_message().is_empty());
        }
    }
}
