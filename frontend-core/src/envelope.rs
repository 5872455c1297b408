//! The uniform response envelope every business endpoint uses, regardless of
//! HTTP status: `{code, message, data}`.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Envelope codes accepted as success.
pub const SUCCESS_CODES: [i64; 2] = [0, 200];

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        SUCCESS_CODES.contains(&self.code)
    }

    /// Unwrap the payload, rejecting business failures that arrived with a
    /// transport-level 200.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(ApiError::Application {
                code: self.code,
                message: self.message,
            });
        }
        self.data.ok_or(ApiError::Application {
            code: self.code,
            message: "response envelope carried no data".to_string(),
        })
    }

    /// For endpoints whose success payload is empty (logout, batch saves).
    pub fn expect_ok(self) -> Result<(), ApiError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ApiError::Application {
                code: self.code,
                message: self.message,
            })
        }
    }
}

/// Payload shape of paginated list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> i64 {
        if self.page_size <= 0 {
            return 0;
        }
        (self.total + self.page_size - 1) / self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        value: i64,
    }

    #[test]
    fn success_codes_unwrap() {
        for code in SUCCESS_CODES {
            let raw = format!(r#"{{"code": {code}, "message": "ok", "data": {{"value": 3}}}}"#);
            let envelope: Envelope<Payload> = serde_json::from_str(&raw).unwrap();
            assert_eq!(envelope.into_data().unwrap(), Payload { value: 3 });
        }
    }

    #[test]
    fn business_error_on_http_200_is_rejected() {
        let raw = r#"{"code": 4002, "message": "store is closed", "data": null}"#;
        let envelope: Envelope<Payload> = serde_json::from_str(raw).unwrap();
        match envelope.into_data() {
            Err(ApiError::Application { code, message }) => {
                assert_eq!(code, 4002);
                assert_eq!(message, "store is closed");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn empty_payload_acknowledgement() {
        let raw = r#"{"code": 200, "message": "ok"}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(raw).unwrap();
        assert!(envelope.expect_ok().is_ok());

        let raw = r#"{"code": 500, "message": "write failed"}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(raw).unwrap();
        assert!(envelope.expect_ok().is_err());
    }

    #[test]
    fn page_math() {
        let page = Page::<i64> {
            items: vec![1, 2, 3],
            total: 21,
            page: 1,
            page_size: 10,
        };
        assert_eq!(page.total_pages(), 3);
    }
}
