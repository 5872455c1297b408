//! HTTP wrapper around the remote analysis API.
//!
//! Attaches the session's bearer token, injects trace context, unwraps the
//! `{code, message, data}` envelope, and maps transport and HTTP failures to
//! the [`ApiError`] taxonomy. No call is ever retried automatically.

use frontend_core::envelope::Envelope;
use frontend_core::error::ApiError;
use frontend_core::observability::TracedRequest;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::ApiSettings;

pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Raw bytes fetched from an export endpoint, passed through to the browser.
pub struct RawDownload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T, Q>(&self, path: &str, token: Option<&str>, query: Option<&Q>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.request(Method::GET, path, token, query, None::<&()>)
            .await
    }

    pub async fn post<T, B>(&self, path: &str, token: Option<&str>, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, token, None::<&()>, Some(body))
            .await
    }

    /// POST with both query parameters and a JSON body (what-if simulation).
    pub async fn post_with_query<T, Q, B>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &Q,
        body: &B,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, token, Some(query), Some(body))
            .await
    }

    /// POST whose success payload is empty.
    pub async fn post_ack<B>(&self, path: &str, token: Option<&str>, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .send(Method::POST, path, token, None::<&()>, Some(body))
            .await?;
        Self::unwrap_ack(response).await
    }

    /// PUT whose success payload is empty.
    pub async fn put_ack<B>(&self, path: &str, token: Option<&str>, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .send(Method::PUT, path, token, None::<&()>, Some(body))
            .await?;
        Self::unwrap_ack(response).await
    }

    /// Fetch an export endpoint without envelope unwrapping.
    pub async fn get_raw<Q>(
        &self,
        path: &str,
        token: Option<&str>,
        query: Option<&Q>,
    ) -> Result<RawDownload, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(Method::GET, path, token, query, None::<&()>)
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read export body: {e}")))?;
        Ok(RawDownload {
            bytes: bytes.to_vec(),
            content_type,
        })
    }

    async fn request<T, Q, B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, path, token, query, body).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Server(format!("malformed response body: {e}")))?;
        envelope.into_data()
    }

    async fn send<Q, B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<Response, ApiError>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = TracedRequest::new(self.client.request(method.clone(), &url));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            tracing::error!(%method, %url, error = %e, "API request failed");
            ApiError::from(e)
        })
    }

    async fn unwrap_ack(response: Response) -> Result<(), ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }
        let envelope: Envelope<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ApiError::Server(format!("malformed response body: {e}")))?;
        envelope.expect_ok()
    }

    async fn status_error(status: StatusCode, response: Response) -> ApiError {
        ApiError::from_status(status, Self::detail_from_body(response).await)
    }

    /// Error responses are not enveloped; pull `detail` or `message` out of
    /// the body when the backend included one.
    async fn detail_from_body(response: Response) -> Option<String> {
        let body: serde_json::Value = response.json().await.ok()?;
        body.get("detail")
            .or_else(|| body.get("message"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}
