//! Network boundary of the client
//!
//! [`MasakinClient`](crate::MasakinClient) builds an [`ApiRequest`], the
//! transport performs it and hands back the status and body text. All
//! interception and decoding happens above this seam.

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde_json::Value;

/// Request correlation ID header
pub const X_REQUEST_ID: &str = "X-Request-ID";

/// A request ready to be sent
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Correlation id, sent as `X-Request-ID`
    pub request_id: String,
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL, starting with `/`
    pub path: String,
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// Bearer token to send, set by the auth interceptor
    pub bearer: Option<String>,
    /// JSON body
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Request without query, body or credentials
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            method,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: None,
        }
    }
}

/// Status and body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Body text, possibly empty
    pub body: String,
}

impl RawResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs requests against the backend
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one request; non-2xx statuses are returned, not raised
    async fn send(&self, request: &ApiRequest) -> ApiResult<RawResponse>;
}

/// Production transport over `reqwest`
#[derive(Clone)]
pub struct ReqwestTransport {
    inner: Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    /// Build the underlying HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| ApiError::config("user_agent contains invalid header characters"))?;
        default_headers.insert(USER_AGENT, agent);

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> ApiResult<RawResponse> {
        let url = self.config.url_for(&request.path);
        let mut builder = self
            .inner
            .request(request.method.clone(), &url)
            .header(X_REQUEST_ID, &request.request_id);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        let a = ApiRequest::new(Method::GET, "/recipes");
        let b = ApiRequest::new(Method::GET, "/recipes");
        assert_ne!(a.request_id, b.request_id);
        assert!(a.bearer.is_none());
    }

    #[test]
    fn test_transport_builds_from_config() {
        assert!(ReqwestTransport::new(&ClientConfig::development()).is_ok());
        let bad = ClientConfig::default().with_user_agent("bad\nagent");
        assert!(ReqwestTransport::new(&bad).is_err());
    }

    #[test]
    fn test_raw_response_success_range() {
        assert!(RawResponse { status: 204, body: String::new() }.is_success());
        assert!(!RawResponse { status: 401, body: String::new() }.is_success());
    }
}
