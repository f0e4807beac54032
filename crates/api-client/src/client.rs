//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{AuthApi, FollowsApi, ProfileApi, ReactionsApi, RecipesApi, SavesApi};
use crate::error::{ApiError, ApiResult};
use crate::middleware::{AuthInterceptor, Interception};
use crate::transport::{ApiRequest, HttpTransport, RawResponse, ReqwestTransport};
use masakin_core::route::Navigator;
use masakin_core::session::SessionStore;
use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};

/// Masakin API client
///
/// One instance serves the whole process. Every request:
/// - carries the session's bearer token when one is held
/// - carries an `X-Request-ID` for correlation
/// - on a 401 outside the login endpoint, ends the session and redirects
///
/// There are no retries, no batching and no response caching.
#[derive(Clone)]
pub struct MasakinClient {
    transport: Arc<dyn HttpTransport>,
    config: Arc<ClientConfig>,
    interceptor: AuthInterceptor,
}

impl MasakinClient {
    /// Create a client with configuration from the environment
    pub fn new(session: SessionStore, navigator: Arc<dyn Navigator>) -> ApiResult<Self> {
        Self::with_config(ClientConfig::from_env()?, session, navigator)
    }

    /// Create a client with specific configuration over `reqwest`
    pub fn with_config(
        config: ClientConfig,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> ApiResult<Self> {
        config.validate()?;
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Ok(Self::with_transport(config, transport, session, navigator))
    }

    /// Create a client over a custom transport
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            config: Arc::new(config),
            interceptor: AuthInterceptor::new(session, navigator),
        }
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The shared session used for credentials
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        self.interceptor.session()
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access authentication endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access recipe CRUD endpoints
    #[must_use]
    pub fn recipes(&self) -> RecipesApi {
        RecipesApi::new(self.clone())
    }

    /// Access reaction (like) endpoints
    #[must_use]
    pub fn reactions(&self) -> ReactionsApi {
        ReactionsApi::new(self.clone())
    }

    /// Access save (bookmark) endpoints
    #[must_use]
    pub fn saves(&self) -> SavesApi {
        SavesApi::new(self.clone())
    }

    /// Access follow endpoints
    #[must_use]
    pub fn follows(&self) -> FollowsApi {
        FollowsApi::new(self.clone())
    }

    /// Access profile endpoints
    #[must_use]
    pub fn profile(&self) -> ProfileApi {
        ProfileApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// Perform a GET request
    #[instrument(skip(self, query))]
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Value> {
        let query = query
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        self.request(Method::GET, path, query, None).await
    }

    /// Perform a POST request
    #[instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> ApiResult<Value> {
        let body = body.map(serde_json::to_value).transpose()?;
        self.request(Method::POST, path, Vec::new(), body).await
    }

    /// Perform a PUT request
    #[instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PUT, path, Vec::new(), Some(body)).await
    }

    /// Perform a DELETE request
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.request(Method::DELETE, path, Vec::new(), None).await
    }

    /// Execute one request through the interceptor
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        let mut request = ApiRequest::new(method, path);
        request.query = query;
        request.body = body;
        self.interceptor.before_request(&mut request);

        let start = Instant::now();
        let response = self.transport.send(&request).await;
        let elapsed = start.elapsed();

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                debug!(
                    request_id = %request.request_id,
                    method = %request.method,
                    path = %request.path,
                    error = %e,
                    "Request failed"
                );
                return Err(e);
            }
        };

        debug!(
            request_id = %request.request_id,
            method = %request.method,
            path = %request.path,
            status = response.status,
            elapsed_ms = elapsed.as_millis(),
            "Request completed"
        );

        if self.interceptor.after_response(&request, response.status)
            == Interception::SessionTerminated
        {
            debug!(request_id = %request.request_id, "Session terminated by response");
        }

        decode(response)
    }
}

/// Decode a response body; empty success bodies become `null`
fn decode(response: RawResponse) -> ApiResult<Value> {
    if !response.is_success() {
        return Err(ApiError::api_response(response.status, &response.body));
    }
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// Percent-encode a single path segment such as a recipe id
///
/// Empty ids, `.` and `..` are rejected since they would address another resource.
pub(crate) fn segment(id: &str) -> ApiResult<String> {
    let invalid = || ApiError::InvalidUrl(format!("invalid path segment {id:?}"));
    if matches!(id, "" | "." | "..") {
        return Err(invalid());
    }
    let mut url = Url::parse("http://localhost/").map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|()| invalid())?
        .pop_if_empty()
        .push(id);
    let encoded = url.path().trim_start_matches('/');
    if encoded.is_empty() {
        return Err(invalid());
    }
    Ok(encoded.to_string())
}


#[cfg(test)]
mod tests {
    use super::testing::harness;
    use super::*;
    use masakin_core::route::Route;
    use proptest::prelude::*;

    #[test]
    fn test_client_creation() {
        let h = harness(false);
        assert_eq!(h.client.base_url(), "http://localhost:5000/api/v1");
        assert!(MasakinClient::with_config(
            ClientConfig::development(),
            h.client.session().clone(),
            h.navigator.clone(),
        )
        .is_ok());
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("65f1c0ffee").unwrap(), "65f1c0ffee");
        assert_eq!(segment("a b").unwrap(), "a%20b");
        assert_eq!(segment("x?y=1").unwrap(), "x%3Fy=1");
        assert_eq!(segment("../admin").unwrap(), "..%2Fadmin");
        assert_eq!(segment("50%").unwrap(), "50%25");
        assert!(segment("").is_err());
        assert!(segment("..").is_err());
        assert!(segment(".").is_err());
    }

    #[tokio::test]
    async fn test_bearer_and_query_sent() {
        let h = harness(true);
        h.transport.reply(200, r#"{"data": []}"#);

        h.client
            .get("/recipes", &[("search", "soto".to_string())])
            .await
            .unwrap();

        let sent = h.transport.last();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(sent.bearer.as_deref(), Some("jwt-abc"));
        assert_eq!(sent.query, vec![("search".to_string(), "soto".to_string())]);
    }

    #[tokio::test]
    async fn test_empty_body_decodes_to_null() {
        let h = harness(true);
        h.transport.reply(204, "");
        assert_eq!(h.client.delete("/recipes/1/save").await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_error_carries_response() {
        let h = harness(true);
        h.transport.reply(500, r#"{"message":"database down"}"#);

        let err = h.client.get("/recipes", &[]).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.server_message(), Some("database down"));
        assert!(h.client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_401_clears_session_and_redirects() {
        let h = harness(true);
        h.transport.reply(401, r#"{"message":"jwt expired"}"#);

        let err = h.client.post("/recipes/9/save", Option::<&()>::None).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(!h.client.session().is_authenticated());
        assert_eq!(*h.navigator.redirects.lock().unwrap(), vec![Route::Login]);
    }

    #[tokio::test]
    async fn test_401_on_login_does_not_redirect() {
        let h = harness(false);
        h.transport.reply(401, r#"{"message":"Invalid credentials"}"#);

        let err = h
            .client
            .post("/auth/login", Some(&serde_json::json!({"email": "a@b.c", "password": "x"})))
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(h.navigator.redirects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_success_body_is_json_error() {
        let h = harness(false);
        h.transport.reply(200, "<html>");
        assert!(matches!(h.client.get("/recipes", &[]).await, Err(ApiError::Json(_))));
    }

    proptest! {
        #[test]
        fn prop_only_401_ends_session(status in 400u16..600) {
            let h = harness(true);
            h.transport.reply(status, "");

            let result = tokio_test::block_on(h.client.get("/recipes", &[]));

            prop_assert!(result.is_err());
            prop_assert_eq!(h.client.session().is_authenticated(), status != 401);
            prop_assert_eq!(h.navigator.redirects.lock().unwrap().len(), usize::from(status == 401));
        }
    }
}
