//! Authentication endpoints
//!
//! Maps to the `/auth` routes:
//! - Log in with email and password
//! - Register a new account
//! - Refresh the access token
//! - Log out server-side

use crate::client::MasakinClient;
use crate::error::{ApiError, ApiResult};
use crate::normalize::{normalize_auth_grant, AuthGrant};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Authentication API interface
#[derive(Clone)]
pub struct AuthApi {
    client: MasakinClient,
}

impl AuthApi {
    /// Create a new auth API interface
    pub(crate) fn new(client: MasakinClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token and user
    ///
    /// POST /auth/login
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthGrant> {
        let raw = self.client.post("/auth/login", Some(credentials)).await?;
        normalize_auth_grant(&raw)
            .ok_or_else(|| ApiError::unexpected_shape("login response has no token or user"))
    }

    /// Create an account; some backends also return credentials
    ///
    /// POST /auth/register
    pub async fn register(&self, account: &RegisterRequest) -> ApiResult<Option<AuthGrant>> {
        let raw = self.client.post("/auth/register", Some(account)).await?;
        Ok(normalize_auth_grant(&raw))
    }

    /// Ask for a fresh access token
    ///
    /// POST /auth/refresh
    pub async fn refresh(&self) -> ApiResult<Option<String>> {
        let raw = self.client.post("/auth/refresh", Option::<&()>::None).await?;
        let data = raw.get("data").filter(|d| d.is_object()).unwrap_or(&raw);
        Ok(["accessToken", "token"]
            .iter()
            .find_map(|key| data.get(*key).and_then(Value::as_str))
            .filter(|t| !t.is_empty())
            .map(str::to_string))
    }

    /// End the server-side session
    ///
    /// POST /auth/logout
    pub async fn logout(&self) -> ApiResult<()> {
        self.client.post("/auth/logout", Option::<&()>::None).await?;
        Ok(())
    }
}

/// Login body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}
