//! Profile endpoints
//!
//! Maps to the `/users` read routes:
//! - Public profile of a user
//! - Recipes authored by a user
//! - Analytics for the signed-in user

use crate::client::{segment, MasakinClient};
use crate::error::{ApiError, ApiResult};
use crate::normalize::{normalize_profile, normalize_recipes_with_author, Recipe, UserProfile};
use masakin_core::session::UserSummary;
use serde_json::Value;

/// Author label for a user's own recipes when the user has no name
pub const SELF_AUTHOR: &str = "Me";

/// Profile API interface
#[derive(Clone)]
pub struct ProfileApi {
    client: MasakinClient,
}

impl ProfileApi {
    /// Create a new profile API interface
    pub(crate) fn new(client: MasakinClient) -> Self {
        Self { client }
    }

    /// Public profile of a user
    ///
    /// GET /users/:id
    pub async fn user(&self, user_id: &str) -> ApiResult<UserProfile> {
        let raw = self
            .client
            .get(&format!("/users/{}", segment(user_id)?), &[])
            .await?;
        normalize_profile(&raw)
            .ok_or_else(|| ApiError::unexpected_shape(format!("no user in response for {user_id}")))
    }

    /// Recipes authored by `user`; unattributed recipes are credited to them
    ///
    /// GET /users/:id/recipes
    pub async fn user_recipes(&self, user: &UserSummary) -> ApiResult<Vec<Recipe>> {
        let raw = self
            .client
            .get(&format!("/users/{}/recipes", segment(&user.id)?), &[])
            .await?;
        let fallback = if user.name.is_empty() {
            SELF_AUTHOR
        } else {
            user.name.as_str()
        };
        Ok(normalize_recipes_with_author(&raw, fallback))
    }

    /// Analytics for the signed-in user, unwrapped from its `data` envelope
    ///
    /// GET /users/me/analytics
    pub async fn my_analytics(&self) -> ApiResult<Value> {
        let raw = self.client.get("/users/me/analytics", &[]).await?;
        Ok(match raw {
            Value::Object(mut map) if map.contains_key("data") => {
                map.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::harness;

    #[tokio::test]
    async fn test_user_profile() {
        let h = harness(true);
        h.transport.reply(
            200,
            r#"{"data":{"user":{"_id":"u1","name":"Rina","followersCount":10,"following":[]}}}"#,
        );
        let profile = h.client.profile().user("u1").await.unwrap();
        assert_eq!(profile.user.name, "Rina");
        assert_eq!(profile.followers, 10);
        assert_eq!(profile.following, 0);
        assert_eq!(h.transport.last().path, "/users/u1");
    }

    #[tokio::test]
    async fn test_user_recipes_credit_owner() {
        let h = harness(true);
        h.transport.reply(200, r#"{"data":{"recipes":[{"_id":"r1","title":"Pepes Ikan"}]}}"#);

        let recipes = h
            .client
            .profile()
            .user_recipes(&UserSummary::new("u1", "Rina"))
            .await
            .unwrap();
        assert_eq!(recipes[0].author, "Rina");
        assert_eq!(h.transport.last().path, "/users/u1/recipes");
    }

    #[tokio::test]
    async fn test_user_recipes_nameless_owner() {
        let h = harness(true);
        h.transport.reply(200, r#"[{"_id":"r1"}]"#);
        let recipes = h
            .client
            .profile()
            .user_recipes(&UserSummary::new("u1", ""))
            .await
            .unwrap();
        assert_eq!(recipes[0].author, SELF_AUTHOR);
    }

    #[tokio::test]
    async fn test_analytics_unwrapped() {
        let h = harness(true);
        h.transport.reply(200, r#"{"success":true,"data":{"totalViews":120}}"#);
        let analytics = h.client.profile().my_analytics().await.unwrap();
        assert_eq!(analytics["totalViews"], 120);
    }
}
