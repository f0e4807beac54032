//! Follow endpoints
//!
//! Maps to `POST` and `DELETE` on `/users/:id/follow`.

use crate::client::{segment, MasakinClient};
use crate::error::ApiResult;

/// Follow API interface
#[derive(Clone)]
pub struct FollowsApi {
    client: MasakinClient,
}

impl FollowsApi {
    /// Create a new follow API interface
    pub(crate) fn new(client: MasakinClient) -> Self {
        Self { client }
    }

    /// Follow a user
    ///
    /// POST /users/:id/follow
    pub async fn follow(&self, user_id: &str) -> ApiResult<()> {
        self.client
            .post(&format!("/users/{}/follow", segment(user_id)?), Option::<&()>::None)
            .await?;
        Ok(())
    }

    /// Stop following a user
    ///
    /// DELETE /users/:id/follow
    pub async fn unfollow(&self, user_id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("/users/{}/follow", segment(user_id)?))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::harness;
    use masakin_core::route::Route;

    #[tokio::test]
    async fn test_follow_path() {
        let h = harness(true);
        h.client.follows().follow("u-7").await.unwrap();
        assert_eq!(h.transport.last().path, "/users/u-7/follow");
    }

    #[tokio::test]
    async fn test_unfollow_with_expired_token_ends_session() {
        let h = harness(true);
        h.transport.reply(401, r#"{"message":"Token expired"}"#);

        assert!(h.client.follows().unfollow("u-7").await.is_err());
        assert!(!h.client.session().is_authenticated());
        assert_eq!(*h.navigator.redirects.lock().unwrap(), vec![Route::Login]);
    }
}
