//! Reaction endpoints
//!
//! Maps to `POST` and `DELETE` on `/recipes/:id/react`.

use crate::client::{segment, MasakinClient};
use crate::error::ApiResult;

/// Reaction API interface
#[derive(Clone)]
pub struct ReactionsApi {
    client: MasakinClient,
}

impl ReactionsApi {
    /// Create a new reaction API interface
    pub(crate) fn new(client: MasakinClient) -> Self {
        Self { client }
    }

    /// Like a recipe
    ///
    /// POST /recipes/:id/react
    pub async fn react(&self, recipe_id: &str) -> ApiResult<()> {
        self.client
            .post(&format!("/recipes/{}/react", segment(recipe_id)?), Option::<&()>::None)
            .await?;
        Ok(())
    }

    /// Remove a like
    ///
    /// DELETE /recipes/:id/react
    pub async fn unreact(&self, recipe_id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("/recipes/{}/react", segment(recipe_id)?))
            .await?;
        Ok(())
    }
}
