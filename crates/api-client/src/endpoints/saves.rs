//! Save endpoints
//!
//! Maps to `POST` and `DELETE` on `/recipes/:id/save`.

use crate::client::{segment, MasakinClient};
use crate::error::ApiResult;

/// Save API interface
#[derive(Clone)]
pub struct SavesApi {
    client: MasakinClient,
}

impl SavesApi {
    /// Create a new save API interface
    pub(crate) fn new(client: MasakinClient) -> Self {
        Self { client }
    }

    /// Bookmark a recipe
    ///
    /// POST /recipes/:id/save
    pub async fn save(&self, recipe_id: &str) -> ApiResult<()> {
        self.client
            .post(&format!("/recipes/{}/save", segment(recipe_id)?), Option::<&()>::None)
            .await?;
        Ok(())
    }

    /// Remove a bookmark
    ///
    /// DELETE /recipes/:id/save
    pub async fn unsave(&self, recipe_id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("/recipes/{}/save", segment(recipe_id)?))
            .await?;
        Ok(())
    }
}
