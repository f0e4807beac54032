//! Recipe endpoints
//!
//! Maps to the `/recipes` routes:
//! - List recipes with search and category filters
//! - Get single recipe by ID
//! - Create new recipe
//! - Update existing recipe
//! - Delete recipe

use crate::client::{segment, MasakinClient};
use crate::error::{ApiError, ApiResult};
use crate::normalize::{normalize_recipe, normalize_recipes, resolve_entity, Recipe};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "All";

/// Recipes API interface
#[derive(Clone)]
pub struct RecipesApi {
    client: MasakinClient,
}

impl RecipesApi {
    /// Create a new recipes API interface
    pub(crate) fn new(client: MasakinClient) -> Self {
        Self { client }
    }

    /// List recipes matching the query
    ///
    /// GET /recipes?search=&category=
    pub async fn list(&self, query: &RecipeQuery) -> ApiResult<Vec<Recipe>> {
        let raw = self.client.get("/recipes", &query.to_params()).await?;
        Ok(normalize_recipes(&raw))
    }

    /// Get a single recipe by ID
    ///
    /// GET /recipes/:id
    pub async fn get(&self, id: &str) -> ApiResult<Recipe> {
        let raw = self.client.get(&format!("/recipes/{}", segment(id)?), &[]).await?;
        resolve_entity(&raw, "recipe")
            .map(normalize_recipe)
            .ok_or_else(|| ApiError::unexpected_shape(format!("no recipe in response for {id}")))
    }

    /// Create a new recipe; returns it when the backend echoes it back
    ///
    /// POST /recipes
    pub async fn create(&self, recipe: &RecipePayload) -> ApiResult<Option<Recipe>> {
        let raw = self.client.post("/recipes", Some(recipe)).await?;
        Ok(echoed_recipe(&raw))
    }

    /// Replace an existing recipe
    ///
    /// PUT /recipes/:id
    pub async fn update(&self, id: &str, recipe: &RecipePayload) -> ApiResult<Option<Recipe>> {
        let raw = self
            .client
            .put(&format!("/recipes/{}", segment(id)?), recipe)
            .await?;
        Ok(echoed_recipe(&raw))
    }

    /// Delete a recipe
    ///
    /// DELETE /recipes/:id
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("/recipes/{}", segment(id)?))
            .await?;
        Ok(())
    }
}

fn echoed_recipe(raw: &Value) -> Option<Recipe> {
    resolve_entity(raw, "recipe")
        .map(normalize_recipe)
        .filter(|r| !r.id.is_empty())
}

// ============================================================================
// Request Types
// ============================================================================

/// Filters for listing recipes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeQuery {
    /// Free-text search
    pub search: Option<String>,
    /// Category name; `"All"` means unfiltered
    pub category: Option<String>,
}

impl RecipeQuery {
    /// Create new params with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by search text
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Filter by category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Search text, if non-blank
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Category, unless absent or `"All"`
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }

    /// Query parameters; blank search and `"All"` are omitted
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = self.search_text() {
            params.push(("search", search.to_string()));
        }
        if let Some(category) = self.category_filter() {
            params.push(("category", category.to_string()));
        }
        params
    }

    /// Whether a recipe passes these filters locally
    ///
    /// Title contains the search text (case-insensitive) and the category
    /// matches exactly.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let search_ok = self
            .search_text()
            .map_or(true, |s| recipe.title.to_lowercase().contains(&s.to_lowercase()));
        let category_ok = self.category_filter().map_or(true, |c| recipe.category == c);
        search_ok && category_ok
    }
}

/// Create/update body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    pub title: String,
    pub description: String,
    /// Minutes
    pub cooking_time: u32,
    pub category: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub images: Vec<String>,
    pub video_url: String,
    pub portion: u32,
    pub difficulty: String,
}
