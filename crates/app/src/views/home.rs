//! Landing page: latest recipes with a category filter

use crate::fixtures::{mock_recipes, or_fixture, DataSource};
use crate::App;
use masakin_api_client::endpoints::{RecipeQuery, ALL_CATEGORIES};
use masakin_api_client::Recipe;
use tracing::instrument;

/// Recipes in the "latest" strip
pub const LATEST_COUNT: usize = 3;

/// Recipes in the "more" grid after the latest strip
pub const MORE_COUNT: usize = 4;

/// Home page state
pub struct HomeView {
    app: App,
    query: RecipeQuery,
    recipes: Vec<Recipe>,
    source: DataSource,
}

impl HomeView {
    /// Home with the search text from the `?search=` URL parameter
    pub fn new(app: App, search: Option<&str>) -> Self {
        let mut query = RecipeQuery::new().with_category(ALL_CATEGORIES);
        if let Some(search) = search {
            query = query.with_search(search);
        }
        Self {
            app,
            query,
            recipes: Vec::new(),
            source: DataSource::Network,
        }
    }

    pub fn query(&self) -> &RecipeQuery {
        &self.query
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    /// Change the category; call [`load`](Self::load) afterwards
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.query.category = Some(category.into());
    }

    /// Fetch recipes; the full sample set replaces them on failure
    #[instrument(skip(self), fields(query = ?self.query))]
    pub async fn load(&mut self) {
        let result = self.app.client().recipes().list(&self.query).await;
        let sourced = or_fixture(result, "recipes", || mock_recipes().to_vec());
        self.source = sourced.source;
        self.recipes = sourced.value;
    }

    /// Loaded recipes passing the search and category filters
    pub fn filtered(&self) -> Vec<&Recipe> {
        self.recipes.iter().filter(|r| self.query.matches(r)).collect()
    }

    /// First [`LATEST_COUNT`] filtered recipes
    pub fn latest(&self) -> Vec<&Recipe> {
        self.filtered().into_iter().take(LATEST_COUNT).collect()
    }

    /// The next [`MORE_COUNT`] filtered recipes
    pub fn more(&self) -> Vec<&Recipe> {
        self.filtered()
            .into_iter()
            .skip(LATEST_COUNT)
            .take(MORE_COUNT)
            .collect()
    }
}
