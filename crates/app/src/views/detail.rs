//! Single recipe page

use crate::fixtures::{find_mock_recipe, DataSource};
use crate::interaction::RecipeInteractions;
use crate::App;
use masakin_api_client::Recipe;
use masakin_core::route::Route;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, instrument, warn};

static YOUTUBE_ID: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*").ok()
});

/// Embeddable player URL for a YouTube link, if the video id is well formed
pub fn youtube_embed_url(url: &str) -> Option<String> {
    let re = YOUTUBE_ID.as_ref()?;
    let id = re.captures(url)?.get(2)?.as_str();
    (id.len() == 11).then(|| format!("https://www.youtube.com/embed/{id}"))
}

/// Recipe detail state
pub struct DetailView {
    app: App,
    id: String,
    recipe: Option<Recipe>,
    source: DataSource,
    interactions: Option<RecipeInteractions>,
}

impl DetailView {
    /// Load a recipe; on failure the sample with the same id is shown, if any
    #[instrument(skip(app))]
    pub async fn load(app: App, id: &str) -> Self {
        let (recipe, source) = match app.client().recipes().get(id).await {
            Ok(recipe) => (Some(recipe), DataSource::Network),
            Err(e) => {
                warn!(error = %e, "Failed to fetch recipe, using sample data");
                (find_mock_recipe(id).cloned(), DataSource::Fixture)
            }
        };
        let interactions = recipe
            .as_ref()
            .map(|r| RecipeInteractions::new(app.client().clone(), app.notifier_handle(), r));
        Self {
            app,
            id: id.to_string(),
            recipe,
            source,
            interactions,
        }
    }

    /// `None` renders the not-found state
    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    /// Save, reaction and follow toggles
    pub fn interactions(&self) -> Option<&RecipeInteractions> {
        self.interactions.as_ref()
    }

    /// Whether the signed-in user wrote this recipe
    pub fn is_author(&self) -> bool {
        let Some(author_id) = self.recipe.as_ref().and_then(|r| r.author_id.as_deref()) else {
            return false;
        };
        self.app
            .session()
            .user()
            .is_some_and(|user| user.id == author_id)
    }

    /// Embeddable video, when the recipe links a YouTube video
    pub fn embed_url(&self) -> Option<String> {
        self.recipe
            .as_ref()
            .and_then(|r| r.video_url.as_deref())
            .and_then(youtube_embed_url)
    }

    /// Open the editor for this recipe
    pub fn edit(&self) {
        self.app.navigate(Route::EditRecipe(self.id.clone()));
    }

    /// Delete the recipe and go to the profile page; `false` when it failed
    pub async fn delete(&self) -> bool {
        match self.app.client().recipes().delete(&self.id).await {
            Ok(()) => {
                info!(recipe_id = %self.id, "Recipe deleted");
                self.app.notifier().success("Recipe deleted successfully");
                self.app.navigate(Route::Profile);
                true
            }
            Err(e) => {
                warn!(recipe_id = %self.id, error = %e, "Failed to delete recipe");
                if !e.is_unauthorized() {
                    self.app.notifier().error("Failed to delete recipe");
                }
                false
            }
        }
    }
}
