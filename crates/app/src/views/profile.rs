//! Signed-in user's page

use crate::App;
use masakin_api_client::{Recipe, UserProfile};
use masakin_core::session::UserSummary;
use masakin_core::{Error, Result};
use tracing::{debug, info, instrument, warn};

/// Bio shown when the user has not written one
pub const DEFAULT_BIO: &str = "Food enthusiast & home cook";

/// Profile page state
pub struct ProfileView {
    app: App,
    user: UserSummary,
    recipes: Vec<Recipe>,
    stats: Option<UserProfile>,
    error: Option<String>,
}

impl ProfileView {
    /// Profile of the session user; fails when nobody is signed in
    pub fn new(app: App) -> Result<Self> {
        let user = app.session().user().ok_or_else(Error::not_authenticated)?;
        Ok(Self {
            app,
            user,
            recipes: Vec::new(),
            stats: None,
            error: None,
        })
    }

    pub fn user(&self) -> &UserSummary {
        &self.user
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Follower and recipe counters, when the backend provided them
    pub fn stats(&self) -> Option<&UserProfile> {
        self.stats.as_ref()
    }

    /// Inline error; there is no sample fallback on this page
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Uppercased first letter of the name, `U` when nameless
    pub fn initial(&self) -> String {
        self.user
            .name
            .chars()
            .next()
            .map_or_else(|| "U".to_string(), |c| c.to_uppercase().collect())
    }

    pub fn bio(&self) -> &str {
        self.user
            .bio
            .as_deref()
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_BIO)
    }

    /// Load the user's recipes, then their counters
    #[instrument(skip(self), fields(user_id = %self.user.id))]
    pub async fn load(&mut self) {
        self.error = None;
        match self.app.client().profile().user_recipes(&self.user).await {
            Ok(recipes) => self.recipes = recipes,
            Err(e) => {
                warn!(error = %e, "Failed to fetch user recipes");
                self.error = Some("Could not load your recipes.".to_string());
                return;
            }
        }

        match self.app.client().profile().user(&self.user.id).await {
            Ok(stats) => self.stats = Some(stats),
            Err(e) => debug!(error = %e, "Profile counters unavailable"),
        }
    }

    /// End the session
    pub fn logout(&self) -> Result<()> {
        self.app.session().logout()?;
        info!(user_id = %self.user.id, "Logged out");
        self.app.notifier().success("Logged out successfully");
        Ok(())
    }
}
