//! Create and edit recipe forms

use crate::App;
use masakin_api_client::endpoints::RecipePayload;
use masakin_api_client::{ApiError, Recipe};
use masakin_core::route::Route;
use masakin_core::validation::Validator;
use masakin_core::{Error, Result};
use tracing::{info, instrument, warn};

/// Servings sent with every recipe
const DEFAULT_PORTION: u32 = 2;
const DEFAULT_DIFFICULTY: &str = "medium";

/// Which list a row operation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Ingredients,
    Steps,
}

/// Raw form fields as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeForm {
    pub title: String,
    pub description: String,
    /// Minutes, as typed
    pub cooking_time: String,
    pub category: String,
    pub image_url: String,
    pub video_url: String,
    ingredients: Vec<String>,
    steps: Vec<String>,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            cooking_time: String::new(),
            category: String::new(),
            image_url: String::new(),
            video_url: String::new(),
            ingredients: vec![String::new()],
            steps: vec![String::new()],
        }
    }
}

impl RecipeForm {
    /// Empty form with one blank ingredient and one blank step
    pub fn new() -> Self {
        Self::default()
    }

    /// Form prefilled from an existing recipe
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let rows = |items: &[String]| {
            if items.is_empty() {
                vec![String::new()]
            } else {
                items.to_vec()
            }
        };
        Self {
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            cooking_time: recipe
                .cooking_time
                .map(|m| m.to_string())
                .unwrap_or_default(),
            category: recipe.category.clone(),
            image_url: recipe.images.first().cloned().unwrap_or_default(),
            video_url: recipe.video_url.clone().unwrap_or_default(),
            ingredients: rows(recipe.ingredients.as_slice()),
            steps: rows(recipe.steps.as_slice()),
        }
    }

    pub fn rows(&self, field: ListField) -> &[String] {
        match field {
            ListField::Ingredients => &self.ingredients,
            ListField::Steps => &self.steps,
        }
    }

    fn rows_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::Ingredients => &mut self.ingredients,
            ListField::Steps => &mut self.steps,
        }
    }

    /// Append a blank row
    pub fn add_row(&mut self, field: ListField) {
        self.rows_mut(field).push(String::new());
    }

    /// Remove a row; the last remaining row is kept
    pub fn remove_row(&mut self, field: ListField, index: usize) {
        let rows = self.rows_mut(field);
        if rows.len() > 1 && index < rows.len() {
            rows.remove(index);
        }
    }

    /// Replace all rows; an empty list leaves one blank row
    pub fn set_rows(&mut self, field: ListField, rows: Vec<String>) {
        let target = self.rows_mut(field);
        *target = rows;
        if target.is_empty() {
            target.push(String::new());
        }
    }

    /// Replace a row's text; out-of-range indices are ignored
    pub fn set_row(&mut self, field: ListField, index: usize, value: impl Into<String>) {
        if let Some(row) = self.rows_mut(field).get_mut(index) {
            *row = value.into();
        }
    }

    /// Check the form and build the request body, or the message to show
    pub fn to_payload(&self) -> std::result::Result<RecipePayload, &'static str> {
        let required = Validator::new()
            .required("title", &self.title)
            .required("description", &self.description)
            .required("category", &self.category)
            .required("cookingTime", &self.cooking_time)
            .validate();
        if !required.is_valid() {
            return Err("Please fill in all required fields");
        }

        const BAD_TIME: &str = "Cooking time must be a positive number of minutes";
        let minutes = Validator::new()
            .positive_integer("cookingTime", &self.cooking_time)
            .validate();
        if !minutes.is_valid() {
            return Err(BAD_TIME);
        }
        let cooking_time = self.cooking_time.trim().parse::<u32>().map_err(|_| BAD_TIME)?;

        let keep = |rows: &[String]| -> Vec<String> {
            rows.iter()
                .map(|r| r.trim())
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .collect()
        };
        let ingredients = keep(self.ingredients.as_slice());
        let steps = keep(self.steps.as_slice());
        let lists = Validator::new()
            .non_empty_list("ingredients", &ingredients)
            .non_empty_list("steps", &steps)
            .validate();
        if !lists.is_valid() {
            return Err("Please add at least one ingredient and one step");
        }

        let image = self.image_url.trim();
        Ok(RecipePayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            cooking_time,
            category: self.category.clone(),
            ingredients,
            steps,
            images: if image.is_empty() {
                Vec::new()
            } else {
                vec![image.to_string()]
            },
            video_url: self.video_url.trim().to_string(),
            portion: DEFAULT_PORTION,
            difficulty: DEFAULT_DIFFICULTY.to_string(),
        })
    }
}

/// Whether the editor creates a new recipe or replaces an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(String),
}

/// Recipe editor page state
pub struct RecipeEditor {
    app: App,
    mode: EditorMode,
    pub form: RecipeForm,
    error: Option<String>,
}

impl RecipeEditor {
    /// Blank editor; requires a signed-in user
    pub fn create(app: App) -> Result<Self> {
        if !app.session().is_authenticated() {
            return Err(Error::not_authenticated());
        }
        Ok(Self {
            app,
            mode: EditorMode::Create,
            form: RecipeForm::new(),
            error: None,
        })
    }

    /// Editor prefilled with recipe `id`
    ///
    /// A failed load leaves an empty form with the error
    /// `"Failed to load recipe data."`.
    #[instrument(skip(app))]
    pub async fn edit(app: App, id: &str) -> Result<Self> {
        if !app.session().is_authenticated() {
            return Err(Error::not_authenticated());
        }
        let (form, error) = match app.client().recipes().get(id).await {
            Ok(recipe) => (RecipeForm::from_recipe(&recipe), None),
            Err(e) => {
                warn!(error = %e, "Failed to fetch recipe for editing");
                (RecipeForm::new(), Some("Failed to load recipe data.".to_string()))
            }
        };
        Ok(Self {
            app,
            mode: EditorMode::Edit(id.to_string()),
            form,
            error,
        })
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate and send; on success navigates to the recipe page
    pub async fn submit(&mut self) -> bool {
        self.error = None;
        let payload = match self.form.to_payload() {
            Ok(payload) => payload,
            Err(message) => {
                self.error = Some(message.to_string());
                return false;
            }
        };

        let recipes = self.app.client().recipes();
        match &self.mode {
            EditorMode::Create => match recipes.create(&payload).await {
                Ok(created) => {
                    info!(recipe_id = ?created.as_ref().map(|r| &r.id), "Recipe created");
                    self.app.notifier().success("Recipe created successfully");
                    let route = created
                        .map(|r| Route::RecipeDetail(r.id))
                        .unwrap_or(Route::Profile);
                    self.app.navigate(route);
                    true
                }
                Err(e) => {
                    warn!(error = %e, "Failed to create recipe");
                    self.error = failure_message(&e, "Failed to create recipe");
                    false
                }
            },
            EditorMode::Edit(id) => match recipes.update(id, &payload).await {
                Ok(_) => {
                    info!(recipe_id = %id, "Recipe updated");
                    self.app.navigate(Route::RecipeDetail(id.clone()));
                    true
                }
                Err(e) => {
                    warn!(recipe_id = %id, error = %e, "Failed to update recipe");
                    self.error = failure_message(&e, "Failed to update recipe");
                    false
                }
            },
        }
    }
}

/// Inline error for a failed submit; a 401 is handled by the sign-out redirect
fn failure_message(error: &ApiError, fallback: &str) -> Option<String> {
    (!error.is_unauthorized()).then(|| error.user_message(fallback))
}
