//! Recipe browsing and authoring commands

use crate::context::Context;
use crate::output;
use anyhow::{anyhow, bail, Result};
use clap::Args;
use masakin_app::views::{DetailView, DiscoverView, HomeView, ListField, RecipeEditor, RecipeForm};
use masakin_core::route::Route;
use owo_colors::OwoColorize;

/// Recipe fields accepted by `create` and `edit`
#[derive(Args, Debug, Default)]
pub struct RecipeFields {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Minutes
    #[arg(long)]
    pub cooking_time: Option<u32>,

    #[arg(long)]
    pub category: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,

    /// YouTube link
    #[arg(long)]
    pub video: Option<String>,

    /// Ingredient line (repeatable)
    #[arg(long)]
    pub ingredient: Vec<String>,

    /// Step (repeatable, in order)
    #[arg(long)]
    pub step: Vec<String>,
}

impl RecipeFields {
    fn apply(self, form: &mut RecipeForm) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(minutes) = self.cooking_time {
            form.cooking_time = minutes.to_string();
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(image) = self.image {
            form.image_url = image;
        }
        if let Some(video) = self.video {
            form.video_url = video;
        }
        if !self.ingredient.is_empty() {
            form.set_rows(ListField::Ingredients, self.ingredient);
        }
        if !self.step.is_empty() {
            form.set_rows(ListField::Steps, self.step);
        }
    }
}

pub async fn home(ctx: &Context, search: Option<&str>, category: &str) -> Result<()> {
    let mut view = HomeView::new(ctx.app.clone(), search);
    view.select_category(category);
    view.load().await;

    if ctx.json() {
        return output::json(&serde_json::json!({
            "latest": view.latest(),
            "more": view.more(),
        }));
    }

    output::header("🍳 Explore Our Latest Recipes");
    output::source_note(view.source());
    output::recipe_table(&view.latest());
    if !view.more().is_empty() {
        println!();
        println!("  {}", "More Recipes".bold());
        output::recipe_table(&view.more());
    }
    Ok(())
}

pub async fn discover(ctx: &Context, search: Option<String>, category: Option<String>) -> Result<()> {
    let params: Vec<(String, String)> = [("search", search), ("category", category)]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
        .collect();
    let mut view = DiscoverView::spawn(ctx.app.clone(), &params);
    let results = view
        .settled()
        .await
        .ok_or_else(|| anyhow!("Search was interrupted"))?;

    if ctx.json() {
        return output::json(&results.recipes);
    }

    output::header("🔎 Discover Recipes");
    output::source_note(results.source);
    output::recipe_table(&results.recipes.iter().collect::<Vec<_>>());
    Ok(())
}

pub async fn show(ctx: &Context, id: &str) -> Result<()> {
    let view = DetailView::load(ctx.app.clone(), id).await;
    let Some(recipe) = view.recipe() else {
        bail!("Recipe {id} not found");
    };

    if ctx.json() {
        return output::json(recipe);
    }

    output::recipe_detail(recipe, view.embed_url().as_deref());
    if let Some(interactions) = view.interactions() {
        println!();
        println!(
            "  {}   {}   {}",
            output::flag("saved", interactions.is_saved()),
            output::flag("liked", interactions.is_reacted()),
            output::flag("following author", interactions.is_following())
        );
    }
    if view.is_author() {
        println!("  {}", "You wrote this recipe.".dimmed());
    }
    Ok(())
}

pub async fn create(ctx: &Context, fields: RecipeFields) -> Result<()> {
    let mut editor = RecipeEditor::create(ctx.app.clone())
        .map_err(|_| anyhow!("Sign in first with `masakin login`"))?;
    fields.apply(&mut editor.form);
    submit(ctx, &mut editor).await
}

pub async fn edit(ctx: &Context, id: &str, fields: RecipeFields) -> Result<()> {
    let mut editor = RecipeEditor::edit(ctx.app.clone(), id)
        .await
        .map_err(|_| anyhow!("Sign in first with `masakin login`"))?;
    if let Some(error) = editor.error() {
        bail!("{error}");
    }
    fields.apply(&mut editor.form);
    submit(ctx, &mut editor).await
}

async fn submit(ctx: &Context, editor: &mut RecipeEditor) -> Result<()> {
    if !editor.submit().await {
        bail!("{}", editor.error().unwrap_or("The recipe was not saved"));
    }
    match ctx.history.current() {
        Route::RecipeDetail(id) if !ctx.json() => {
            println!("  {} Saved as {}", "✓".green(), id.cyan());
        }
        Route::RecipeDetail(id) => output::json(&serde_json::json!({ "id": id }))?,
        _ => {}
    }
    Ok(())
}

pub async fn delete(ctx: &Context, id: &str) -> Result<()> {
    let view = DetailView::load(ctx.app.clone(), id).await;
    if view.recipe().is_none() {
        bail!("Recipe {id} not found");
    }
    if !view.delete().await {
        bail!("Recipe {id} was not deleted");
    }
    Ok(())
}
