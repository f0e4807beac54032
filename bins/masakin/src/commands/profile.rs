//! Profile command

use crate::context::Context;
use crate::output;
use anyhow::{anyhow, Result};
use masakin_app::views::ProfileView;
use owo_colors::OwoColorize;

pub async fn run(ctx: &Context) -> Result<()> {
    let mut view = ProfileView::new(ctx.app.clone())
        .map_err(|_| anyhow!("Sign in first with `masakin login`"))?;
    view.load().await;

    if ctx.json() {
        return output::json(&serde_json::json!({
            "user": view.user(),
            "stats": view.stats(),
            "recipes": view.recipes(),
            "error": view.error(),
        }));
    }

    output::header(&format!("[{}] {}", view.initial(), view.user().name));
    println!("  {}", view.bio().italic());
    if let Some(stats) = view.stats() {
        println!(
            "  {} recipes · {} followers · {} following",
            stats.recipe_count.bold(),
            stats.followers.bold(),
            stats.following.bold()
        );
    }
    println!();

    if let Some(error) = view.error() {
        println!("  {}", error.red());
        return Ok(());
    }
    output::recipe_table(&view.recipes().iter().collect::<Vec<_>>());
    Ok(())
}
