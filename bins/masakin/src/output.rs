//! Terminal rendering helpers

use masakin_api_client::Recipe;
use masakin_app::{DataSource, Notification, NotificationLevel};
use owo_colors::OwoColorize;
use serde::Serialize;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub fn header(title: &str) {
    println!();
    println!("{}", RULE.blue());
    println!("  {}", title.blue().bold());
    println!("{}", RULE.blue());
    println!();
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn notification(notice: &Notification) {
    match notice.level {
        NotificationLevel::Success => println!("  {} {}", "✓".green(), notice.message),
        NotificationLevel::Error => println!("  {} {}", "✗".red(), notice.message.red()),
        NotificationLevel::Info => println!("  {} {}", "ℹ".blue(), notice.message),
    }
}

pub fn source_note(source: DataSource) {
    if source == DataSource::Fixture {
        println!(
            "  {}",
            "Backend unreachable, showing sample recipes.".yellow()
        );
        println!();
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

pub fn recipe_table(recipes: &[&Recipe]) {
    if recipes.is_empty() {
        println!("  {}", "No recipes found.".dimmed());
        return;
    }
    println!(
        "  {:<26} {:<32} {:<10} {:<8} {}",
        "ID".dimmed(),
        "Title".dimmed(),
        "Category".dimmed(),
        "Time".dimmed(),
        "Author".dimmed()
    );
    for recipe in recipes {
        println!(
            "  {:<26} {:<32} {:<10} {:<8} {}",
            truncate(&recipe.id, 26).cyan(),
            truncate(&recipe.title, 32),
            recipe.category,
            recipe.cook_time,
            recipe.author.dimmed()
        );
    }
}

pub fn recipe_detail(recipe: &Recipe, embed_url: Option<&str>) {
    header(&recipe.title);
    println!("  {} {}", "By".dimmed(), recipe.author.bold());
    println!(
        "  {} · {} · {}",
        recipe.category,
        recipe.cook_time,
        recipe.date.dimmed()
    );
    if !recipe.description.is_empty() {
        println!();
        println!("  {}", recipe.description);
    }

    println!();
    println!("  {}", "Ingredients".bold());
    for item in &recipe.ingredients {
        println!("    • {item}");
    }

    println!();
    println!("  {}", "Steps".bold());
    for (i, step) in recipe.steps.iter().enumerate() {
        println!("    {}. {step}", i + 1);
    }

    if let Some(url) = embed_url {
        println!();
        println!("  {} {}", "Video:".dimmed(), url);
    }
}

pub fn flag(label: &str, on: bool) -> String {
    if on {
        format!("{} {label}", "●".green())
    } else {
        format!("{} {label}", "○".dimmed())
    }
}
