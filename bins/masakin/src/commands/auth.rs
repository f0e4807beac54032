//! Session commands

use crate::context::Context;
use crate::output;
use anyhow::{anyhow, Result};
use masakin_app::views::{LoginForm, RegisterForm};
use owo_colors::OwoColorize;

pub async fn login(ctx: &Context, email: String, password: String) -> Result<()> {
    let mut form = LoginForm::new(email, password);
    if !form.submit(&ctx.app).await {
        return Err(anyhow!(form.error().unwrap_or("Login failed").to_string()));
    }
    whoami(ctx)
}

pub async fn register(ctx: &Context, name: String, email: String, password: String) -> Result<()> {
    let mut form = RegisterForm::new(name, email, password);
    if !form.submit(&ctx.app).await {
        return Err(anyhow!(form.error().unwrap_or("Registration failed").to_string()));
    }
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    let session = ctx.app.session();
    if !session.is_authenticated() {
        println!("  {}", "Not signed in.".dimmed());
        return Ok(());
    }
    session.logout()?;
    println!("  {} Signed out", "✓".green());
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    let session = ctx.app.session().snapshot();
    if ctx.json() {
        return output::json(&serde_json::json!({
            "authenticated": session.is_authenticated(),
            "user": session.user(),
        }));
    }
    match session.user() {
        Some(user) => {
            println!("  {} {}", "Signed in as".dimmed(), user.name.bold());
            if let Some(email) = &user.email {
                println!("  {} {}", "Email:".dimmed(), email);
            }
            println!("  {} {}", "ID:".dimmed(), user.id.cyan());
        }
        None if session.is_authenticated() => {
            println!("  {}", "Signed in (profile not cached).".dimmed());
        }
        None => println!("  {}", "Not signed in.".dimmed()),
    }
    Ok(())
}
