//! Save, react and follow toggles

use crate::context::Context;
use crate::output;
use anyhow::{anyhow, bail, Result};
use masakin_app::views::DetailView;
use masakin_app::ToggleOutcome;

#[derive(Debug, Clone, Copy)]
pub enum Kind {
    Save,
    React,
    Follow,
}

pub async fn run(ctx: &Context, id: &str, kind: Kind) -> Result<()> {
    if !ctx.app.session().is_authenticated() {
        bail!("Sign in first with `masakin login`");
    }
    let view = DetailView::load(ctx.app.clone(), id).await;
    let interactions = view
        .interactions()
        .ok_or_else(|| anyhow!("Recipe {id} not found"))?;

    let outcome = match kind {
        Kind::Save => interactions.toggle_save().await,
        Kind::React => interactions.toggle_reaction().await,
        Kind::Follow => interactions.toggle_follow().await,
    };

    match outcome {
        ToggleOutcome::Committed(_) => {
            if ctx.json() {
                return output::json(&serde_json::json!({
                    "saved": interactions.is_saved(),
                    "reacted": interactions.is_reacted(),
                    "following": interactions.is_following(),
                }));
            }
            println!(
                "  {}   {}   {}",
                output::flag("saved", interactions.is_saved()),
                output::flag("liked", interactions.is_reacted()),
                output::flag("following author", interactions.is_following())
            );
            Ok(())
        }
        ToggleOutcome::RolledBack(_) => bail!("The change was not saved"),
        ToggleOutcome::Ignored => bail!("This recipe has no author to follow"),
    }
}
