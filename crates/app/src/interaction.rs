//! Optimistic save, reaction and follow toggles
//!
//! A toggle flips its displayed value before the server call is issued
//! and rolls back if the call fails:
//!
//! ```text
//! Settled(v) --toggle--> Pending { optimistic: !v, prior: v }
//! Pending    --ok------> Settled(optimistic)
//! Pending    --err-----> Settled(prior)
//! ```
//!
//! Toggling while a call is in flight is ignored and issues no call.

use crate::notify::Notifier;
use masakin_api_client::{ApiError, ApiResult, MasakinClient, Recipe};
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Displayed state of a boolean interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    Settled(bool),
    Pending { optimistic: bool, prior: bool },
}

impl ToggleState {
    /// Value to display
    pub fn value(self) -> bool {
        match self {
            Self::Settled(value) => value,
            Self::Pending { optimistic, .. } => optimistic,
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// Result of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A call was already in flight, or the toggle does not apply
    Ignored,
    /// The server accepted; holds the new value
    Committed(bool),
    /// The server call failed; holds the restored value
    RolledBack(bool),
}

/// One optimistic boolean, shareable across tasks
#[derive(Debug, Clone)]
pub struct InteractionToggle {
    state: Arc<Mutex<ToggleState>>,
}

impl InteractionToggle {
    pub fn new(initial: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(ToggleState::Settled(initial))),
        }
    }

    pub fn state(&self) -> ToggleState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn value(&self) -> bool {
        self.state().value()
    }

    /// Flip optimistically; `None` while a call is pending
    fn begin(&self) -> Option<bool> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match *state {
            ToggleState::Pending { .. } => None,
            ToggleState::Settled(prior) => {
                *state = ToggleState::Pending {
                    optimistic: !prior,
                    prior,
                };
                Some(!prior)
            }
        }
    }

    fn settle(&self, succeeded: bool) -> ToggleOutcome {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match *state {
            ToggleState::Pending { optimistic, prior } => {
                if succeeded {
                    *state = ToggleState::Settled(optimistic);
                    ToggleOutcome::Committed(optimistic)
                } else {
                    *state = ToggleState::Settled(prior);
                    ToggleOutcome::RolledBack(prior)
                }
            }
            ToggleState::Settled(_) => ToggleOutcome::Ignored,
        }
    }

    /// Flip, then run `call` with the target value and settle on its result
    ///
    /// A rolled-back call also hands back its error.
    pub async fn toggle<F, Fut, E>(&self, call: F) -> (ToggleOutcome, Option<E>)
    where
        F: FnOnce(bool) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        let Some(target) = self.begin() else {
            debug!("Toggle ignored while a call is pending");
            return (ToggleOutcome::Ignored, None);
        };
        match call(target).await {
            Ok(()) => (self.settle(true), None),
            Err(e) => {
                warn!(target_value = target, error = %e, "Interaction failed, rolling back");
                (self.settle(false), Some(e))
            }
        }
    }
}

/// Reaction, save and follow toggles for one displayed recipe
#[derive(Clone)]
pub struct RecipeInteractions {
    client: MasakinClient,
    notifier: Arc<dyn Notifier>,
    recipe_id: String,
    author: String,
    author_id: Option<String>,
    reaction: InteractionToggle,
    save: InteractionToggle,
    follow: InteractionToggle,
}

impl RecipeInteractions {
    /// Seed the toggles from the recipe's flags
    pub fn new(client: MasakinClient, notifier: Arc<dyn Notifier>, recipe: &Recipe) -> Self {
        Self {
            client,
            notifier,
            recipe_id: recipe.id.clone(),
            author: recipe.author.clone(),
            author_id: recipe.author_id.clone(),
            reaction: InteractionToggle::new(recipe.is_reacted),
            save: InteractionToggle::new(recipe.is_saved),
            follow: InteractionToggle::new(recipe.is_following_author),
        }
    }

    pub fn is_reacted(&self) -> bool {
        self.reaction.value()
    }

    pub fn is_saved(&self) -> bool {
        self.save.value()
    }

    pub fn is_following(&self) -> bool {
        self.follow.value()
    }

    pub fn reaction(&self) -> &InteractionToggle {
        &self.reaction
    }

    pub fn save(&self) -> &InteractionToggle {
        &self.save
    }

    pub fn follow(&self) -> &InteractionToggle {
        &self.follow
    }

    /// Like or unlike; silent on success
    pub async fn toggle_reaction(&self) -> ToggleOutcome {
        let reactions = self.client.reactions();
        let id = self.recipe_id.as_str();
        let (outcome, error) = self
            .reaction
            .toggle(|react| async move {
                if react {
                    reactions.react(id).await
                } else {
                    reactions.unreact(id).await
                }
            })
            .await;
        if let ToggleOutcome::RolledBack(_) = outcome {
            self.report_failure(error.as_ref(), "Failed to update reaction");
        }
        outcome
    }

    /// Bookmark or un-bookmark
    pub async fn toggle_save(&self) -> ToggleOutcome {
        let saves = self.client.saves();
        let id = self.recipe_id.as_str();
        let (outcome, error) = self
            .save
            .toggle(|save| async move {
                if save {
                    saves.save(id).await
                } else {
                    saves.unsave(id).await
                }
            })
            .await;
        match outcome {
            ToggleOutcome::Committed(true) => self.notifier.success("Recipe saved successfully"),
            ToggleOutcome::Committed(false) => self.notifier.success("Recipe removed from saved"),
            ToggleOutcome::RolledBack(_) => {
                self.report_failure(error.as_ref(), "Failed to save recipe. Please try again.")
            }
            ToggleOutcome::Ignored => {}
        }
        outcome
    }

    /// Follow or unfollow the author; ignored when the author is unknown
    pub async fn toggle_follow(&self) -> ToggleOutcome {
        let Some(author_id) = self.author_id.as_deref() else {
            return ToggleOutcome::Ignored;
        };
        let follows = self.client.follows();
        let (outcome, error) = self
            .follow
            .toggle(|follow| async move {
                let result: ApiResult<()> = if follow {
                    follows.follow(author_id).await
                } else {
                    follows.unfollow(author_id).await
                };
                result
            })
            .await;
        match outcome {
            ToggleOutcome::Committed(true) => {
                self.notifier.success(&format!("Following {}", self.author))
            }
            ToggleOutcome::Committed(false) => {
                self.notifier.success(&format!("Unfollowed {}", self.author))
            }
            ToggleOutcome::RolledBack(_) => {
                self.report_failure(error.as_ref(), "Failed to update follow status")
            }
            ToggleOutcome::Ignored => {}
        }
        outcome
    }

    /// A 401 already ended the session and redirected; nothing to show here
    fn report_failure(&self, error: Option<&ApiError>, message: &str) {
        if error.is_some_and(ApiError::is_unauthorized) {
            return;
        }
        self.notifier.error(message);
    }
}
