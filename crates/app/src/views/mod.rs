//! Page view models
//!
//! Each view owns the state a renderer shows for one route and the
//! actions the page offers. Views never hold a lock across a request.

mod auth;
mod detail;
mod discover;
mod editor;
mod home;
mod profile;

pub use auth::{LoginForm, RegisterForm};
pub use detail::{youtube_embed_url, DetailView};
pub use discover::{DiscoverResults, DiscoverView, DEBOUNCE};
pub use editor::{EditorMode, ListField, RecipeEditor, RecipeForm};
pub use home::{HomeView, LATEST_COUNT, MORE_COUNT};
pub use profile::{ProfileView, DEFAULT_BIO};
