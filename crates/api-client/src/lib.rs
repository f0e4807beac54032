//! API client for the Masakin recipe backend
//!
//! This crate is the data layer between the Masakin views and the REST
//! backend.
//!
//! # Features
//!
//! - **Environment-based configuration**: base URL and timeout from env vars
//! - **Credential injection**: bearer token from the shared session
//! - **Global 401 handling**: ends the session and redirects to `/login`
//! - **Envelope-tolerant normalization**: stable view models for recipes and users
//! - **Request correlation**: every request carries a unique `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use masakin_api_client::{MasakinClient, endpoints::RecipeQuery};
//! use masakin_core::route::{Navigator, Route};
//! use masakin_core::session::SessionStore;
//! use masakin_core::storage::FileStorage;
//! use std::sync::Arc;
//!
//! struct Stdout;
//! impl Navigator for Stdout {
//!     fn navigate(&self, route: Route) { println!("-> {route}"); }
//!     fn hard_redirect(&self, route: Route) { println!("=> {route}"); }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = SessionStore::open(FileStorage::default_location())?;
//!     let client = MasakinClient::new(session, Arc::new(Stdout))?;
//!
//!     let recipes = client.recipes().list(&RecipeQuery::new().with_search("soto")).await?;
//!     println!("Found {} recipes", recipes.len());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod normalize;
pub mod transport;

pub use client::MasakinClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use normalize::{AuthGrant, Recipe, UserProfile};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::MasakinClient;
    pub use crate::config::ClientConfig;
    pub use crate::endpoints::{
        AuthApi, FollowsApi, LoginRequest, ProfileApi, ReactionsApi, RecipePayload, RecipeQuery,
        RecipesApi, RegisterRequest, SavesApi,
    };
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::normalize::{AuthGrant, Recipe, UserProfile};
    pub use crate::transport::{ApiRequest, HttpTransport, RawResponse};
}
