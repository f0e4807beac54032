//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one backend resource. Every
//! method maps to exactly one REST call.
//!
//! | Module | Backend routes |
//! |--------|----------------|
//! | `auth` | `POST /auth/login`, `/auth/register`, `/auth/refresh`, `/auth/logout` |
//! | `recipes` | `GET /recipes`, `GET/PUT/DELETE /recipes/:id`, `POST /recipes` |
//! | `reactions` | `POST/DELETE /recipes/:id/react` |
//! | `saves` | `POST/DELETE /recipes/:id/save` |
//! | `follows` | `POST/DELETE /users/:id/follow` |
//! | `profile` | `GET /users/:id`, `/users/:id/recipes`, `/users/me/analytics` |

pub mod auth;
pub mod follows;
pub mod profile;
pub mod reactions;
pub mod recipes;
pub mod saves;

pub use auth::{AuthApi, LoginRequest, RegisterRequest};
pub use follows::FollowsApi;
pub use profile::ProfileApi;
pub use reactions::ReactionsApi;
pub use recipes::{RecipePayload, RecipeQuery, RecipesApi, ALL_CATEGORIES};
pub use saves::SavesApi;
