//! Request/response interception
//!
//! Every request passes through the [`AuthInterceptor`] on the way out and
//! every response on the way back.

mod auth;

pub use auth::{AuthInterceptor, Interception, LOGIN_PATH};
