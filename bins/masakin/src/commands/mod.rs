//! CLI command implementations

pub mod auth;
pub mod interact;
pub mod profile;
pub mod recipes;
