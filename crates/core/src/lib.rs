//! Core building blocks for the Masakin client
//!
//! This crate holds the pieces every other crate in the workspace shares:
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Validation**: form checks that run before any request is sent
//! - **Storage**: durable token/user persistence with atomic pair writes
//! - **Session**: the single process-wide authentication store
//! - **Routes**: client-side locations and the [`route::Navigator`] seam
//!
//! # Example
//!
//! ```rust
//! use masakin_core::session::{SessionStore, UserSummary};
//! use masakin_core::storage::MemoryStorage;
//!
//! let session = SessionStore::open(MemoryStorage::new()).unwrap();
//! assert!(!session.is_authenticated());
//! session.login("token", UserSummary::new("u1", "Rina")).unwrap();
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod route;
pub mod session;
pub mod storage;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Error, ErrorCode, Result, ResultExt};
    pub use crate::route::{Navigator, Route};
    pub use crate::session::{Session, SessionStore, UserSummary};
    pub use crate::storage::{FileStorage, MemoryStorage, SessionStorage, StoredSession};
    pub use crate::validation::{ValidationResult, Validator};
}
