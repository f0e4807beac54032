//! Process-wide authentication state
//!
//! [`SessionStore`] is the single shared session for the whole process. It
//! has two states:
//!
//! - **anonymous**: no token
//! - **authenticated**: token present, user usually present
//!
//! Transitions are `login`, `logout` and `rehydrate` (run once at start-up).
//! Every transition is persisted through a [`SessionStorage`] and published
//! on a `watch` channel so dependent views can react.
//!
//! # Example
//!
//! ```rust
//! use masakin_core::session::{SessionStore, UserSummary};
//! use masakin_core::storage::MemoryStorage;
//!
//! let store = SessionStore::new(MemoryStorage::new());
//! store.login("jwt", UserSummary::new("u1", "Rina")).unwrap();
//! assert!(store.is_authenticated());
//!
//! store.logout().unwrap();
//! assert!(store.token().is_none());
//! ```

use crate::error::{Error, Result};
use crate::storage::{SessionStorage, StoredSession};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Minimal identity of a signed-in or displayed user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Identity key; older payloads call it `_id`
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Short biography
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Email, when the backend returns it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserSummary {
    /// User with just an id and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
            bio: None,
            email: None,
        }
    }
}

/// Snapshot of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<UserSummary>,
}

impl Session {
    /// No credentials
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Token and user together
    pub fn authenticated(token: impl Into<String>, user: UserSummary) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    /// Token restored without a user record
    pub fn token_only(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user: None,
        }
    }

    /// Bearer token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Signed-in user, if known
    pub fn user(&self) -> Option<&UserSummary> {
        self.user.as_ref()
    }

    /// Authenticated means a token is held
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

struct Inner {
    storage: Box<dyn SessionStorage>,
    state: watch::Sender<Session>,
}

/// Shared handle to the process-wide session
///
/// Cloning is cheap; every clone observes the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl SessionStore {
    /// Anonymous store over the given storage; call [`rehydrate`](Self::rehydrate) to restore
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        let (state, _) = watch::channel(Session::anonymous());
        Self {
            inner: Arc::new(Inner {
                storage: Box::new(storage),
                state,
            }),
        }
    }

    /// Create the store and restore any persisted session
    pub fn open(storage: impl SessionStorage + 'static) -> Result<Self> {
        let store = Self::new(storage);
        store.rehydrate()?;
        Ok(store)
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Current bearer token
    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token.clone()
    }

    /// Current user
    pub fn user(&self) -> Option<UserSummary> {
        self.inner.state.borrow().user.clone()
    }

    /// Whether a token is held
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Store credentials; persists token and user together, then publishes
    pub fn login(&self, token: impl Into<String>, user: UserSummary) -> Result<()> {
        let token = token.into();
        let user_json = serde_json::to_string(&user)?;
        self.inner
            .storage
            .store(&StoredSession::new(token.clone(), user_json))?;

        info!(user_id = %user.id, "Session started");
        self.inner
            .state
            .send_replace(Session::authenticated(token, user));
        Ok(())
    }

    /// Drop credentials; safe to call when already anonymous
    pub fn logout(&self) -> Result<()> {
        let was_authenticated = self.is_authenticated();
        self.inner.storage.clear()?;
        self.inner.state.send_replace(Session::anonymous());
        if was_authenticated {
            info!("Session ended");
        }
        Ok(())
    }

    /// Restore from durable storage
    ///
    /// - token and parseable user: authenticated
    /// - token and unparseable user: treated as corrupt, logged out
    /// - token only: token restored without a user
    /// - nothing stored: anonymous
    pub fn rehydrate(&self) -> Result<Session> {
        let stored = match self.inner.storage.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Stored session unreadable, clearing it");
                self.logout()?;
                return Ok(Session::anonymous());
            }
        };

        let session = match (stored.token, stored.user) {
            (Some(token), Some(user_json)) => {
                match serde_json::from_str::<UserSummary>(&user_json) {
                    Ok(user) => Session::authenticated(token, user),
                    Err(e) => {
                        let err = Error::corrupt_session(format!("Stored user is invalid: {e}"));
                        warn!(error = %err, "Discarding corrupt session");
                        self.logout()?;
                        return Ok(Session::anonymous());
                    }
                }
            }
            (Some(token), None) => Session::token_only(token),
            (None, _) => Session::anonymous(),
        };

        debug!(authenticated = session.is_authenticated(), "Session rehydrated");
        self.inner.state.send_replace(session.clone());
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use tempfile::TempDir;

    fn rina() -> UserSummary {
        UserSummary {
            id: "u-1".to_string(),
            name: "Rina".to_string(),
            avatar: Some("https://cdn.masakin.app/a/rina.png".to_string()),
            bio: Some("Sambal enthusiast".to_string()),
            email: None,
        }
    }

    #[test]
    fn test_login_then_rehydrate_after_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::new(FileStorage::new(&path));
        store.login("t-123", rina()).unwrap();
        drop(store);

        let restarted = SessionStore::open(FileStorage::new(&path)).unwrap();
        let session = restarted.snapshot();
        assert_eq!(session.token(), Some("t-123"));
        assert_eq!(session.user(), Some(&rina()));
    }

    #[test]
    fn test_logout_clears_memory_and_storage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::new(FileStorage::new(&path));

        store.login("t", rina()).unwrap();
        store.logout().unwrap();

        assert_eq!(store.snapshot(), Session::anonymous());
        assert!(!path.exists());
        // idempotent
        store.logout().unwrap();
    }

    /// Memory storage whose `clear` always fails
    struct StickyStorage(MemoryStorage);

    impl SessionStorage for StickyStorage {
        fn load(&self) -> Result<StoredSession> {
            self.0.load()
        }

        fn store(&self, session: &StoredSession) -> Result<()> {
            self.0.store(session)
        }

        fn clear(&self) -> Result<()> {
            Err(Error::internal("disk is read-only"))
        }
    }

    #[test]
    fn test_failed_logout_keeps_memory_in_step_with_storage() {
        let store = SessionStore::new(StickyStorage(MemoryStorage::new()));
        store.login("t", rina()).unwrap();

        assert!(store.logout().is_err());
        assert!(store.is_authenticated());
        assert_eq!(store.inner.storage.load().unwrap().token.as_deref(), Some("t"));
    }

    #[test]
    fn test_corrupt_user_transitions_to_anonymous() {
        let store = SessionStore::new(MemoryStorage::with_entries(Some("t"), Some("{not json")));
        let session = store.rehydrate().unwrap();

        assert!(!session.is_authenticated());
        assert!(store.token().is_none());
        let stored = store.inner.storage.load().unwrap();
        assert!(stored.is_empty());
    }

    #[test]
    fn test_token_without_user_is_kept() {
        let store = SessionStore::new(MemoryStorage::with_entries(Some("t"), None));
        let session = store.rehydrate().unwrap();
        assert_eq!(session.token(), Some("t"));
        assert!(session.user().is_none());
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_user_without_token_is_anonymous() {
        let store = SessionStore::new(MemoryStorage::with_entries(None, Some(r#"{"id":"1"}"#)));
        assert_eq!(store.rehydrate().unwrap(), Session::anonymous());
    }

    #[test]
    fn test_legacy_underscore_id_is_accepted() {
        let store = SessionStore::new(MemoryStorage::with_entries(
            Some("t"),
            Some(r#"{"_id":"abc","name":"Dewi"}"#),
        ));
        let session = store.rehydrate().unwrap();
        assert_eq!(session.user().map(|u| u.id.as_str()), Some("abc"));
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new(MemoryStorage::new());
        let view_handle = store.clone();
        store.login("t", rina()).unwrap();
        assert!(view_handle.is_authenticated());
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let store = SessionStore::new(MemoryStorage::new());
        let mut rx = store.subscribe();

        store.login("t", rina()).unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_authenticated());

        store.logout().unwrap();
        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().is_authenticated());
    }
}
