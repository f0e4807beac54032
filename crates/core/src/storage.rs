//! Durable key-value storage for the session
//!
//! Exactly two keys are persisted: `token` (raw string) and `user`
//! (serialized JSON object). Both are always written and cleared together.
//!
//! # Example
//!
//! ```rust
//! use masakin_core::storage::{MemoryStorage, SessionStorage, StoredSession};
//!
//! let storage = MemoryStorage::new();
//! storage.store(&StoredSession::new("tok", r#"{"id":"u1","name":"Ana"}"#)).unwrap();
//! assert_eq!(storage.load().unwrap().token.as_deref(), Some("tok"));
//! ```

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key for the serialized user record
pub const USER_KEY: &str = "user";

/// Environment variable overriding the session file location
pub const SESSION_FILE_ENV: &str = "MASAKIN_SESSION_FILE";

/// Raw contents of durable storage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Raw token string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Serialized user JSON, unparsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl StoredSession {
    /// A stored pair of token and serialized user
    pub fn new(token: impl Into<String>, user_json: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user_json.into()),
        }
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }
}

/// Durable storage backing the session store
///
/// Implementations must make `store` and `clear` atomic over both keys.
pub trait SessionStorage: Send + Sync {
    /// Read both keys
    fn load(&self) -> Result<StoredSession>;

    /// Write both keys in one operation
    fn store(&self, session: &StoredSession) -> Result<()>;

    /// Remove both keys in one operation
    fn clear(&self) -> Result<()>;
}

/// In-process storage, used by tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-populated with raw values, bypassing the pair rule
    pub fn with_entries(token: Option<&str>, user: Option<&str>) -> Self {
        let mut entries = HashMap::new();
        if let Some(token) = token {
            entries.insert(TOKEN_KEY.to_string(), token.to_string());
        }
        if let Some(user) = user {
            entries.insert(USER_KEY.to_string(), user.to_string());
        }
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<StoredSession> {
        let guard = self
            .entries
            .read()
            .map_err(|_| Error::internal("Failed to acquire storage read lock"))?;
        Ok(StoredSession {
            token: guard.get(TOKEN_KEY).cloned(),
            user: guard.get(USER_KEY).cloned(),
        })
    }

    fn store(&self, session: &StoredSession) -> Result<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| Error::internal("Failed to acquire storage write lock"))?;
        guard.clear();
        if let Some(token) = &session.token {
            guard.insert(TOKEN_KEY.to_string(), token.clone());
        }
        if let Some(user) = &session.user {
            guard.insert(USER_KEY.to_string(), user.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries
            .write()
            .map_err(|_| Error::internal("Failed to acquire storage write lock"))?
            .clear();
        Ok(())
    }
}

/// JSON file storage in the user's data directory
///
/// Writes go to a sibling temp file that is then renamed over the target,
/// so readers never observe a token without its user.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at `$MASAKIN_SESSION_FILE`, or `<data dir>/masakin/session.json`
    pub fn default_location() -> Self {
        let path = std::env::var(SESSION_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from(".masakin"))
                    .join("masakin")
                    .join("session.json")
            });
        Self::new(path)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<StoredSession> {
        if !self.path.exists() {
            return Ok(StoredSession::default());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(Error::from)
            .context(format!("Reading {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(StoredSession::default());
        }
        serde_json::from_str(&content)
            .map_err(Error::from)
            .context(format!("Parsing {}", self.path.display()))
    }

    fn store(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        let temp = self.temp_path();
        fs::write(&temp, content)
            .map_err(Error::from)
            .context(format!("Writing {}", temp.display()))?;
        fs::rename(&temp, &self.path)
            .map_err(Error::from)
            .context(format!("Replacing {}", self.path.display()))
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::from(e).with_context(format!("Removing {}", self.path.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_roundtrip_and_clear() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_empty());

        storage.store(&StoredSession::new("t1", "{}")).unwrap();
        let loaded = storage.load().unwrap();
        assert_eq!(loaded.token.as_deref(), Some("t1"));
        assert_eq!(loaded.user.as_deref(), Some("{}"));

        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileStorage::new(&path)
            .store(&StoredSession::new("abc", r#"{"id":"1","name":"Rina"}"#))
            .unwrap();

        let reopened = FileStorage::new(&path);
        let loaded = reopened.load().unwrap();
        assert_eq!(loaded.token.as_deref(), Some("abc"));
        assert!(loaded.user.unwrap().contains("Rina"));
        assert!(!reopened.temp_path().exists());
    }

    #[test]
    fn test_file_storage_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("session.json"));

        storage.clear().unwrap();
        storage.store(&StoredSession::new("abc", "{}")).unwrap();
        storage.clear().unwrap();
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_storage_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let err = FileStorage::new(&path).load().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::StorageParseError);
    }
}
