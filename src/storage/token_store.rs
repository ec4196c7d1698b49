use crate::error::Result;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key the credential token is stored under.
pub const TOKEN_KEY: &str = "token";

/// Persistent storage for the session token. Survives process restarts.
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Key/value JSON file on disk.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries of the session file. `None` means the file exists but does
    /// not hold a JSON object and should be rewritten.
    fn read_entries(&self) -> Result<Option<Map<String, JsonValue>>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Some(Map::new())),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Some(Map::new()));
        }
        match serde_json::from_str::<JsonValue>(&raw) {
            Ok(JsonValue::Object(entries)) => Ok(Some(entries)),
            Ok(_) => {
                tracing::warn!(path = %self.path.display(), "Session file is not a JSON object, ignoring it");
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Session file is unreadable, ignoring it: {}", e);
                Ok(None)
            }
        }
    }

    fn write_entries(&self, entries: &Map<String, JsonValue>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let entries = self.read_entries()?.unwrap_or_default();
        Ok(entries
            .get(TOKEN_KEY)
            .and_then(|v| v.as_str())
            .filter(|t| !t.is_empty())
            .map(str::to_string))
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut entries = self.read_entries()?.unwrap_or_default();
        entries.insert(TOKEN_KEY.to_string(), JsonValue::String(token.to_string()));
        self.write_entries(&entries)
    }

    fn clear(&self) -> Result<()> {
        match self.read_entries()? {
            Some(mut entries) => {
                if entries.remove(TOKEN_KEY).is_some() {
                    self.write_entries(&entries)?;
                }
                Ok(())
            }
            None => self.write_entries(&Map::new()),
        }
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store
            .lock()
            .insert(TOKEN_KEY.to_string(), token.to_string());
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.lock().get(TOKEN_KEY).cloned())
    }

    fn save(&self, token: &str) -> Result<()> {
        self.lock().insert(TOKEN_KEY.to_string(), token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.lock().remove(TOKEN_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileTokenStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
        store.save("abc123").unwrap();

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.load().unwrap().as_deref(), Some("abc123"));

        reopened.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_keeps_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = FileTokenStore::new(&path);
        store.save("t").unwrap();
        store.clear().unwrap();

        let raw: JsonValue = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!({ "theme": "dark" }));
    }

    #[test]
    fn file_store_recovers_from_corrupt_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert_eq!(store.load().unwrap(), None);

        store.clear().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "{}");

        fs::write(&path, "[1, 2]").unwrap();
        store.save("fresh").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("fresh"));
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::with_token("x");
        assert_eq!(store.load().unwrap().as_deref(), Some("x"));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
