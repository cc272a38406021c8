//! Key-value preference stores and the credential view over them.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::session::credential::Credential;

/// Preference key holding `"<scheme> <parameter>"`
pub const TOKEN_KEY: &str = "token";

/// Preference key holding the anonymous user id
pub const USER_ID_KEY: &str = "userId";

/// Flat string key-value store.
///
/// Multi-entry writes and removals are applied as one unit.
pub trait PreferenceStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write several values at once.
    fn set_all(&self, entries: &[(&str, &str)]) -> Result<()>;

    /// Remove several keys at once.
    fn remove_all(&self, keys: &[&str]) -> Result<()>;

    /// Write one value.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_all(&[(key, value)])
    }
}

/// Preferences kept in process memory only.
#[derive(Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferences {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut values = self.values.write();
        for (key, value) in entries {
            values.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let mut values = self.values.write();
        for key in keys {
            values.remove(*key);
        }
        Ok(())
    }
}

/// Preferences persisted as a flat JSON object.
///
/// The file is read once when opened; every write rewrites it through a
/// temporary file and a rename.
pub struct FilePreferences {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl FilePreferences {
    /// Open `path`, starting empty if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let json = fs::read_to_string(&path)?;
            if json.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&json).map_err(|e| {
                    Error::store(format!("corrupt preference file {}: {}", path.display(), e))
                })?
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(values)
            .map_err(|e| Error::store(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut values = self.values.write();
        let mut next = values.clone();
        for (key, value) in entries {
            next.insert((*key).to_string(), (*value).to_string());
        }
        self.persist(&next)?;
        *values = next;
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let mut values = self.values.write();
        let mut next = values.clone();
        for key in keys {
            next.remove(*key);
        }
        self.persist(&next)?;
        *values = next;
        Ok(())
    }
}

/// Credential view over a [`PreferenceStore`].
#[derive(Clone)]
pub struct CredentialStore {
    prefs: Arc<dyn PreferenceStore>,
}

impl CredentialStore {
    /// Wrap a preference store.
    pub fn new(prefs: Arc<dyn PreferenceStore>) -> Self {
        Self { prefs }
    }

    /// Store backed by process memory.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryPreferences::new()))
    }

    /// Store backed by a JSON preference file.
    pub fn open_file(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(Arc::new(FilePreferences::open(path)?)))
    }

    /// Stored credential, or `None` if the token or user id is missing or empty.
    pub fn load(&self) -> Result<Option<Credential>> {
        let token = self.prefs.get(TOKEN_KEY)?.unwrap_or_default();
        let user_id = self.prefs.get(USER_ID_KEY)?.unwrap_or_default();
        Ok(Credential::from_token(&token, &user_id))
    }

    /// Persist `credential`.
    pub fn save(&self, credential: &Credential) -> Result<()> {
        let token = credential.authorization();
        self.prefs.set_all(&[
            (TOKEN_KEY, token.as_str()),
            (USER_ID_KEY, credential.anonymous_user_id()),
        ])
    }

    /// Forget the stored credential.
    pub fn clear(&self) -> Result<()> {
        self.prefs.remove_all(&[TOKEN_KEY, USER_ID_KEY])
    }

    /// Stored anonymous user id, if any.
    pub fn user_id(&self) -> Result<Option<String>> {
        Ok(self.prefs.get(USER_ID_KEY)?.filter(|id| !id.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_preferences() {
        let prefs = MemoryPreferences::new();
        assert_eq!(prefs.get("k").unwrap(), None);

        prefs.set("k", "v").unwrap();
        assert_eq!(prefs.get("k").unwrap().as_deref(), Some("v"));

        prefs.remove_all(&["k"]).unwrap();
        assert_eq!(prefs.get("k").unwrap(), None);
    }

    #[test]
    fn test_credential_round_trip() {
        let store = CredentialStore::in_memory();
        assert!(store.load().unwrap().is_none());

        let credential = Credential::new("YQ_TOKEN", "p4r4m3t3r", "52071");
        store.save(&credential).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.authorization().as_bytes(), credential.authorization().as_bytes());
        assert_eq!(loaded.anonymous_user_id().as_bytes(), b"52071");
        assert_eq!(store.user_id().unwrap().as_deref(), Some("52071"));
    }

    #[test]
    fn test_partial_credential_is_miss() {
        let prefs = Arc::new(MemoryPreferences::new());
        let store = CredentialStore::new(prefs.clone());

        prefs.set(TOKEN_KEY, "YQ_TOKEN abc").unwrap();
        assert!(store.load().unwrap().is_none());

        prefs.set(USER_ID_KEY, "").unwrap();
        assert!(store.load().unwrap().is_none());
        assert_eq!(store.user_id().unwrap(), None);
    }

    #[test]
    fn test_clear() {
        let store = CredentialStore::in_memory();
        store.save(&Credential::new("YQ_TOKEN", "abc", "1")).unwrap();
        store.clear().unwrap();

        assert!(store.load().unwrap().is_none());
        assert_eq!(store.user_id().unwrap(), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let credential = Credential::new("YQ_TOKEN", "file-token", "8080");
        CredentialStore::open_file(&path).unwrap().save(&credential).unwrap();

        let reopened = CredentialStore::open_file(&path).unwrap();
        assert_eq!(reopened.load().unwrap(), Some(credential));

        let raw: HashMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get(TOKEN_KEY).map(String::as_str), Some("YQ_TOKEN file-token"));
        assert_eq!(raw.get(USER_ID_KEY).map(String::as_str), Some("8080"));
    }

    #[test]
    fn test_file_store_clear_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let store = CredentialStore::open_file(&path).unwrap();
        store.save(&Credential::new("YQ_TOKEN", "x", "1")).unwrap();
        store.clear().unwrap();

        assert!(CredentialStore::open_file(&path).unwrap().load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(FilePreferences::open(&path), Err(Error::Store(_))));
    }
}
