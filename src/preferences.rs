use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, warn};

use crate::error::ClientResult;

/// Key under which the last chosen target language is stored.
pub const PREFERRED_LANGUAGE_KEY: &str = "preferredLanguage";

/// Small persistent key/value store, the local-storage of the page.
///
/// Values are kept in memory and written through to a pretty-printed JSON
/// object on every change.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl PreferenceStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring malformed preferences file {:?}: {}", path, e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };

        Self {
            path,
            values: RwLock::new(values),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|p| p.into_inner());
        values.get(key).cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let snapshot = {
            let mut values = self.values.write().unwrap_or_else(|p| p.into_inner());
            values.insert(key.to_string(), value.to_string());
            values.clone()
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&snapshot)?)?;
        debug!("Stored preference {}={}", key, value);
        Ok(())
    }

    pub fn preferred_language(&self) -> Option<String> {
        self.get(PREFERRED_LANGUAGE_KEY).filter(|v| !v.is_empty())
    }

    pub fn set_preferred_language(&self, lang: &str) -> ClientResult<()> {
        self.set(PREFERRED_LANGUAGE_KEY, lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::open(dir.path().join("prefs.json"));
        assert_eq!(store.preferred_language(), None);
    }

    #[test]
    fn preferred_language_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let store = PreferenceStore::open(&path);
        store.set_preferred_language("DE").unwrap();

        let reopened = PreferenceStore::open(&path);
        assert_eq!(reopened.preferred_language().as_deref(), Some("DE"));
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let store = PreferenceStore::open(&path);
        assert_eq!(store.get(PREFERRED_LANGUAGE_KEY), None);
        store.set_preferred_language("FR").unwrap();
        assert_eq!(store.preferred_language().as_deref(), Some("FR"));
    }
}
