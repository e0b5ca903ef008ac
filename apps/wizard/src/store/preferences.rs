use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

/// Key under which the chosen template id survives a restart.
pub const SELECTED_TEMPLATE_KEY: &str = "selectedTemplateId";

const PREFERENCES_FILE: &str = "preferences.json";

/// Durable per-user key-value storage.
pub trait Preferences: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// Preferences kept only in memory, for tests and diskless hosts.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<BTreeMap<String, String>>,
}

impl Preferences for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// Preferences stored as a single JSON object in `<dir>/preferences.json`.
/// The whole map is rewritten on every change.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FilePreferences {
    pub fn open(dir: &Path) -> io::Result<Self> {
        let path = dir.join(PREFERENCES_FILE);
        let values = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        debug!("Loaded preferences from {}", path.display());

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(values)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path)
    }
}

impl Preferences for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        if values.remove(key).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_preferences_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let prefs = FilePreferences::open(dir.path()).unwrap();
            prefs.set(SELECTED_TEMPLATE_KEY, "traditional").unwrap();
        }
        let reopened = FilePreferences::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get(SELECTED_TEMPLATE_KEY).as_deref(),
            Some("traditional")
        );
    }

    #[test]
    fn test_file_preferences_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferences::open(dir.path()).unwrap();
        prefs.set("a", "1").unwrap();
        prefs.remove("a").unwrap();

        let reopened = FilePreferences::open(dir.path()).unwrap();
        assert_eq!(reopened.get("a"), None);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PREFERENCES_FILE), b"not json").unwrap();
        let err = FilePreferences::open(dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_memory_preferences() {
        let prefs = MemoryPreferences::default();
        assert_eq!(prefs.get("missing"), None);
        prefs.set("k", "v").unwrap();
        assert_eq!(prefs.get("k").as_deref(), Some("v"));
    }
}
