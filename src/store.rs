//! Settings store: lazily loaded, merge-then-persist label configuration.
//!
//! Construct one [`SettingsStore`] at startup and hand out references. The
//! first [`SettingsStore::load`] reads the blob under the versioned key; a
//! missing or unreadable blob yields defaults without writing anything.
//! [`SettingsStore::update`] merges a patch, persists the whole merged value,
//! then publishes it to subscribers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::consts::{SETTINGS_DIR_ENV, SETTINGS_KEY};
use crate::error::Result;
use crate::settings::{LabelConfiguration, LabelSettingsPatch};

/// Durable key/value storage for JSON blobs.
pub trait SettingsBackend: Send + Sync {
    /// `Ok(None)` when nothing is stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>>;
    /// Replace the value under `key` in one step.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileBackend { dir: dir.into() }
    }

    /// `PRICE_LABEL_SETTINGS_DIR`, then `$HOME/.price-label-printer`, then `.`.
    pub fn from_env() -> Self {
        if let Ok(dir) = std::env::var(SETTINGS_DIR_ENV) {
            return FileBackend::new(dir);
        }
        match std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
            Some(home) => FileBackend::new(Path::new(&home).join(".price-label-printer")),
            None => FileBackend::new("."),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SettingsBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let target = self.path_for(key);
        // write + rename so readers never see half a blob
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &target)?;
        Ok(())
    }
}

/// In-process storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, e.g. a blob written by an older build.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let backend = Self::default();
        backend.entries_mut().insert(key.to_string(), value.to_string());
        backend
    }

    fn entries_mut(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl SettingsBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries_mut().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

type Listener = Arc<dyn Fn(&LabelConfiguration) + Send + Sync>;

pub struct SettingsStore<B: SettingsBackend> {
    backend: B,
    key: String,
    current: Mutex<Option<LabelConfiguration>>,
    listeners: Mutex<Vec<Listener>>,
}

impl<B: SettingsBackend> SettingsStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, SETTINGS_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        SettingsStore {
            backend,
            key: key.into(),
            current: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current configuration. Never fails: bad or missing data means defaults.
    pub fn load(&self) -> LabelConfiguration {
        let mut current = self.current.lock().unwrap_or_else(|p| p.into_inner());
        current.get_or_insert_with(|| self.read_persisted()).clone()
    }

    /// Merge `patch` into the current value, persist, publish, and return it.
    ///
    /// On a write error the in-memory value is left as it was.
    pub fn update(&self, patch: &LabelSettingsPatch) -> Result<LabelConfiguration> {
        let merged = {
            let mut current = self.current.lock().unwrap_or_else(|p| p.into_inner());
            let base = current.get_or_insert_with(|| self.read_persisted());
            let merged = base.merged(patch);
            let json = serde_json::to_string(&merged)?;
            self.backend.write(&self.key, &json)?;
            debug!(key = %self.key, "persisted label settings");
            *base = merged.clone();
            merged
        };
        // snapshot so a listener may subscribe without deadlocking
        let listeners: Vec<Listener> = self.listeners.lock().unwrap_or_else(|p| p.into_inner()).clone();
        for listener in &listeners {
            listener(&merged);
        }
        Ok(merged)
    }

    /// Called with the merged value after every successful update.
    /// Listeners added during a broadcast first hear the next update.
    pub fn subscribe(&self, listener: impl Fn(&LabelConfiguration) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(Arc::new(listener));
    }

    fn read_persisted(&self) -> LabelConfiguration {
        let raw = match self.backend.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no saved label settings, using defaults");
                return LabelConfiguration::default();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read label settings, using defaults");
                return LabelConfiguration::default();
            }
        };
        match serde_json::from_str::<LabelConfiguration>(&raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(key = %self.key, error = %e, "saved label settings are corrupt, using defaults");
                LabelConfiguration::default()
            }
        }
    }
}
