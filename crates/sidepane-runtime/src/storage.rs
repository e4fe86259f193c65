#![forbid(unsafe_code)]

//! Key/value persistence for the panel layout.
//!
//! # Backends
//!
//! - [`MemoryStore`]: in-process map, with optional quota or disabled mode
//!   to reproduce browser storage failures.
//! - [`JsonFileStore`]: one JSON object per file, rewritten atomically
//!   (temp file then rename) on every `set`.
//!
//! Values are JSON text. [`PersistedLayout`] wraps a store with typed
//! accessors for the panel keys and swallows every failure after logging it
//! with `tracing::warn!`: a broken store degrades to in-memory defaults and
//! never interrupts a drag.
//!
//! # File Format
//!
//! ```json
//! {
//!   "leftPanelCollapsed": false,
//!   "leftPanelWidth": 300,
//!   "leftPanelWidthRatio": 0.3
//! }
//! ```
//!
//! A missing file is an empty store; a file that is not a JSON object is an
//! error on open.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a [`KeyValueStore`].
#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing the backing file.
    Io(io::Error),
    /// Stored text or a value to store is not valid JSON.
    Json(serde_json::Error),
    /// Backing file does not hold a JSON object.
    Corrupt { path: PathBuf, reason: String },
    /// The store refuses new keys.
    QuotaExceeded { key: String },
    /// Storage is switched off (private mode, policy).
    Unavailable,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Corrupt { path, reason } => {
                write!(f, "corrupt store {}: {reason}", path.display())
            }
            Self::QuotaExceeded { key } => write!(f, "quota exceeded writing {key}"),
            Self::Unavailable => write!(f, "storage unavailable"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Corrupt { .. } | Self::QuotaExceeded { .. } | Self::Unavailable => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Synchronous string key/value store.
pub trait KeyValueStore {
    /// Read the raw JSON text under `key`; `Ok(None)` when absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store raw JSON text under `key`.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    max_entries: Option<usize>,
    disabled: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects new keys once it holds `max_entries`.
    #[must_use]
    pub fn with_quota(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries),
            ..Self::default()
        }
    }

    /// Store whose every operation fails with [`StorageError::Unavailable`].
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Seed an entry, bypassing quota checks.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw text under `key`, ignoring the disabled flag.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.disabled {
            return Err(StorageError::Unavailable);
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.disabled {
            return Err(StorageError::Unavailable);
        }
        let is_new = !self.entries.contains_key(key);
        if is_new && self.max_entries.is_some_and(|max| self.entries.len() >= max) {
            return Err(StorageError::QuotaExceeded {
                key: key.to_owned(),
            });
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// File-backed store holding one JSON object.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, serde_json::Value>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing entries.
    ///
    /// - **Missing file** yields an empty store.
    /// - **Unparseable file** returns an error.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => match serde_json::from_str::<serde_json::Value>(&contents)? {
                serde_json::Value::Object(map) => map.into_iter().collect(),
                other => {
                    return Err(StorageError::Corrupt {
                        path,
                        reason: format!("expected a JSON object, found {}", json_kind(&other)),
                    });
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the backing file atomically.
    pub fn flush(&self) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).map(serde_json::Value::to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let parsed: serde_json::Value = serde_json::from_str(value)?;
        self.entries.insert(key.to_owned(), parsed);
        self.flush()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Storage keys for the panel fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelStorageKeys {
    pub width: String,
    pub collapsed: String,
    pub expanded_width: String,
    pub width_ratio: String,
    pub active_tab: String,
}

impl Default for PanelStorageKeys {
    fn default() -> Self {
        Self {
            width: "leftPanelWidth".to_owned(),
            collapsed: "leftPanelCollapsed".to_owned(),
            expanded_width: "leftPanelExpandedWidth".to_owned(),
            width_ratio: "leftPanelWidthRatio".to_owned(),
            active_tab: "activeTab".to_owned(),
        }
    }
}

impl PanelStorageKeys {
    /// Default keys namespaced with `prefix`.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        let base = Self::default();
        Self {
            width: format!("{prefix}{}", base.width),
            collapsed: format!("{prefix}{}", base.collapsed),
            expanded_width: format!("{prefix}{}", base.expanded_width),
            width_ratio: format!("{prefix}{}", base.width_ratio),
            active_tab: format!("{prefix}{}", base.active_tab),
        }
    }
}

/// Typed, failure-tolerant view of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct PersistedLayout<S> {
    store: S,
    keys: PanelStorageKeys,
}

impl<S: KeyValueStore> PersistedLayout<S> {
    #[must_use]
    pub fn new(store: S, keys: PanelStorageKeys) -> Self {
        Self { store, keys }
    }

    #[must_use]
    pub const fn keys(&self) -> &PanelStorageKeys {
        &self.keys
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Decode the value under `key`.
    ///
    /// Absent keys, store failures and undecodable values all yield `None`;
    /// the latter two are logged.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(target: "sidepane.storage", key, error = %err, "storage read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(target: "sidepane.storage", key, error = %err, "stored value ignored");
                None
            }
        }
    }

    /// Encode and store `value` under `key`.
    ///
    /// Returns whether the write succeeded; failures are logged, never raised.
    pub fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|text| self.store.set(key, &text));
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!(target: "sidepane.storage", key, error = %err, "storage write failed");
                false
            }
        }
    }

    pub fn width(&self) -> Option<u32> {
        self.read(&self.keys.width)
    }

    pub fn collapsed(&self) -> Option<bool> {
        self.read(&self.keys.collapsed)
    }

    pub fn expanded_width(&self) -> Option<u32> {
        self.read(&self.keys.expanded_width)
    }

    pub fn width_ratio(&self) -> Option<f64> {
        self.read(&self.keys.width_ratio)
    }

    pub fn set_width(&mut self, width: u32) -> bool {
        let key = self.keys.width.clone();
        self.write(&key, &width)
    }

    pub fn set_collapsed(&mut self, collapsed: bool) -> bool {
        let key = self.keys.collapsed.clone();
        self.write(&key, &collapsed)
    }

    pub fn set_expanded_width(&mut self, width: u32) -> bool {
        let key = self.keys.expanded_width.clone();
        self.write(&key, &width)
    }

    pub fn set_width_ratio(&mut self, ratio: f64) -> bool {
        let key = self.keys.width_ratio.clone();
        self.write(&key, &ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_text() {
        let mut store = MemoryStore::new();
        store.set("k", "42").expect("set");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("42"));
        assert_eq!(store.get("missing").expect("get"), None);
    }

    #[test]
    fn memory_store_quota_rejects_new_keys_only() {
        let mut store = MemoryStore::with_quota(1);
        store.set("a", "1").expect("first key fits");
        store.set("a", "2").expect("overwrite fits");
        assert!(matches!(
            store.set("b", "3"),
            Err(StorageError::QuotaExceeded { .. })
        ));
    }

    #[test]
    fn disabled_store_fails_everything() {
        let mut store = MemoryStore::disabled();
        assert!(matches!(store.get("a"), Err(StorageError::Unavailable)));
        assert!(matches!(store.set("a", "1"), Err(StorageError::Unavailable)));
    }

    #[test]
    fn keys_default_and_prefix() {
        let keys = PanelStorageKeys::default();
        assert_eq!(keys.width, "leftPanelWidth");
        assert_eq!(keys.active_tab, "activeTab");
        let prefixed = PanelStorageKeys::with_prefix("ws1.");
        assert_eq!(prefixed.width_ratio, "ws1.leftPanelWidthRatio");
        assert_eq!(prefixed.collapsed, "ws1.leftPanelCollapsed");
    }

    #[test]
    fn persisted_layout_reads_typed_values() {
        let store = MemoryStore::new()
            .with_entry("leftPanelWidth", "320")
            .with_entry("leftPanelCollapsed", "true")
            .with_entry("leftPanelWidthRatio", "0.32");
        let layout = PersistedLayout::new(store, PanelStorageKeys::default());
        assert_eq!(layout.width(), Some(320));
        assert_eq!(layout.collapsed(), Some(true));
        assert_eq!(layout.width_ratio(), Some(0.32));
        assert_eq!(layout.expanded_width(), None);
    }

    #[test]
    fn persisted_layout_ignores_garbage() {
        let store = MemoryStore::new()
            .with_entry("leftPanelWidth", "\"wide\"")
            .with_entry("leftPanelCollapsed", "{not json");
        let layout = PersistedLayout::new(store, PanelStorageKeys::default());
        assert_eq!(layout.width(), None);
        assert_eq!(layout.collapsed(), None);
    }

    #[test]
    fn persisted_layout_write_failure_reports_false() {
        let mut layout = PersistedLayout::new(MemoryStore::disabled(), PanelStorageKeys::default());
        assert!(!layout.set_width(300));
        assert_eq!(layout.width(), None);
    }
}
