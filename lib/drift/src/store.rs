//! File-backed key/value persistence.
//!
//! [`PreferenceStore`] keeps one JSON file per logical namespace and
//! mirrors it in memory; every write goes straight back to disk. Each
//! instance exclusively owns its file handle, so two namespaces never
//! alias the same storage. [`CredentialStore`] is the user-scoped
//! namespace holding the auth token the request middleware reads.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use derive_more::{Display, Error, From};
use serde_json::{Map, Number, Value};

/// Errors raised by the persistence layer.
#[derive(Debug, Display, Error, From)]
pub enum StoreError {
    /// Underlying file I/O failure.
    #[display("store I/O error: {_0}")]
    Io(std::io::Error),

    /// The namespace file does not contain a JSON object.
    #[display("store serialization error: {_0}")]
    Serialization(serde_json::Error),
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A key/value store persisted as a JSON object in a single file.
///
/// Values are typed at the accessor level: a `get_i64` on a key holding
/// a string yields `None` rather than an error. Writes persist
/// immediately.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    entries: Mutex<Map<String, Value>>,
}

impl PreferenceStore {
    /// Open the store backed by `path`, loading existing entries.
    ///
    /// A missing file is an empty store; the file is created on the
    /// first write.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Open a namespace under `dir`, stored as `<dir>/<namespace>.json`.
    pub fn open_namespace(dir: impl AsRef<Path>, namespace: &str) -> StoreResult<Self> {
        Self::open(dir.as_ref().join(format!("{namespace}.json")))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T>(&self, f: impl FnOnce(&Map<String, Value>) -> T) -> T {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&entries)
    }

    fn write(&self, f: impl FnOnce(&mut Map<String, Value>)) -> StoreResult<()> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut entries);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&*entries)?)?;
        Ok(())
    }

    /// Get a string value.
    #[must_use]
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.read(|e| e.get(key).and_then(Value::as_str).map(str::to_string))
    }

    /// Get an integer value.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.read(|e| e.get(key).and_then(Value::as_i64))
    }

    /// Get a float value.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.read(|e| e.get(key).and_then(Value::as_f64))
    }

    /// Get a boolean value.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.read(|e| e.get(key).and_then(Value::as_bool))
    }

    /// Get a string-set value.
    #[must_use]
    pub fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>> {
        self.read(|e| {
            e.get(key).and_then(Value::as_array).map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
        })
    }

    /// Store a string value.
    pub fn set_string(&self, key: &str, value: impl Into<String>) -> StoreResult<()> {
        self.write(|e| {
            e.insert(key.to_string(), Value::String(value.into()));
        })
    }

    /// Store an integer value.
    pub fn set_i64(&self, key: &str, value: i64) -> StoreResult<()> {
        self.write(|e| {
            e.insert(key.to_string(), Value::Number(value.into()));
        })
    }

    /// Store a float value.
    ///
    /// Non-finite values are stored as JSON `null`.
    pub fn set_f64(&self, key: &str, value: f64) -> StoreResult<()> {
        self.write(|e| {
            let number = Number::from_f64(value).map_or(Value::Null, Value::Number);
            e.insert(key.to_string(), number);
        })
    }

    /// Store a boolean value.
    pub fn set_bool(&self, key: &str, value: bool) -> StoreResult<()> {
        self.write(|e| {
            e.insert(key.to_string(), Value::Bool(value));
        })
    }

    /// Store a string-set value.
    pub fn set_string_set(&self, key: &str, value: &BTreeSet<String>) -> StoreResult<()> {
        self.write(|e| {
            let values = value.iter().cloned().map(Value::String).collect();
            e.insert(key.to_string(), Value::Array(values));
        })
    }

    /// Returns `true` if the key exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.read(|e| e.contains_key(key))
    }

    /// Remove a key.
    pub fn remove(&self, key: &str) -> StoreResult<()> {
        self.write(|e| {
            e.remove(key);
        })
    }

    /// Remove every key in the namespace.
    pub fn clear(&self) -> StoreResult<()> {
        self.write(Map::clear)
    }

    /// Export all entries as a flat string-keyed mapping.
    ///
    /// Non-string values are rendered in their JSON form; useful for
    /// attaching the whole namespace as request parameters.
    #[must_use]
    pub fn entries(&self) -> HashMap<String, String> {
        self.read(|e| {
            e.iter()
                .map(|(key, value)| {
                    let rendered = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (key.clone(), rendered)
                })
                .collect()
        })
    }
}

/// Default namespace for the user credential store.
const USER_NAMESPACE: &str = "user_private";

/// Default key the auth token is stored under.
const TOKEN_KEY: &str = "token";

/// Tokens shorter than this cannot be valid API tokens.
const MIN_TOKEN_LEN: usize = 10;

/// User-scoped store holding the auth token and related private data.
///
/// Construct one per user storage directory; [`CredentialStore::log_out`]
/// wipes the whole namespace.
#[derive(Debug)]
pub struct CredentialStore {
    store: PreferenceStore,
    token_key: String,
}

impl CredentialStore {
    /// Open the user credential namespace under `dir`.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            store: PreferenceStore::open_namespace(dir, USER_NAMESPACE)?,
            token_key: TOKEN_KEY.to_string(),
        })
    }

    /// Open with a custom token key.
    pub fn with_token_key(dir: impl AsRef<Path>, token_key: impl Into<String>) -> StoreResult<Self> {
        Ok(Self {
            store: PreferenceStore::open_namespace(dir, USER_NAMESPACE)?,
            token_key: token_key.into(),
        })
    }

    /// Access the underlying namespace for non-token user data.
    #[must_use]
    pub fn preferences(&self) -> &PreferenceStore {
        &self.store
    }

    /// The stored auth token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.get_string(&self.token_key)
    }

    /// Store the auth token.
    pub fn save_token(&self, token: impl Into<String>) -> StoreResult<()> {
        self.store.set_string(&self.token_key, token)
    }

    /// Returns `true` when a plausible token is present.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some_and(|t| t.len() > MIN_TOKEN_LEN)
    }

    /// Clear the whole user namespace.
    pub fn log_out(&self) -> StoreResult<()> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, PreferenceStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PreferenceStore::open_namespace(dir.path(), "settings").expect("open");
        (dir, store)
    }

    #[test]
    fn roundtrips_each_type() {
        let (_dir, store) = temp_store();

        store.set_string("name", "alice").expect("set");
        store.set_i64("age", 30).expect("set");
        store.set_f64("score", 0.5).expect("set");
        store.set_bool("active", true).expect("set");
        let tags: BTreeSet<String> = ["a".to_string(), "b".to_string()].into();
        store.set_string_set("tags", &tags).expect("set");

        assert_eq!(store.get_string("name").as_deref(), Some("alice"));
        assert_eq!(store.get_i64("age"), Some(30));
        assert_eq!(store.get_f64("score"), Some(0.5));
        assert_eq!(store.get_bool("active"), Some(true));
        assert_eq!(store.get_string_set("tags"), Some(tags));
    }

    #[test]
    fn missing_and_mistyped_keys_yield_none() {
        let (_dir, store) = temp_store();
        store.set_string("name", "alice").expect("set");

        assert_eq!(store.get_string("absent"), None);
        assert_eq!(store.get_i64("name"), None);
        assert_eq!(store.get_bool("name"), None);
    }

    #[test]
    fn persists_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let store = PreferenceStore::open_namespace(dir.path(), "settings").expect("open");
            store.set_string("name", "alice").expect("set");
        }
        let store = PreferenceStore::open_namespace(dir.path(), "settings").expect("reopen");
        assert_eq!(store.get_string("name").as_deref(), Some("alice"));
    }

    #[test]
    fn namespaces_do_not_alias() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = PreferenceStore::open_namespace(dir.path(), "a").expect("open");
        let b = PreferenceStore::open_namespace(dir.path(), "b").expect("open");

        a.set_string("key", "from-a").expect("set");
        assert_eq!(b.get_string("key"), None);
    }

    #[test]
    fn remove_and_clear() {
        let (_dir, store) = temp_store();
        store.set_string("one", "1").expect("set");
        store.set_string("two", "2").expect("set");

        store.remove("one").expect("remove");
        assert!(!store.contains("one"));
        assert!(store.contains("two"));

        store.clear().expect("clear");
        assert!(!store.contains("two"));
    }

    #[test]
    fn entries_exports_flat_strings() {
        let (_dir, store) = temp_store();
        store.set_string("name", "alice").expect("set");
        store.set_i64("age", 30).expect("set");

        let entries = store.entries();
        assert_eq!(entries.get("name").map(String::as_str), Some("alice"));
        assert_eq!(entries.get("age").map(String::as_str), Some("30"));
    }

    #[test]
    fn credential_store_token_lifecycle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CredentialStore::open(dir.path()).expect("open");

        assert!(!store.is_logged_in());
        assert_eq!(store.token(), None);

        store.save_token("0123456789abcdef").expect("save");
        assert!(store.is_logged_in());
        assert_eq!(store.token().as_deref(), Some("0123456789abcdef"));

        store.log_out().expect("log out");
        assert!(!store.is_logged_in());
    }

    #[test]
    fn short_token_does_not_count_as_logged_in() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CredentialStore::open(dir.path()).expect("open");

        store.save_token("short").expect("save");
        assert!(!store.is_logged_in());
        // The token is still readable, it just fails the length gate
        assert_eq!(store.token().as_deref(), Some("short"));
    }

    #[test]
    fn custom_token_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store =
            CredentialStore::with_token_key(dir.path(), "session_token").expect("open");

        store.save_token("0123456789abcdef").expect("save");
        assert_eq!(
            store.preferences().get_string("session_token").as_deref(),
            Some("0123456789abcdef")
        );
        assert_eq!(store.preferences().get_string("token"), None);
    }
}
