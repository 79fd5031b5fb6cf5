//! Small persisted flags: welcome screen seen, theme choice, and which
//! one-time anniversary effects already played today.
//!
//! None of this affects what the gallery shows; a lost or corrupt state file
//! only means a welcome or an animation is shown again.

use crate::error::{GalleryError, GalleryResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use strum_macros::{AsRefStr, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum StorageKey {
    WelcomeSeen,
    Theme,
    /// JSON object mapping anniversary id to the date it last played on.
    AnniversaryShown,
}

pub trait KeyValueStore {
    fn get(&self, key: StorageKey) -> Option<String>;
    fn set(&mut self, key: StorageKey, value: &str) -> GalleryResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<StorageKey, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        self.values.get(&key).cloned()
    }

    fn set(&mut self, key: StorageKey, value: &str) -> GalleryResult<()> {
        self.values.insert(key, value.to_string());
        Ok(())
    }
}

/// Stores all keys in one JSON object on disk, rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<StorageKey, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: PathBuf) -> Self {
        let values = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|error| {
                log::warn!("ignoring corrupt state file {}: {error}", path.display());
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    fn persist(&self) -> GalleryResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| GalleryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(&self.values)
            .map_err(|error| GalleryError::Storage(error.to_string()))?;
        fs::write(&self.path, content).map_err(|source| GalleryError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        self.values.get(&key).cloned()
    }

    fn set(&mut self, key: StorageKey, value: &str) -> GalleryResult<()> {
        self.values.insert(key, value.to_string());
        self.persist()
    }
}

pub fn has_seen_welcome(store: &dyn KeyValueStore) -> bool {
    store.get(StorageKey::WelcomeSeen).is_some()
}

pub fn mark_welcome_seen(store: &mut dyn KeyValueStore) -> GalleryResult<()> {
    store.set(StorageKey::WelcomeSeen, "true")
}

fn shown_anniversaries(store: &dyn KeyValueStore) -> BTreeMap<String, String> {
    store
        .get(StorageKey::AnniversaryShown)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// `true` if the anniversary `id` already played on `day` (`YYYY-MM-DD`).
pub fn anniversary_shown_on(store: &dyn KeyValueStore, id: &str, day: &str) -> bool {
    shown_anniversaries(store).get(id).is_some_and(|d| d == day)
}

pub fn mark_anniversary_shown(
    store: &mut dyn KeyValueStore,
    id: &str,
    day: &str,
) -> GalleryResult<()> {
    let mut shown = shown_anniversaries(store);
    shown.insert(id.to_string(), day.to_string());
    let raw =
        serde_json::to_string(&shown).map_err(|error| GalleryError::Storage(error.to_string()))?;
    store.set(StorageKey::AnniversaryShown, &raw)
}
