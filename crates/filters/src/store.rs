//! Durable preset and recent-search store.
//!
//! An explicitly constructed store object: state loads once at construction
//! and every mutating operation rewrites its key. No module-level caches.

use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::Context;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use stockroom_core::{PresetId, SearchId};

use crate::config::FilterConfig;
use crate::preset::{FilterPreset, RecentSearch};

/// Key holding the saved preset list.
pub const PRESETS_KEY: &str = "filter_presets.v1";
/// Key holding the recent-search history.
pub const RECENTS_KEY: &str = "recent_searches.v1";
/// The recent-search history keeps this many entries, oldest evicted first.
pub const RECENT_LIMIT: usize = 10;

/// Durable key-value storage for core-owned state.
pub trait StateStorage {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn write(&self, key: &str, payload: &str) -> anyhow::Result<()>;
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    cells: Mutex<BTreeMap<String, String>>,
    writes: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes, for asserting persistence behavior.
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Seed a key, bypassing the write counter.
    pub fn seed(&self, key: &str, payload: &str) {
        self.cells
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), payload.to_string());
    }
}

impl StateStorage for MemoryStorage {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self
            .cells
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, payload: &str) -> anyhow::Result<()> {
        self.cells
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), payload.to_string());
        *self.writes.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}

/// Preset and recent-search lifecycle over a [`StateStorage`] backend.
pub struct PresetStore<S: StateStorage> {
    storage: S,
    presets: Vec<FilterPreset>,
    recents: Vec<RecentSearch>,
}

impl<S: StateStorage> PresetStore<S> {
    /// Load both lists from storage.
    ///
    /// A missing key starts empty; a malformed payload degrades to empty
    /// with a warning rather than failing construction.
    pub fn open(storage: S) -> Self {
        let presets = load_list(&storage, PRESETS_KEY);
        let recents = load_list(&storage, RECENTS_KEY);
        Self {
            storage,
            presets,
            recents,
        }
    }

    pub fn presets(&self) -> &[FilterPreset] {
        &self.presets
    }

    pub fn recent(&self) -> &[RecentSearch] {
        &self.recents
    }

    /// Freeze a configuration under a name and persist the list.
    ///
    /// On a storage failure the in-memory list is left as it was.
    pub fn save_preset(
        &mut self,
        name: impl Into<String>,
        config: FilterConfig,
    ) -> anyhow::Result<FilterPreset> {
        let preset = FilterPreset {
            id: PresetId::new(),
            name: name.into(),
            category: config.category(),
            config,
            created_at: Utc::now(),
        };

        let mut next = self.presets.clone();
        next.push(preset.clone());
        persist_list(&self.storage, PRESETS_KEY, &next)?;
        self.presets = next;
        Ok(preset)
    }

    /// Remove a preset by id and persist. Returns whether anything was removed.
    pub fn delete_preset(&mut self, id: PresetId) -> anyhow::Result<bool> {
        let mut next = self.presets.clone();
        let before = next.len();
        next.retain(|p| p.id != id);
        if next.len() == before {
            return Ok(false);
        }
        persist_list(&self.storage, PRESETS_KEY, &next)?;
        self.presets = next;
        Ok(true)
    }

    /// Look up a preset for the caller to apply to its filter set.
    ///
    /// Loading never rewrites storage.
    pub fn load_preset(&self, id: PresetId) -> Option<&FilterPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Prepend a search to the history, evicting past the bound, and persist.
    pub fn record_search(
        &mut self,
        query: impl Into<String>,
        config: FilterConfig,
    ) -> anyhow::Result<RecentSearch> {
        let entry = RecentSearch {
            id: SearchId::new(),
            category: config.category(),
            query: query.into(),
            config,
            occurred_at: Utc::now(),
        };

        let mut next = Vec::with_capacity(RECENT_LIMIT);
        next.push(entry.clone());
        next.extend(self.recents.iter().take(RECENT_LIMIT - 1).cloned());
        persist_list(&self.storage, RECENTS_KEY, &next)?;
        self.recents = next;
        Ok(entry)
    }

    /// Drop the whole history and persist the empty list.
    pub fn clear_recent(&mut self) -> anyhow::Result<()> {
        persist_list(&self.storage, RECENTS_KEY, &Vec::<RecentSearch>::new())?;
        self.recents.clear();
        Ok(())
    }
}

fn load_list<S: StateStorage, T: DeserializeOwned>(storage: &S, key: &str) -> Vec<T> {
    let payload = match storage.read(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read persisted state; starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&payload) {
        Ok(list) => list,
        Err(err) => {
            tracing::warn!(key, error = %err, "malformed persisted state discarded");
            Vec::new()
        }
    }
}

fn persist_list<S: StateStorage, T: Serialize>(
    storage: &S,
    key: &str,
    list: &[T],
) -> anyhow::Result<()> {
    let payload = serde_json::to_string(list)
        .with_context(|| format!("failed to serialize state for key {key}"))?;
    storage
        .write(key, &payload)
        .with_context(|| format!("failed to persist state for key {key}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FilterSet, ProductFilter};
    use crate::category::SearchCategory;
    use crate::fields::RangeFilter;

    fn product_config(name: &str) -> FilterConfig {
        FilterConfig::Products(ProductFilter {
            name: name.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn starts_empty_on_fresh_storage() {
        let store = PresetStore::open(MemoryStorage::new());
        assert!(store.presets().is_empty());
        assert!(store.recent().is_empty());
    }

    #[test]
    fn save_persists_and_load_restores() {
        let mut store = PresetStore::open(MemoryStorage::new());
        let config = FilterConfig::Products(ProductFilter {
            name: "laptop".to_string(),
            price: RangeFilter::at_least(1000),
            ..Default::default()
        });

        let saved = store.save_preset("expensive laptops", config.clone()).unwrap();
        assert_eq!(saved.category, SearchCategory::Products);

        let loaded = store.load_preset(saved.id).unwrap();
        assert_eq!(loaded.config, config);

        // Applying the loaded preset switches the active category.
        let mut set = FilterSet::default();
        set.active = SearchCategory::Clients;
        set.apply(loaded.config.clone());
        assert_eq!(set.active, SearchCategory::Products);
        assert_eq!(set.products.name, "laptop");
    }

    #[test]
    fn state_survives_reopen() {
        let storage = MemoryStorage::new();
        let mut store = PresetStore::open(storage);
        store.save_preset("one", product_config("a")).unwrap();
        store.record_search("a", product_config("a")).unwrap();

        let PresetStore { storage, .. } = store;
        let reopened = PresetStore::open(storage);
        assert_eq!(reopened.presets().len(), 1);
        assert_eq!(reopened.recent().len(), 1);
    }

    #[test]
    fn delete_removes_by_id() {
        let mut store = PresetStore::open(MemoryStorage::new());
        let saved = store.save_preset("gone soon", product_config("x")).unwrap();

        assert!(store.delete_preset(saved.id).unwrap());
        assert!(store.presets().is_empty());
        assert!(!store.delete_preset(saved.id).unwrap());
    }

    #[test]
    fn load_does_not_rewrite_storage() {
        let mut store = PresetStore::open(MemoryStorage::new());
        let saved = store.save_preset("stable", product_config("x")).unwrap();
        let writes_after_save = store.storage.write_count();

        let _ = store.load_preset(saved.id);
        assert_eq!(store.storage.write_count(), writes_after_save);
    }

    #[test]
    fn recent_history_is_bounded_to_ten() {
        let mut store = PresetStore::open(MemoryStorage::new());

        for i in 0..11 {
            store
                .record_search(format!("query {i}"), product_config("x"))
                .unwrap();
        }

        assert_eq!(store.recent().len(), RECENT_LIMIT);
        // Most recent first; the oldest ("query 0") was evicted.
        assert_eq!(store.recent()[0].query, "query 10");
        assert!(store.recent().iter().all(|r| r.query != "query 0"));
    }

    #[test]
    fn clear_empties_the_history() {
        let mut store = PresetStore::open(MemoryStorage::new());
        store.record_search("q", product_config("x")).unwrap();
        store.clear_recent().unwrap();
        assert!(store.recent().is_empty());

        let PresetStore { storage, .. } = store;
        assert!(PresetStore::open(storage).recent().is_empty());
    }

    #[test]
    fn malformed_payload_degrades_to_empty() {
        let storage = MemoryStorage::new();
        storage.seed(PRESETS_KEY, "{not json");
        storage.seed(RECENTS_KEY, "[{\"id\": 42}]");

        let store = PresetStore::open(storage);
        assert!(store.presets().is_empty());
        assert!(store.recent().is_empty());
    }
}
