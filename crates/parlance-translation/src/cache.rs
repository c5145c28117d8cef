//! Loaded catalog groups.

use crate::error::Result;
use crate::tree::{set_path, Lines, MessageValue};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Snapshot shape: namespace -> group -> locale -> lines.
pub type LoadedCatalogs = BTreeMap<String, BTreeMap<String, BTreeMap<String, Lines>>>;

type CacheKey = (String, String, String);

fn cache_key(namespace: &str, group: &str, locale: &str) -> CacheKey {
    (namespace.to_string(), group.to_string(), locale.to_string())
}

/// Groups keyed by (namespace, group, locale).
///
/// An entry, empty or not, is never loaded twice. Loads run outside the
/// lock; when two callers race on the same key the first insert wins.
#[derive(Debug, Default)]
pub struct CatalogCache {
    loaded: RwLock<HashMap<CacheKey, Arc<Lines>>>,
}

impl CatalogCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached group, if loaded.
    pub fn get(&self, namespace: &str, group: &str, locale: &str) -> Option<Arc<Lines>> {
        self.loaded
            .read()
            .get(&cache_key(namespace, group, locale))
            .cloned()
    }

    /// Whether the group has been loaded, even if empty.
    pub fn is_loaded(&self, namespace: &str, group: &str, locale: &str) -> bool {
        self.loaded
            .read()
            .contains_key(&cache_key(namespace, group, locale))
    }

    /// Return the cached group, or run `load` and cache its result.
    /// A failed load caches nothing.
    pub fn get_or_load<F>(&self, namespace: &str, group: &str, locale: &str, load: F) -> Result<Arc<Lines>>
    where
        F: FnOnce() -> Result<Lines>,
    {
        if let Some(lines) = self.get(namespace, group, locale) {
            tracing::trace!(ns = %namespace, group = %group, locale = %locale, "catalog cache hit");
            return Ok(lines);
        }

        let lines = Arc::new(load()?);
        let mut loaded = self.loaded.write();
        Ok(loaded
            .entry(cache_key(namespace, group, locale))
            .or_insert(lines)
            .clone())
    }

    /// Set `item` (a dotted path) in a group, marking the group loaded.
    pub fn set_line(&self, namespace: &str, group: &str, locale: &str, item: &str, value: MessageValue) {
        let mut loaded = self.loaded.write();
        let lines = loaded
            .entry(cache_key(namespace, group, locale))
            .or_insert_with(|| Arc::new(Lines::new()));
        set_path(Arc::make_mut(lines), item, value);
    }

    /// Replace every entry.
    pub fn replace_all(&self, catalogs: LoadedCatalogs) {
        let mut map = HashMap::new();
        for (namespace, groups) in catalogs {
            for (group, locales) in groups {
                for (locale, lines) in locales {
                    map.insert((namespace.clone(), group.clone(), locale), Arc::new(lines));
                }
            }
        }
        *self.loaded.write() = map;
    }

    /// Copy of every entry.
    pub fn snapshot(&self) -> LoadedCatalogs {
        let mut catalogs = LoadedCatalogs::new();
        for ((namespace, group, locale), lines) in self.loaded.read().iter() {
            catalogs
                .entry(namespace.clone())
                .or_default()
                .entry(group.clone())
                .or_default()
                .insert(locale.clone(), lines.as_ref().clone());
        }
        catalogs
    }

    /// Number of loaded groups.
    pub fn len(&self) -> usize {
        self.loaded.read().len()
    }

    /// Whether nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.loaded.read().is_empty()
    }
}
