use parking_lot::RwLock;
use std::collections::HashMap;

/// Keyed value store owned exclusively by one service.
///
/// Re-ingesting a key overwrites the previous value, which is what makes
/// `on_message` idempotent at the store level. Values propagate to callers
/// by clone; nothing hands out references into the map.
pub struct KeyedStore<V: Clone> {
    map: RwLock<HashMap<String, V>>,
}

impl<V: Clone> KeyedStore<V> {
    pub fn new() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
        }
    }

    #[inline]
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.map.write().insert(key.into(), value);
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<V> {
        self.map.read().get(key).cloned()
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.map.read().contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    /// Read-modify-write under a single lock acquisition.
    pub fn update<F>(&self, key: &str, f: F) -> Option<V>
    where
        F: FnOnce(&mut V),
    {
        let mut map = self.map.write();
        let value = map.get_mut(key)?;
        f(value);
        Some(value.clone())
    }

    /// Insert `default` if the key is absent, then apply `f` to the entry.
    pub fn upsert<F>(&self, key: impl Into<String>, default: V, f: F) -> V
    where
        F: FnOnce(&mut V),
    {
        let mut map = self.map.write();
        let value = map.entry(key.into()).or_insert(default);
        f(value);
        value.clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.map.read().keys().cloned().collect()
    }
}

impl<V: Clone> Default for KeyedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
