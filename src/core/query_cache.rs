//! In-memory request cache keyed by query
//!
//! Values are stored as JSON so one cache serves every record type. Each key
//! has a generation counter: invalidation bumps it and marks the entry stale,
//! and a response is only written back if it was issued under the current
//! generation, so a slow response can never overwrite newer data.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Cache keys used across pages
pub mod keys {
    pub const CURRENT_USER: &str = "auth/me";
    pub const EVENTS: &str = "events";
    pub const UNITS: &str = "units";
    pub const AARS: &str = "aars";
}

#[derive(Debug, Clone, Default)]
struct CacheEntry {
    value: Option<serde_json::Value>,
    generation: u64,
    stale: bool,
}

#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: HashMap<String, CacheEntry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation a fetch for `key` should be issued under
    pub fn generation(&self, key: &str) -> u64 {
        self.entries.get(key).map_or(0, |e| e.generation)
    }

    /// Cached value, fresh or stale
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?.value.as_ref()?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Cached value only while it has not been invalidated. Views that keep
    /// local edits on top of a query read this so a stale copy never
    /// overwrites them.
    pub fn get_fresh<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.is_fresh(key).then(|| self.get(key)).flatten()
    }

    /// True when a value is cached and has not been invalidated since
    pub fn is_fresh(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|e| e.value.is_some() && !e.stale)
    }

    /// Write a response issued under `issued_at`; dropped if the key was
    /// invalidated in the meantime
    pub fn store<T: Serialize>(&mut self, key: &str, issued_at: u64, value: &T) -> bool {
        if issued_at != self.generation(key) {
            return false;
        }
        let Ok(json) = serde_json::to_value(value) else {
            return false;
        };
        let entry = self.entries.entry(key.to_string()).or_default();
        entry.value = Some(json);
        entry.stale = false;
        true
    }

    /// Write a value directly, e.g. the user returned by login
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> bool {
        let generation = self.generation(key);
        self.store(key, generation, value)
    }

    /// Mark `key` stale and return its new generation
    pub fn invalidate(&mut self, key: &str) -> u64 {
        let entry = self.entries.entry(key.to_string()).or_default();
        entry.generation += 1;
        entry.stale = true;
        entry.generation
    }

    /// Invalidate every key starting with `prefix`
    pub fn invalidate_prefix(&mut self, prefix: &str) -> Vec<String> {
        let mut invalidated: Vec<String> = self
            .entries
            .iter_mut()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, entry)| {
                entry.generation += 1;
                entry.stale = true;
                key.clone()
            })
            .collect();
        invalidated.sort();
        invalidated
    }

    /// Forget all values. Generations keep counting so in-flight responses
    /// from before the clear are dropped.
    pub fn clear(&mut self) {
        for entry in self.entries.values_mut() {
            entry.value = None;
            entry.generation += 1;
            entry.stale = true;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.values().filter(|e| e.value.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_get() {
        let mut cache = QueryCache::new();
        assert!(!cache.is_fresh(keys::EVENTS));
        assert_eq!(cache.get::<Vec<i64>>(keys::EVENTS), None);

        let generation = cache.generation(keys::EVENTS);
        assert!(cache.store(keys::EVENTS, generation, &vec![1, 2, 3]));
        assert!(cache.is_fresh(keys::EVENTS));
        assert_eq!(cache.get::<Vec<i64>>(keys::EVENTS), Some(vec![1, 2, 3]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_keeps_stale_value() {
        let mut cache = QueryCache::new();
        cache.set(keys::EVENTS, &vec![1, 2]);

        let next = cache.invalidate(keys::EVENTS);
        assert_eq!(next, 1);
        assert!(!cache.is_fresh(keys::EVENTS));
        assert_eq!(cache.get::<Vec<i64>>(keys::EVENTS), Some(vec![1, 2]));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut cache = QueryCache::new();
        let issued = cache.generation(keys::EVENTS);

        // a delete lands while the list request is in flight
        cache.invalidate(keys::EVENTS);

        assert!(!cache.store(keys::EVENTS, issued, &vec![1, 2, 3]));
        assert_eq!(cache.get::<Vec<i64>>(keys::EVENTS), None);

        let reissued = cache.generation(keys::EVENTS);
        assert!(cache.store(keys::EVENTS, reissued, &vec![1, 3]));
        assert_eq!(cache.get::<Vec<i64>>(keys::EVENTS), Some(vec![1, 3]));
    }

    #[test]
    fn test_get_fresh_hides_invalidated_value() {
        let mut cache = QueryCache::new();
        assert_eq!(cache.get_fresh::<Vec<i64>>(keys::EVENTS), None);

        cache.set(keys::EVENTS, &vec![1, 2]);
        assert_eq!(cache.get_fresh::<Vec<i64>>(keys::EVENTS), Some(vec![1, 2]));

        let generation = cache.invalidate(keys::EVENTS);
        assert_eq!(cache.get_fresh::<Vec<i64>>(keys::EVENTS), None);
        assert_eq!(cache.get::<Vec<i64>>(keys::EVENTS), Some(vec![1, 2]));

        cache.store(keys::EVENTS, generation, &vec![2]);
        assert_eq!(cache.get_fresh::<Vec<i64>>(keys::EVENTS), Some(vec![2]));
    }

    #[test]
    fn test_invalidate_prefix() {
        let mut cache = QueryCache::new();
        cache.set("events", &1);
        cache.set("events/12", &2);
        cache.set("units", &3);

        let invalidated = cache.invalidate_prefix("events");
        assert_eq!(invalidated, vec!["events", "events/12"]);
        assert!(cache.is_fresh("units"));
        assert!(!cache.is_fresh("events/12"));
    }

    #[test]
    fn test_clear_drops_values_and_in_flight_writes() {
        let mut cache = QueryCache::new();
        cache.set(keys::CURRENT_USER, &"jsmith");
        let issued = cache.generation(keys::CURRENT_USER);

        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.store(keys::CURRENT_USER, issued, &"jsmith"));
    }

    #[test]
    fn test_get_with_wrong_type_is_none() {
        let mut cache = QueryCache::new();
        cache.set(keys::UNITS, &"not a list");
        assert_eq!(cache.get::<Vec<i64>>(keys::UNITS), None);
    }
}
