//! In-memory parameter source.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{MutSource, Source};

/// Single-valued, thread-safe parameter source backed by a map.
///
/// `set`, `get`, `get_array`, and `del` on the same key are linearizable: a
/// writer holds the lock exclusively for the duration of its mutation,
/// readers run concurrently with each other but never during a write, and a
/// reader observes either the pre-write or the post-write value, never a
/// mixture.
pub struct MemSource {
    data: RwLock<HashMap<String, String>>,
}

impl MemSource {
    /// Create an empty source with room for `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }
}

impl Source for MemSource {
    fn get(&self, key: &str) -> String {
        self.data
            .read()
            .expect("lock poisoned")
            .get(key)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    fn get_array(&self, key: &str) -> Option<Vec<String>> {
        self.data
            .read()
            .expect("lock poisoned")
            .get(key)
            .map(|v| vec![v.trim().to_string()])
    }
}

impl MutSource for MemSource {
    fn set(&self, key: &str, value: &str) {
        self.data
            .write()
            .expect("lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn del(&self, key: &str) {
        self.data.write().expect("lock poisoned").remove(key);
    }
}
