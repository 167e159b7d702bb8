//! Prompt result cache
//!
//! Memoizes successful generations keyed by the exact, untrimmed prompt
//! string. Entries expire after a configurable TTL and the map is bounded:
//! at capacity, expired entries are purged first, then the entry closest to
//! expiry is dropped. A miss always falls through to a full provider call.
//!
//! The cache is an explicit component injected into `AppState`, not a
//! process global.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct CacheEntry {
    data: Value,
    expires_at: Instant,
}

/// TTL-bounded map from prompt to generated course payload
pub struct PromptCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    max_entries: usize,
}

impl PromptCache {
    /// Create a cache with the given TTL and capacity
    ///
    /// `max_entries` of zero is treated as one; the constructor never fails.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Look up an unexpired entry for the prompt
    ///
    /// Expired entries are treated as misses and removed on the way out.
    pub fn get(&self, prompt: &str) -> Option<Value> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(prompt) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.data.clone()),
            Some(_) => {
                entries.remove(prompt);
                None
            }
            None => None,
        }
    }

    /// Insert or overwrite the entry for the prompt
    pub fn put(&self, prompt: &str, data: Value) {
        let now = Instant::now();
        let mut entries = self.entries.lock().expect("cache mutex poisoned");

        if !entries.contains_key(prompt) && entries.len() >= self.max_entries {
            entries.retain(|_, entry| entry.expires_at > now);
        }
        if !entries.contains_key(prompt) && entries.len() >= self.max_entries {
            // Still full after purging: drop the entry closest to expiry.
            if let Some(key) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.expires_at)
                .map(|(key, _)| key.clone())
            {
                entries.remove(&key);
            }
        }

        entries.insert(
            prompt.to_string(),
            CacheEntry {
                data,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Number of entries currently held, expired or not
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache mutex poisoned").len()
    }

    /// True when the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
