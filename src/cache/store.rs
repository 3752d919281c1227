// In-memory response cache with per-entry expiry
// Author: kelexine (https://github.com/kelexine)

use crate::config::CacheConfig;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// A cached backend response.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub value: String,
    pub stored_at: Instant,
}

impl CacheEntry {
    /// An entry is valid while strictly younger than `ttl`.
    pub fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) < ttl
    }
}

/// Key → response store shared by every orchestration call.
///
/// Expired entries read as misses and are left in place until overwritten
/// or cleared.
pub struct CacheStore {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl CacheStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Duration::from_secs(config.ttl_seconds))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached value for `key`, if present and not expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_fresh(self.ttl, Instant::now()) => {
                debug!("Cache hit: {}", key);
                crate::metrics::record_cache_hit();
                Some(entry.value.clone())
            }
            Some(_) => {
                debug!("Cache entry expired: {}", key);
                crate::metrics::record_cache_miss();
                None
            }
            None => {
                crate::metrics::record_cache_miss();
                None
            }
        }
    }

    /// Store `value` under `key`, replacing any prior entry.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let entry = CacheEntry {
            key: key.clone(),
            value: value.into(),
            stored_at: Instant::now(),
        };
        let mut entries = self.entries.lock();
        entries.insert(key, entry);
        crate::metrics::update_cache_entries(entries.len());
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
        crate::metrics::update_cache_entries(0);
        debug!("Cache cleared");
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
