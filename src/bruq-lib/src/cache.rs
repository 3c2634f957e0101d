//! Time-based memoization of filesystem and parse work.
//!
//! Entries expire lazily: an entry older than its namespace TTL is treated as
//! absent and evicted on the next `get` or sweep. Nothing runs in the
//! background.

use crate::core::config::CacheConfig;
use crate::syntax::{EnvironmentDefinition, RequestDefinition};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct CacheEntry<T> {
    pub data: T,
    pub inserted_at: Instant,
    hit_count: AtomicU64,
}

impl<T> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            inserted_at: Instant::now(),
            hit_count: AtomicU64::new(0),
        }
    }

    pub fn hit_count(&self) -> u64 {
        self.hit_count.load(Ordering::Relaxed)
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() > ttl
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub size: usize,
    pub total_hits: u64,
    pub keys: Vec<String>,
}

/// One namespace: a string-keyed map with a single TTL.
///
/// Readers share the lock and bump hit counters atomically, so lookups never
/// serialize behind each other. Concurrent `set` on the same key is last
/// writer wins.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &str) -> Option<T> {
        {
            let entries = self.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(self.ttl) => {
                    entry.hit_count.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.data.clone());
                }
                Some(_) => {}
            }
        }

        // Expired: re-check under the write lock since a writer may have
        // refreshed the key in between.
        let mut entries = self.write();
        if entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(self.ttl))
        {
            entries.remove(key);
        }
        None
    }

    pub fn set(&self, key: impl Into<String>, data: T) {
        self.write().insert(key.into(), CacheEntry::new(data));
    }

    pub fn remove(&self, key: &str) -> Option<T> {
        self.write().remove(key).map(|entry| entry.data)
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    /// Live entry count; expired entries are swept first.
    pub fn len(&self) -> usize {
        self.sweep();
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.sweep();
        let entries = self.read();
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        CacheStats {
            size: entries.len(),
            total_hits: entries.values().map(CacheEntry::hit_count).sum(),
            keys,
        }
    }

    fn sweep(&self) {
        let ttl = self.ttl;
        self.write().retain(|_, entry| !entry.is_expired(ttl));
    }

    // A panic while holding the lock leaves the map itself consistent, so a
    // poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry<T>>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry<T>>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceStats {
    pub namespace: &'static str,
    pub ttl_secs: u64,
    #[serde(flatten)]
    pub stats: CacheStats,
}

/// The four namespaces shared by every pipeline run in a process.
///
/// Construct one and hand it around behind an `Arc`; there is no global.
#[derive(Debug)]
pub struct CollectionCache {
    /// Parsed request lists keyed by collection root.
    pub requests: TtlCache<Vec<RequestDefinition>>,
    /// Discovered roots keyed by `<search root>#<depth>`.
    pub discovery: TtlCache<Vec<PathBuf>>,
    /// Parsed environments keyed by collection root.
    pub environments: TtlCache<Vec<EnvironmentDefinition>>,
    /// Raw file text keyed by absolute path.
    pub files: TtlCache<String>,
}

impl CollectionCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            requests: TtlCache::new(config.request_ttl),
            discovery: TtlCache::new(config.discovery_ttl),
            environments: TtlCache::new(config.environment_ttl),
            files: TtlCache::new(config.file_ttl),
        }
    }

    pub fn clear_all(&self) {
        self.requests.clear();
        self.discovery.clear();
        self.environments.clear();
        self.files.clear();
        log::debug!("Cleared all cache namespaces");
    }

    pub fn stats(&self) -> Vec<NamespaceStats> {
        fn entry<T: Clone>(namespace: &'static str, cache: &TtlCache<T>) -> NamespaceStats {
            NamespaceStats {
                namespace,
                ttl_secs: cache.ttl().as_secs(),
                stats: cache.stats(),
            }
        }
        vec![
            entry("requests", &self.requests),
            entry("discovery", &self.discovery),
            entry("environments", &self.environments),
            entry("files", &self.files),
        ]
    }
}

impl Default for CollectionCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
