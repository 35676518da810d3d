//! Cache backend implementations.
//!
//! A backend is the persistent key-value collaborator: string keys, opaque
//! serialized values, and a creation timestamp per entry. Backends know
//! nothing about TTLs; freshness policy lives in [`CacheStore`](super::CacheStore),
//! which also drives age-based purges through `purge_older_than`.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::SystemTime;

use async_trait::async_trait;

use super::key::CacheKey;
use crate::{Error, Result};

/// Default entry bound for [`MemoryBackend`].
pub const DEFAULT_MAX_ENTRIES: usize = 4096;

/// A raw entry as stored by a backend.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub data: Vec<u8>,
    pub created_at: SystemTime,
}

/// Storage boundary for cache entries.
///
/// Implementations must give atomic per-key operations; `set` is
/// insert-or-replace with a fresh creation timestamp and last-write-wins
/// semantics. No multi-key transactions are required.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<StoredEntry>>;
    async fn set(&self, key: &CacheKey, value: &[u8]) -> Result<()>;
    /// Remove the entry for `key`, reporting whether one existed.
    async fn delete(&self, key: &CacheKey) -> Result<bool>;
    /// Remove every entry created before `cutoff`, returning the count.
    async fn purge_older_than(&self, cutoff: SystemTime) -> Result<usize>;
    async fn clear(&self) -> Result<()>;
    async fn len(&self) -> Result<usize>;
    fn name(&self) -> &'static str;
}

/// In-memory backend: a bounded map, lost on process restart.
///
/// Suitable for the auxiliary lookup caches, whose contents are cheaply
/// re-fetchable from the origin API.
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, StoredEntry>>,
    max_entries: usize,
}

impl MemoryBackend {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
        }
    }

    fn evict_if_needed(&self, entries: &mut HashMap<String, StoredEntry>) {
        while entries.len() >= self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.created_at)
                .map(|(k, _)| k.clone());
            match oldest {
                Some(k) => {
                    entries.remove(&k);
                }
                None => break,
            }
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

fn poisoned() -> Error {
    Error::store("memory backend lock poisoned")
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &CacheKey) -> Result<Option<StoredEntry>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key.as_str()).cloned())
    }

    async fn set(&self, key: &CacheKey, value: &[u8]) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        if !entries.contains_key(key.as_str()) {
            self.evict_if_needed(&mut entries);
        }
        entries.insert(
            key.as_str().to_string(),
            StoredEntry {
                data: value.to_vec(),
                created_at: SystemTime::now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        Ok(entries.remove(key.as_str()).is_some())
    }

    async fn purge_older_than(&self, cutoff: SystemTime) -> Result<usize> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let before = entries.len();
        entries.retain(|_, e| e.created_at >= cutoff);
        Ok(before - entries.len())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.clear();
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.len())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// No-op backend that always misses. Disables caching without touching the
/// call sites.
#[derive(Debug, Clone, Default)]
pub struct NullBackend;

impl NullBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheBackend for NullBackend {
    async fn get(&self, _: &CacheKey) -> Result<Option<StoredEntry>> {
        Ok(None)
    }

    async fn set(&self, _: &CacheKey, _: &[u8]) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _: &CacheKey) -> Result<bool> {
        Ok(false)
    }

    async fn purge_older_than(&self, _: SystemTime) -> Result<usize> {
        Ok(0)
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(0)
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
