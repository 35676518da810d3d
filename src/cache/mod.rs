//! Response caching for generated travel plans and auxiliary lookups.
//!
//! Repeated requests with the same semantic parameters (destination, day
//! count, mood, interests) are expensive to serve from the upstream
//! generator, so results are memoized for a bounded window: 24 hours for
//! generated plans, 6 hours for POI/hotel lookups.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`KeyDeriver`] | Canonical cache keys from request parameters |
//! | [`CacheStore`] | TTL-aware typed storage over a backend |
//! | [`PlanCache`] | get-or-generate orchestration for plan documents |
//! | [`LookupCache`] | Short-lived memory cache for POI/hotel lookups |
//! | [`CacheBackend`] | Trait for pluggable storage backends |
//! | [`MemoryBackend`] | Bounded in-memory backend |
//! | [`NullBackend`] | No-op backend for disabling caching |
//! | [`SqliteBackend`] | Durable SQLite backend (feature `sqlite`) |
//!
//! ## Example
//!
//! ```rust
//! use plancache::cache::{CacheConfig, CacheStore, LookupCache};
//! use std::time::Duration;
//!
//! // A plan store with a 24-hour TTL and a lookup cache with a 6-hour TTL.
//! let plans = CacheStore::in_memory(CacheConfig::default());
//! let lookups = LookupCache::new();
//!
//! // TTL is per cache class, not per entry.
//! assert_eq!(plans.ttl(), Duration::from_secs(24 * 60 * 60));
//! # drop((plans, lookups));
//! ```
//!
//! Cache failures never fail the user-visible request: [`PlanCache`] treats
//! failed reads as misses and drops failed writes with a warning.

mod backend;
mod key;
mod lookup;
mod maintenance;
mod plan_cache;
mod store;

#[cfg(feature = "sqlite")]
mod sqlite;

pub use backend::{CacheBackend, MemoryBackend, NullBackend, StoredEntry, DEFAULT_MAX_ENTRIES};
pub use key::{CacheKey, KeyDeriver, DEFAULT_MAX_KEY_LEN};
pub use lookup::{BudgetBand, LookupCache};
pub use maintenance::spawn_purge_task;
pub use plan_cache::PlanCache;
pub use store::{CacheConfig, CacheStats, CacheStore, LOOKUP_TTL, PLAN_TTL};

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteBackend, SqliteBackendConfig};
