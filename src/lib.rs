//! # plancache
//!
//! Response caching core for AI-generated travel plans.
//!
//! Assembling an itinerary means paying for model completions plus weather,
//! POI, and geocoding lookups. This crate memoizes that work for a bounded
//! window, keyed by the semantic parameters of a request (destination, day
//! count, mood, interests), so repeated requests are served from storage
//! instead of the upstream services.
//!
//! ## Core Pieces
//!
//! - **Key derivation**: [`cache::KeyDeriver`] builds canonical,
//!   collision-resistant keys; `"Goa"` and `" goa "` collide on purpose.
//! - **Storage**: [`cache::CacheStore`] enforces a per-class TTL (24 h for
//!   plans, 6 h for lookups) over a pluggable [`cache::CacheBackend`];
//!   a durable SQLite backend ships behind the `sqlite` feature.
//! - **Orchestration**: [`cache::PlanCache`] is the entry point; it consults
//!   the store and falls back to a [`PlanGenerator`] collaborator on a miss.
//!   Store failures degrade to misses; they never fail the request.
//! - **Auxiliary lookups**: [`cache::LookupCache`] memoizes POI and hotel
//!   listings in memory with the shorter TTL.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use plancache::types::PlanDocument;
//! use plancache::{CacheConfig, CacheStore, PlanCache, PlanGenerator, PlanRequest};
//!
//! struct UpstreamPlanner;
//!
//! #[async_trait]
//! impl PlanGenerator for UpstreamPlanner {
//!     async fn generate(&self, request: &PlanRequest) -> plancache::Result<PlanDocument> {
//!         // Call the model and weather/POI services here.
//!         Ok(PlanDocument::new(
//!             request.destination.clone(),
//!             request.days,
//!             request.mood.clone(),
//!         ))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> plancache::Result<()> {
//!     let store = CacheStore::in_memory(CacheConfig::default());
//!     let cache = PlanCache::new(store, Arc::new(UpstreamPlanner));
//!
//!     let request = PlanRequest::new("Goa", 3, "relaxing");
//!     let plan = cache.get_or_generate(&request).await?;
//!     println!("{} days in {}", plan.days, plan.destination);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Key derivation, stores, backends, orchestration |
//! | [`generator`] | The plan generator collaborator boundary |
//! | [`types`] | Plan requests, plan documents, trip records |
//! | [`error`] | Unified error type |

pub mod cache;
pub mod error;
pub mod generator;
pub mod types;

// Re-export main types for convenience
pub use cache::{
    BudgetBand, CacheBackend, CacheConfig, CacheKey, CacheStats, CacheStore, KeyDeriver,
    LookupCache, MemoryBackend, NullBackend, PlanCache,
};
pub use error::Error;
pub use generator::PlanGenerator;
pub use types::{PlanDocument, PlanRequest, TripRecord};

#[cfg(feature = "sqlite")]
pub use cache::{SqliteBackend, SqliteBackendConfig};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
