//! Plan cache orchestration: the public entry point for cached generation.

use std::sync::Arc;

use tracing::{debug, warn};

use super::key::KeyDeriver;
use super::store::CacheStore;
use crate::generator::PlanGenerator;
use crate::types::{PlanDocument, PlanRequest};
use crate::Result;

/// Memoizes plan generation behind a TTL-bounded store.
///
/// An explicitly constructed instance owns its store and generator; there is
/// no process-wide cache state. At most one semantically identical request
/// per TTL window reaches the generator under steady load. Concurrent
/// first-time requests for the same key may each generate; the generator is
/// idempotent and the later write simply wins, so no single-flight lock is
/// held across generation.
pub struct PlanCache {
    deriver: KeyDeriver,
    store: CacheStore,
    generator: Arc<dyn PlanGenerator>,
}

impl PlanCache {
    pub fn new(store: CacheStore, generator: Arc<dyn PlanGenerator>) -> Self {
        Self {
            deriver: KeyDeriver::new(),
            store,
            generator,
        }
    }

    pub fn with_deriver(mut self, deriver: KeyDeriver) -> Self {
        self.deriver = deriver;
        self
    }

    /// Return the cached document for `request`, generating and storing one
    /// on a miss.
    ///
    /// Repeated calls within the TTL window return the stored document
    /// unchanged. Store failures degrade: a failed read is treated as a miss
    /// and a failed write is dropped with a warning; only invalid-parameter
    /// and generation errors reach the caller.
    pub async fn get_or_generate(&self, request: &PlanRequest) -> Result<PlanDocument> {
        request.validate()?;
        let key = self.deriver.plan_key(request)?;

        match self.store.get::<PlanDocument>(&key).await {
            Ok(Some(document)) => {
                debug!(key = %key, "plan cache hit");
                return Ok(document);
            }
            Ok(None) => {
                debug!(key = %key, "plan cache miss");
            }
            Err(e) => {
                warn!(key = %key, error = %e, "plan cache read failed, treating as miss");
            }
        }

        let document = self.generator.generate(request).await?;

        if let Err(e) = self.store.put(&key, &document).await {
            warn!(key = %key, error = %e, "failed to cache generated plan");
        }
        Ok(document)
    }

    /// Drop the cached entry for `request`, e.g. after the upstream data it
    /// was generated from changes.
    pub async fn invalidate(&self, request: &PlanRequest) -> Result<bool> {
        let key = self.deriver.plan_key(request)?;
        self.store.delete(&key).await
    }

    /// Remove all entries past the TTL; the periodic maintenance entry point.
    pub async fn purge_expired(&self) -> Result<usize> {
        self.store.purge_expired().await
    }

    pub fn stats(&self) -> super::store::CacheStats {
        self.store.stats()
    }
}
