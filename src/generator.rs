//! The plan generator collaborator boundary.

use async_trait::async_trait;

use crate::types::{PlanDocument, PlanRequest};
use crate::Result;

/// Produces a plan document for a validated request.
///
/// Implementations wrap the expensive upstream work (model completions,
/// weather and geocoding lookups). The cache assumes generation is idempotent:
/// calling `generate` repeatedly with the same request must be safe, since
/// concurrent first-time requests for one key may each invoke it.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Generate a plan, failing with [`Error::Generation`](crate::Error) on
    /// any upstream error. Failed generations are never cached.
    async fn generate(&self, request: &PlanRequest) -> Result<PlanDocument>;
}
