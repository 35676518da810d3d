//! Persisted trip records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PlanDocument;

/// A user-saved trip plan.
///
/// Trip records live in their own namespace with a durable identity: they are
/// never looked up by cache key, and saving a plan is independent of whether
/// the same parameters currently have a live cache entry. The cache is a
/// performance layer over generation, not the system of record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub document: PlanDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TripRecord {
    /// Persist a generated document as a named trip owned by a user.
    pub fn new(
        owner_id: impl Into<String>,
        title: impl Into<String>,
        document: PlanDocument,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            title: title.into(),
            document,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored document, bumping the audit timestamp.
    pub fn update_document(&mut self, document: PlanDocument) {
        self.document = document;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_records_get_distinct_ids() {
        let doc = PlanDocument::new("Goa", 3, "relaxing");
        let a = TripRecord::new("user-1", "Goa getaway", doc.clone());
        let b = TripRecord::new("user-1", "Goa getaway", doc);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn update_bumps_timestamp() {
        let mut record = TripRecord::new("user-1", "Goa", PlanDocument::new("Goa", 3, "relaxing"));
        let before = record.updated_at;
        record.update_document(PlanDocument::new("Goa", 4, "relaxing"));
        assert!(record.updated_at >= before);
        assert_eq!(record.document.days, 4);
    }
}
