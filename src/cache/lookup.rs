//! Secondary in-memory cache for auxiliary lookups (POIs, hotel listings).

use super::key::KeyDeriver;
use super::store::{CacheConfig, CacheStats, CacheStore};
use crate::types::{HotelListing, PointOfInterest};
use crate::Result;

/// Optional lower/upper bounds on a hotel price filter, in INR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BudgetBand {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl BudgetBand {
    /// No budget filter.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn between(min: u32, max: u32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Short-lived cache for origin-API lookups.
///
/// Same get/put/TTL contract as the plan cache store, but memory-backed and
/// lost on restart: places and hotel listings are cheap to re-fetch. Places
/// keys include interests; hotels keys include the budget band instead.
pub struct LookupCache {
    deriver: KeyDeriver,
    store: CacheStore,
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupCache {
    /// Memory-backed cache with the auxiliary-lookup TTL.
    pub fn new() -> Self {
        Self::with_store(CacheStore::in_memory(CacheConfig::lookups()))
    }

    /// Use a caller-provided store (different TTL or backend).
    pub fn with_store(store: CacheStore) -> Self {
        Self {
            deriver: KeyDeriver::new(),
            store,
        }
    }

    /// Cached points of interest for a city, if still fresh.
    pub async fn places(
        &self,
        city: &str,
        days: u32,
        mood: &str,
        interests: &[String],
    ) -> Result<Option<Vec<PointOfInterest>>> {
        let key = self.deriver.places_key(city, days, mood, interests)?;
        self.store.get(&key).await
    }

    pub async fn store_places(
        &self,
        city: &str,
        days: u32,
        mood: &str,
        interests: &[String],
        places: &[PointOfInterest],
    ) -> Result<()> {
        let key = self.deriver.places_key(city, days, mood, interests)?;
        self.store.put(&key, &places).await
    }

    /// Cached hotel listings for a city, if still fresh.
    pub async fn hotels(
        &self,
        city: &str,
        mood: &str,
        budget: BudgetBand,
    ) -> Result<Option<Vec<HotelListing>>> {
        let key = self.deriver.hotels_key(city, mood, budget.min, budget.max)?;
        self.store.get(&key).await
    }

    pub async fn store_hotels(
        &self,
        city: &str,
        mood: &str,
        budget: BudgetBand,
        hotels: &[HotelListing],
    ) -> Result<()> {
        let key = self.deriver.hotels_key(city, mood, budget.min, budget.max)?;
        self.store.put(&key, &hotels).await
    }

    pub async fn purge_expired(&self) -> Result<usize> {
        self.store.purge_expired().await
    }

    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poi(name: &str) -> PointOfInterest {
        PointOfInterest {
            name: name.into(),
            lat: 15.5,
            lon: 73.8,
            ..Default::default()
        }
    }

    fn hotel(name: &str) -> HotelListing {
        HotelListing {
            name: name.into(),
            budget_range_inr: "₹4,000–₹9,000".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn places_round_trip_with_normalized_city() {
        let cache = LookupCache::new();
        let interests = vec!["beach".to_string()];
        cache
            .store_places("Goa", 3, "relaxing", &interests, &[poi("Baga Beach")])
            .await
            .unwrap();

        let cached = cache
            .places(" GOA ", 3, "Relaxing", &interests)
            .await
            .unwrap()
            .expect("fresh entry");
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].name, "Baga Beach");
    }

    #[tokio::test]
    async fn places_key_includes_interests() {
        let cache = LookupCache::new();
        let beach = vec!["beach".to_string()];
        let food = vec!["food".to_string()];
        cache
            .store_places("Goa", 3, "relaxing", &beach, &[poi("Baga Beach")])
            .await
            .unwrap();

        assert!(cache.places("Goa", 3, "relaxing", &food).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn hotels_key_uses_budget_band() {
        let cache = LookupCache::new();
        let cheap = BudgetBand::between(1000, 4000);
        cache
            .store_hotels("Goa", "relaxing", cheap, &[hotel("Sea View Inn")])
            .await
            .unwrap();

        assert!(cache
            .hotels("Goa", "relaxing", cheap)
            .await
            .unwrap()
            .is_some());
        assert!(cache
            .hotels("Goa", "relaxing", BudgetBand::any())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn purge_on_fresh_cache_removes_nothing() {
        let cache = LookupCache::new();
        cache
            .store_hotels("Goa", "relaxing", BudgetBand::any(), &[hotel("Sea View Inn")])
            .await
            .unwrap();
        assert_eq!(cache.purge_expired().await.unwrap(), 0);
    }
}
