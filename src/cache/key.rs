//! Cache key derivation.
//!
//! Keys are canonical strings built from the semantically relevant subset of
//! a request. Equal requests after normalization always produce identical
//! keys; requests differing in any participating field produce different
//! keys. Fields are joined with a reserved control character that is stripped
//! from field content during normalization, so no destination can forge a
//! different field split. Keys are never hashed down to a lossy digest.
//!
//! Field sets per cache class:
//! - plan keys: destination, day count, mood, interests
//! - places keys: city, day count, mood, interests
//! - hotels keys: city, mood, budget band (interests never participate)

use serde::{Deserialize, Serialize};

use crate::types::PlanRequest;
use crate::{Error, Result};

/// Separator between key fields. Control characters are removed from field
/// content before joining, so this cannot occur inside a field.
const FIELD_SEPARATOR: char = '\u{1f}';

/// Separator between items of a list-valued field (interests).
const LIST_SEPARATOR: char = '\u{1e}';

/// Default upper bound on derived key length, in bytes. Over-long keys are
/// rejected rather than truncated; truncation risks collisions.
pub const DEFAULT_MAX_KEY_LEN: usize = 512;

/// An opaque, canonical cache identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Derives cache keys for the plan and auxiliary lookup cache classes.
#[derive(Debug, Clone)]
pub struct KeyDeriver {
    max_key_len: usize,
}

impl Default for KeyDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDeriver {
    pub fn new() -> Self {
        Self {
            max_key_len: DEFAULT_MAX_KEY_LEN,
        }
    }

    pub fn with_max_key_len(mut self, max_key_len: usize) -> Self {
        self.max_key_len = max_key_len;
        self
    }

    /// Key for a generated plan: destination, day count, mood, interests.
    pub fn plan_key(&self, request: &PlanRequest) -> Result<CacheKey> {
        let destination = normalize_field(&request.destination);
        if destination.is_empty() {
            return Err(Error::invalid_parameter("destination must not be empty"));
        }
        if request.days == 0 {
            return Err(Error::invalid_parameter("day count must be positive"));
        }
        self.join(
            "plan",
            &[
                destination,
                request.days.to_string(),
                normalize_field(&request.mood),
                normalize_list(&request.interests),
            ],
        )
    }

    /// Key for a points-of-interest lookup.
    pub fn places_key(
        &self,
        city: &str,
        days: u32,
        mood: &str,
        interests: &[String],
    ) -> Result<CacheKey> {
        let city = normalize_field(city);
        if city.is_empty() {
            return Err(Error::invalid_parameter("city must not be empty"));
        }
        if days == 0 {
            return Err(Error::invalid_parameter("day count must be positive"));
        }
        self.join(
            "places",
            &[
                city,
                days.to_string(),
                normalize_field(mood),
                normalize_list(interests),
            ],
        )
    }

    /// Key for a hotel-listing lookup. Budget bounds participate; interests
    /// deliberately do not.
    pub fn hotels_key(
        &self,
        city: &str,
        mood: &str,
        budget_min: Option<u32>,
        budget_max: Option<u32>,
    ) -> Result<CacheKey> {
        let city = normalize_field(city);
        if city.is_empty() {
            return Err(Error::invalid_parameter("city must not be empty"));
        }
        self.join(
            "hotels",
            &[
                city,
                normalize_field(mood),
                budget_min.map(|v| v.to_string()).unwrap_or_default(),
                budget_max.map(|v| v.to_string()).unwrap_or_default(),
            ],
        )
    }

    fn join(&self, class: &str, fields: &[String]) -> Result<CacheKey> {
        let mut key = String::from(class);
        for field in fields {
            key.push(FIELD_SEPARATOR);
            key.push_str(field);
        }
        if key.len() > self.max_key_len {
            return Err(Error::invalid_parameter(format!(
                "derived cache key is {} bytes, limit is {}",
                key.len(),
                self.max_key_len
            )));
        }
        Ok(CacheKey(key))
    }
}

/// Lower-case, strip control characters, trim, and collapse internal
/// whitespace so `"Goa"` and `" goa "` derive the same key.
fn normalize_field(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| !c.is_control()).collect();
    cleaned
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize, deduplicate, and sort a list field so ordering and repeats do
/// not affect the derived key.
fn normalize_list(items: &[String]) -> String {
    let mut normalized: Vec<String> = items
        .iter()
        .map(|item| normalize_field(item))
        .filter(|item| !item.is_empty())
        .collect();
    normalized.sort();
    normalized.dedup();
    normalized.join(&LIST_SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(destination: &str, days: u32, mood: &str) -> PlanRequest {
        PlanRequest::new(destination, days, mood)
    }

    #[test]
    fn normalization_makes_equivalent_requests_collide() {
        let deriver = KeyDeriver::new();
        let a = deriver.plan_key(&request("Goa", 3, "Relaxing")).unwrap();
        let b = deriver.plan_key(&request("  goa  ", 3, "RELAXING")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn internal_whitespace_is_collapsed() {
        let deriver = KeyDeriver::new();
        let a = deriver.plan_key(&request("New   Delhi", 3, "foodie")).unwrap();
        let b = deriver.plan_key(&request("new delhi", 3, "foodie")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn interests_order_and_duplicates_do_not_matter() {
        let deriver = KeyDeriver::new();
        let a = deriver
            .plan_key(&request("Goa", 3, "relaxing").with_interests(["beach", "food"]))
            .unwrap();
        let b = deriver
            .plan_key(&request("Goa", 3, "relaxing").with_interests(["Food", "beach", "food"]))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn each_field_contributes_to_the_key() {
        let deriver = KeyDeriver::new();
        let base = deriver.plan_key(&request("Goa", 3, "relaxing")).unwrap();
        assert_ne!(
            base,
            deriver.plan_key(&request("Pune", 3, "relaxing")).unwrap()
        );
        assert_ne!(
            base,
            deriver.plan_key(&request("Goa", 4, "relaxing")).unwrap()
        );
        assert_ne!(
            base,
            deriver.plan_key(&request("Goa", 3, "adventure")).unwrap()
        );
        assert_ne!(
            base,
            deriver
                .plan_key(&request("Goa", 3, "relaxing").with_interests(["beach"]))
                .unwrap()
        );
    }

    #[test]
    fn separator_in_field_content_cannot_forge_a_split() {
        let deriver = KeyDeriver::new();
        // "goa\u{1f}3" as a destination must not collide with destination
        // "goa" and day count 3 shifted over; control characters are removed.
        let smuggled = deriver.plan_key(&request("goa\u{1f}3", 3, "relaxing")).unwrap();
        let plain = deriver.plan_key(&request("goa3", 3, "relaxing")).unwrap();
        assert_eq!(smuggled, plain);
    }

    #[test]
    fn empty_and_absent_interests_are_equivalent() {
        let deriver = KeyDeriver::new();
        let a = deriver.plan_key(&request("Goa", 3, "relaxing")).unwrap();
        let b = deriver
            .plan_key(&request("Goa", 3, "relaxing").with_interests(Vec::<String>::new()))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn over_long_keys_are_rejected_not_truncated() {
        let deriver = KeyDeriver::new().with_max_key_len(64);
        let result = deriver.plan_key(&request(&"x".repeat(200), 3, "relaxing"));
        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
    }

    #[test]
    fn zero_days_rejected() {
        let deriver = KeyDeriver::new();
        assert!(deriver.plan_key(&request("Goa", 0, "relaxing")).is_err());
        assert!(deriver.places_key("Goa", 0, "relaxing", &[]).is_err());
    }

    #[test]
    fn hotels_key_ignores_interest_like_input_but_uses_budget() {
        let deriver = KeyDeriver::new();
        let a = deriver.hotels_key("Goa", "relaxing", Some(2000), Some(8000)).unwrap();
        let b = deriver.hotels_key("goa ", "RELAXING", Some(2000), Some(8000)).unwrap();
        let c = deriver.hotels_key("Goa", "relaxing", None, Some(8000)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn cache_classes_are_namespaced() {
        let deriver = KeyDeriver::new();
        let plan = deriver.plan_key(&request("Goa", 3, "relaxing")).unwrap();
        let places = deriver.places_key("Goa", 3, "relaxing", &[]).unwrap();
        assert_ne!(plan, places);
    }
}
