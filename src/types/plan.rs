//! Structured plan documents produced by itinerary generation.
//!
//! Generator output arrives as JSON; these types give it a defined schema.
//! Parsing is tolerant: every optional field carries a serde default so a
//! document missing sections still deserializes instead of failing the
//! whole cache read.

use serde::{Deserialize, Serialize};

/// A generated travel plan: the payload stored by the plan cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub destination: String,
    #[serde(default)]
    pub start_date: Option<String>,
    pub days: u32,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub famous_places: Vec<Attraction>,
    #[serde(default)]
    pub hotels: Vec<HotelListing>,
    #[serde(default)]
    pub packing_list: Vec<String>,
    #[serde(default)]
    pub events: Vec<EventListing>,
    #[serde(default)]
    pub map_embed_url: String,
    #[serde(default)]
    pub total_budget_inr: String,
}

impl PlanDocument {
    /// Create an empty document for the given trip parameters.
    pub fn new(destination: impl Into<String>, days: u32, mood: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            start_date: None,
            days,
            mood: mood.into(),
            itinerary: Vec::new(),
            famous_places: Vec::new(),
            hotels: Vec::new(),
            packing_list: Vec::new(),
            events: Vec::new(),
            map_embed_url: String::new(),
            total_budget_inr: String::new(),
        }
    }
}

/// One day of the itinerary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: u32,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub morning: DaySegment,
    #[serde(default)]
    pub afternoon: DaySegment,
    #[serde(default)]
    pub evening: DaySegment,
    #[serde(default)]
    pub dinner: DinnerSuggestion,
    #[serde(default)]
    pub accommodation: Accommodation,
    #[serde(default)]
    pub weather: WeatherSummary,
}

/// An activity slot within a day, anchored to a point of interest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DaySegment {
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub poi: PointOfInterest,
}

/// A geocoded point of interest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointOfInterest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub source: String,
}

/// Evening meal suggestion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DinnerSuggestion {
    #[serde(default)]
    pub suggestion: String,
    #[serde(default)]
    pub restaurant_link: String,
}

/// Where the traveller stays that night.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Accommodation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price_in_inr: String,
    #[serde(default)]
    pub link: String,
}

/// Daily weather outlook attached to an itinerary day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherSummary {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub high: String,
    #[serde(default)]
    pub low: String,
}

/// A must-visit attraction outside the day-by-day schedule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Attraction {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub source: String,
}

/// A hotel suggestion with an estimated price band.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HotelListing {
    #[serde(default)]
    pub name: String,
    // Upstream generators have emitted both spellings.
    #[serde(default, alias = "budget_range_in_inr")]
    pub budget_range_inr: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
}

/// A local event during the trip window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventListing {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub link: String,
}
