//! Core type definitions: plan requests, generated plan documents, and
//! persisted trip records.

mod plan;
mod request;
mod trip;

pub use plan::{
    Accommodation, Attraction, DaySegment, DinnerSuggestion, EventListing, HotelListing,
    ItineraryDay, PlanDocument, PointOfInterest, WeatherSummary,
};
pub use request::{PlanRequest, MAX_PLAN_DAYS};
pub use trip::TripRecord;
