//! Plan request parameters and validation.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Upper bound on the trip length a request may ask for.
pub const MAX_PLAN_DAYS: u32 = 30;

/// Parameters of a plan generation request.
///
/// Only `destination`, `days`, `mood` and `interests` participate in cache
/// key derivation; the remaining fields personalize the generated document
/// without affecting cacheability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub destination: String,
    pub days: u32,
    pub mood: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub budget_range_inr: Option<String>,
}

impl PlanRequest {
    pub fn new(destination: impl Into<String>, days: u32, mood: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            days,
            mood: mood.into(),
            interests: Vec::new(),
            start_date: None,
            budget_range_inr: None,
        }
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    pub fn with_budget_range(mut self, budget_range_inr: impl Into<String>) -> Self {
        self.budget_range_inr = Some(budget_range_inr.into());
        self
    }

    /// Check the request is well-formed before any generator or store work.
    ///
    /// Destination and mood must be non-empty after trimming; `days` must be
    /// in `[1, MAX_PLAN_DAYS]`.
    pub fn validate(&self) -> Result<()> {
        if self.destination.trim().is_empty() {
            return Err(Error::invalid_parameter("destination must not be empty"));
        }
        if self.days == 0 || self.days > MAX_PLAN_DAYS {
            return Err(Error::invalid_parameter(format!(
                "days must be between 1 and {MAX_PLAN_DAYS}, got {}",
                self.days
            )));
        }
        if self.mood.trim().is_empty() {
            return Err(Error::invalid_parameter("mood must not be empty"));
        }
        Ok(())
    }
}
