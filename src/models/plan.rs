//! Trip requests and assembled travel plans

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BudgetBreakdown, RouteEstimate, TransportMode};
use crate::PlannerError;

/// Upper bound on trip length, mirrored by the form widget
pub const MAX_TRIP_DAYS: u32 = 30;

/// A single trip-planning submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Starting point, e.g. "Hyderabad"
    pub origin: String,
    /// Destination, e.g. "Warangal or New York"
    pub destination: String,
    /// Preferred mode of transport
    pub mode: TransportMode,
    /// Whole-currency budget for the entire trip
    pub budget: u64,
    /// Number of vacation days
    pub days: u32,
}

impl TripRequest {
    /// Reject incomplete or out-of-range submissions before any
    /// computation runs.
    pub fn validate(&self) -> crate::Result<()> {
        if self.origin.trim().is_empty()
            || self.destination.trim().is_empty()
            || self.budget == 0
            || self.days == 0
        {
            return Err(PlannerError::validation(
                "Please complete all fields to generate your travel plan.",
            ));
        }
        if self.days > MAX_TRIP_DAYS {
            return Err(PlannerError::validation(format!(
                "Number of vacation days must be between 1 and {MAX_TRIP_DAYS}."
            )));
        }
        Ok(())
    }
}

/// One day of the generated itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based position within the itinerary
    pub number: u32,
    /// Day marker as it appeared in the generated text, e.g. "Day 1:"
    pub title: String,
    /// Itinerary text for this day
    pub body: String,
}

/// Booking and map links rendered alongside the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripLinks {
    /// Hotel booking portal
    pub hotel_booking: String,
    /// Restaurant search near the destination
    pub restaurants: String,
    /// Embeddable destination map
    pub map_embed: String,
    /// Flight booking search, only present for Flight trips
    pub flight_booking: Option<String>,
}

/// The assembled response for one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    /// Resolved route with distance and duration
    pub route: RouteEstimate,
    /// Fixed-ratio budget breakdown
    pub breakdown: BudgetBreakdown,
    /// Booking and map links
    pub links: TripLinks,
    /// Day-by-day itinerary; empty when the agent pipeline failed
    pub days: Vec<DayPlan>,
    /// Set when the agent pipeline failed after the budget was computed
    pub pipeline_error: Option<String>,
    /// When this plan was assembled
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TripRequest {
        TripRequest {
            origin: "Hyderabad".to_string(),
            destination: "Warangal".to_string(),
            mode: TransportMode::Car,
            budget: 10000,
            days: 5,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_blank_origin_rejected() {
        let mut req = request();
        req.origin = "   ".to_string();
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("complete all fields"));
    }

    #[test]
    fn test_zero_budget_rejected() {
        let mut req = request();
        req.budget = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_zero_days_rejected() {
        let mut req = request();
        req.days = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_too_many_days_rejected() {
        let mut req = request();
        req.days = 31;
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("between 1 and 30"));
    }

    #[test]
    fn test_thirty_days_allowed() {
        let mut req = request();
        req.days = 30;
        assert!(req.validate().is_ok());
    }
}
