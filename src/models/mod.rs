//! Data models for the tripsmith application
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and metadata
//! - Route: Transport modes and distance/duration estimates
//! - Budget: Fixed-ratio cost breakdowns
//! - Plan: Trip requests and assembled travel plans

pub mod budget;
pub mod location;
pub mod plan;
pub mod route;

// Re-export all public types for convenient access
pub use budget::{BudgetBreakdown, RemainingBudget};
pub use location::Location;
pub use plan::{DayPlan, TripLinks, TripPlan, TripRequest};
pub use route::{RouteEstimate, TransportMode};
