//! `tripsmith` - Smart travel planning with route estimates, budget
//! breakdowns and AI-generated itineraries
//!
//! This library resolves a trip's route through a geocoding/routing
//! provider, splits the budget with fixed ratios, and delegates itinerary
//! writing to a three-stage agent pipeline backed by a language model and
//! a web-search tool.

pub mod agents;
pub mod api;
pub mod budget;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod itinerary;
pub mod llm;
pub mod models;
pub mod planner;
pub mod resolver;
pub mod routing;
pub mod search;
pub mod web;

// Re-export core types for public API
pub use config::PlannerConfig;
pub use error::PlannerError;
pub use models::{
    BudgetBreakdown, Location, RemainingBudget, RouteEstimate, TransportMode, TripPlan,
    TripRequest,
};
pub use planner::TripPlanner;
pub use resolver::{GeoApi, RouteResolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;
