//! HTTP API surface: request/response DTOs, router and handlers

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::PlannerError;
use crate::models::{
    BudgetBreakdown, DayPlan, Location, RemainingBudget, TripLinks, TripPlan, TripRequest,
};
use crate::planner::TripPlanner;

/// Shared state handed to every handler
pub struct AppState {
    pub planner: TripPlanner,
}

/// A trip-planning submission, one per form submit
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiTripRequest {
    pub origin: String,
    pub destination: String,
    pub mode: crate::models::TransportMode,
    pub budget: u64,
    pub days: u32,
}

impl From<ApiTripRequest> for TripRequest {
    fn from(request: ApiTripRequest) -> Self {
        Self {
            origin: request.origin,
            destination: request.destination,
            mode: request.mode,
            budget: request.budget,
            days: request.days,
        }
    }
}

/// A resolved endpoint of the trip
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiPlace {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
}

impl From<&Location> for ApiPlace {
    fn from(location: &Location) -> Self {
        Self {
            name: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            country: location.country.clone(),
        }
    }
}

/// Budget breakdown as rendered on the page
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiBudget {
    pub transport_cost: u64,
    pub hotel_per_day: u64,
    pub local_transport_per_day: u64,
    pub food_per_day: u64,
    pub misc_per_day: u64,
    pub total_cost: u64,
    pub remaining: RemainingBudget,
}

impl From<&BudgetBreakdown> for ApiBudget {
    fn from(breakdown: &BudgetBreakdown) -> Self {
        Self {
            transport_cost: breakdown.transport,
            hotel_per_day: breakdown.hotel_per_day,
            local_transport_per_day: breakdown.local_transport_per_day,
            food_per_day: breakdown.food_per_day,
            misc_per_day: breakdown.misc_per_day,
            total_cost: breakdown.total,
            remaining: breakdown.remaining,
        }
    }
}

/// Booking and map links
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiLinks {
    pub hotel_booking: String,
    pub restaurants: String,
    pub map_embed: String,
    pub flight_booking: Option<String>,
}

impl From<&TripLinks> for ApiLinks {
    fn from(links: &TripLinks) -> Self {
        Self {
            hotel_booking: links.hotel_booking.clone(),
            restaurants: links.restaurants.clone(),
            map_embed: links.map_embed.clone(),
            flight_booking: links.flight_booking.clone(),
        }
    }
}

/// One day section of the itinerary
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiDayPlan {
    pub number: u32,
    pub title: String,
    pub body: String,
}

impl From<&DayPlan> for ApiDayPlan {
    fn from(day: &DayPlan) -> Self {
        Self {
            number: day.number,
            title: day.title.clone(),
            body: day.body.clone(),
        }
    }
}

/// The assembled plan returned to the browser
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiTripPlan {
    pub mode: String,
    pub distance_km: f64,
    pub duration_hours: f64,
    pub origin: ApiPlace,
    pub destination: ApiPlace,
    pub budget: ApiBudget,
    pub links: ApiLinks,
    pub days: Vec<ApiDayPlan>,
    /// Set when the agent pipeline failed; the budget is still valid
    pub pipeline_error: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl From<&TripPlan> for ApiTripPlan {
    fn from(plan: &TripPlan) -> Self {
        Self {
            mode: plan.route.mode.as_str().to_string(),
            distance_km: plan.route.distance_km,
            duration_hours: plan.route.duration_hours,
            origin: ApiPlace::from(&plan.route.origin),
            destination: ApiPlace::from(&plan.route.destination),
            budget: ApiBudget::from(&plan.breakdown),
            links: ApiLinks::from(&plan.links),
            days: plan.days.iter().map(ApiDayPlan::from).collect(),
            pipeline_error: plan.pipeline_error.clone(),
            generated_at: plan.generated_at,
        }
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

/// Wrapper mapping domain errors onto HTTP responses
pub struct ApiError(PlannerError);

impl From<PlannerError> for ApiError {
    fn from(error: PlannerError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PlannerError::Validation { .. } => StatusCode::BAD_REQUEST,
            PlannerError::UnresolvedRoute { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            PlannerError::Api { .. } | PlannerError::Agent { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.0.user_message(),
            kind: self.0.kind().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plan", post(create_plan))
        .with_state(state)
}

async fn create_plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ApiTripRequest>,
) -> Result<Json<ApiTripPlan>, ApiError> {
    let request = TripRequest::from(request);
    let plan = state.planner.plan(&request).await?;
    Ok(Json(ApiTripPlan::from(&plan)))
}
