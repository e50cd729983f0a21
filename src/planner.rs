//! Request-scoped trip planning orchestration
//!
//! One call per submission: validate, resolve the route, allocate the
//! budget, run the agent pipeline, split the itinerary. The budget part of
//! a plan survives a pipeline failure; route resolution failures stop the
//! request entirely.

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::agents::TripCrew;
use crate::budget;
use crate::itinerary;
use crate::models::{TripPlan, TripRequest};
use crate::resolver::RouteResolver;

/// The planning service handlers call into
pub struct TripPlanner {
    resolver: RouteResolver,
    crew: TripCrew,
    google_api_key: String,
}

impl TripPlanner {
    pub fn new(resolver: RouteResolver, crew: TripCrew, google_api_key: String) -> Self {
        Self {
            resolver,
            crew,
            google_api_key,
        }
    }

    /// Assemble a full trip plan for one submission.
    ///
    /// Steps run strictly in order and each depends on the previous one.
    /// If the agent pipeline fails after the budget was computed, the plan
    /// is returned without day sections and carries `pipeline_error`
    /// instead.
    #[instrument(
        skip(self, request),
        fields(
            origin = %request.origin,
            destination = %request.destination,
            mode = %request.mode,
        )
    )]
    pub async fn plan(&self, request: &TripRequest) -> crate::Result<TripPlan> {
        request.validate()?;

        let route = self
            .resolver
            .resolve(&request.origin, &request.destination, request.mode)
            .await?;

        let breakdown = budget::allocate(
            request.budget,
            request.days,
            request.mode,
            route.distance_km,
        );
        let links = itinerary::build_links(
            &self.google_api_key,
            &request.origin,
            &request.destination,
            request.mode,
        );

        let (days, pipeline_error) = match self.crew.kickoff(request).await {
            Ok(report) => (itinerary::split_days(&report.result), None),
            Err(error) => {
                warn!(
                    error = error.to_string(),
                    "Agent pipeline failed, returning partial plan"
                );
                (Vec::new(), Some(error.user_message()))
            }
        };

        info!(
            days = days.len(),
            over_budget = breakdown.remaining.is_over_budget(),
            "Trip plan assembled"
        );
        Ok(TripPlan {
            route,
            breakdown,
            links,
            days,
            pipeline_error,
            generated_at: Utc::now(),
        })
    }
}
