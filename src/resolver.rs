//! Route resolution
//!
//! Geocodes both ends of a trip, then estimates distance and duration:
//! flights get a great-circle distance at a fixed cruise speed, ground
//! modes get the first segment of a routed path. Exactly one geocoding
//! lookup per side, exactly one distance path per call, no retries.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::PlannerError;
use crate::config::GeoConfig;
use crate::geocoding::GeocodeClient;
use crate::models::{Location, RouteEstimate, TransportMode};
use crate::routing::{DirectionsClient, RouteSegment};

/// Average cruise speed assumed for flights, km/h
const FLIGHT_SPEED_KMH: f64 = 800.0;

/// Geocoding and routing operations the resolver depends on. Implemented
/// by the OpenRouteService clients and by scripted doubles in tests.
#[async_trait]
pub trait GeoApi: Send + Sync {
    /// Candidates for a place name, in provider order
    async fn geocode(&self, place: &str) -> Result<Vec<Location>>;

    /// First segment of a routed path, or `None` when no route exists
    async fn route_segment(
        &self,
        profile: &str,
        origin: &Location,
        destination: &Location,
    ) -> Result<Option<RouteSegment>>;
}

/// Production [`GeoApi`] backed by OpenRouteService
pub struct OpenRouteApi {
    geocode: GeocodeClient,
    directions: DirectionsClient,
}

impl OpenRouteApi {
    /// Create both provider clients from shared settings
    pub fn new(config: &GeoConfig, api_key: &str) -> Result<Self> {
        Ok(Self {
            geocode: GeocodeClient::new(config, api_key.to_string())?,
            directions: DirectionsClient::new(config, api_key.to_string())?,
        })
    }
}

#[async_trait]
impl GeoApi for OpenRouteApi {
    async fn geocode(&self, place: &str) -> Result<Vec<Location>> {
        self.geocode.geocode(place).await
    }

    async fn route_segment(
        &self,
        profile: &str,
        origin: &Location,
        destination: &Location,
    ) -> Result<Option<RouteSegment>> {
        self.directions.first_segment(profile, origin, destination).await
    }
}

/// Resolves a trip request's endpoints into a distance/duration estimate
#[derive(Clone)]
pub struct RouteResolver {
    geo: Arc<dyn GeoApi>,
}

impl RouteResolver {
    pub fn new(geo: Arc<dyn GeoApi>) -> Self {
        Self { geo }
    }

    /// Resolve both place names and estimate the route for `mode`.
    ///
    /// Both sides are geocoded before either result is inspected; a side
    /// with zero candidates fails the request with
    /// [`PlannerError::UnresolvedRoute`].
    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        origin: &str,
        destination: &str,
        mode: TransportMode,
    ) -> Result<RouteEstimate, PlannerError> {
        let origin_candidates = self.lookup(origin).await?;
        let destination_candidates = self.lookup(destination).await?;

        let origin = Self::first_candidate(origin, origin_candidates)?;
        let destination = Self::first_candidate(destination, destination_candidates)?;
        debug!(
            origin = origin.format_coordinates(),
            destination = destination.format_coordinates(),
            "Endpoints resolved"
        );

        let (distance_km, duration_hours) = match mode.routing_profile() {
            None => Self::great_circle(&origin, &destination),
            Some(profile) => self.routed(profile, &origin, &destination).await?,
        };

        info!(distance_km, duration_hours, %mode, "Route resolved");
        Ok(RouteEstimate {
            mode,
            origin,
            destination,
            distance_km,
            duration_hours,
        })
    }

    async fn lookup(&self, place: &str) -> Result<Vec<Location>, PlannerError> {
        self.geo
            .geocode(place)
            .await
            .map_err(|source| PlannerError::api(format!("{source:#}")))
    }

    fn first_candidate(
        place: &str,
        candidates: Vec<Location>,
    ) -> Result<Location, PlannerError> {
        candidates.into_iter().next().ok_or_else(|| {
            PlannerError::unresolved(format!("no geocoding candidates for '{place}'"))
        })
    }

    /// Great-circle distance plus a fixed-speed duration estimate
    fn great_circle(origin: &Location, destination: &Location) -> (f64, f64) {
        let distance_km = round1(haversine::distance(
            haversine::Location {
                latitude: origin.latitude,
                longitude: origin.longitude,
            },
            haversine::Location {
                latitude: destination.latitude,
                longitude: destination.longitude,
            },
            haversine::Units::Kilometers,
        ));
        let duration_hours = round1(distance_km / FLIGHT_SPEED_KMH);
        (distance_km, duration_hours)
    }

    async fn routed(
        &self,
        profile: &str,
        origin: &Location,
        destination: &Location,
    ) -> Result<(f64, f64), PlannerError> {
        let segment = self
            .geo
            .route_segment(profile, origin, destination)
            .await
            .map_err(|source| PlannerError::api(format!("{source:#}")))?;

        let Some(segment) = segment else {
            return Err(PlannerError::unresolved(format!(
                "no '{profile}' route between '{}' and '{}'",
                origin.name, destination.name
            )));
        };

        Ok((
            round1(segment.distance_meters / 1000.0),
            round1(segment.duration_seconds / 3600.0),
        ))
    }
}

/// Round to one decimal, ties to even
fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted GeoApi double recording the calls it receives
    struct ScriptedGeo {
        geocode_results: Vec<Vec<Location>>,
        segment: Option<RouteSegment>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedGeo {
        fn new(geocode_results: Vec<Vec<Location>>, segment: Option<RouteSegment>) -> Self {
            Self {
                geocode_results,
                segment,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GeoApi for ScriptedGeo {
        async fn geocode(&self, place: &str) -> Result<Vec<Location>> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.iter().filter(|c| c.starts_with("geocode")).count();
            calls.push(format!("geocode {place}"));
            Ok(self.geocode_results.get(index).cloned().unwrap_or_default())
        }

        async fn route_segment(
            &self,
            profile: &str,
            _origin: &Location,
            _destination: &Location,
        ) -> Result<Option<RouteSegment>> {
            self.calls.lock().unwrap().push(format!("route {profile}"));
            Ok(self.segment)
        }
    }

    fn hyderabad() -> Location {
        Location::new(17.385, 78.4867, "Hyderabad".to_string())
    }

    fn warangal() -> Location {
        Location::new(17.9689, 79.5941, "Warangal".to_string())
    }

    fn resolver(geo: ScriptedGeo) -> RouteResolver {
        RouteResolver::new(Arc::new(geo))
    }

    #[tokio::test]
    async fn test_ground_mode_uses_routed_segment() {
        let geo = ScriptedGeo::new(
            vec![vec![hyderabad()], vec![warangal()]],
            Some(RouteSegment {
                distance_meters: 140_000.0,
                duration_seconds: 7200.0,
            }),
        );
        let resolver = resolver(geo);

        let estimate = resolver
            .resolve("Hyderabad", "Warangal", TransportMode::Car)
            .await
            .unwrap();

        assert_eq!(estimate.distance_km, 140.0);
        assert_eq!(estimate.duration_hours, 2.0);
        assert_eq!(estimate.origin.name, "Hyderabad");
        assert_eq!(estimate.destination.name, "Warangal");
    }

    #[tokio::test]
    async fn test_call_order_and_profile() {
        let geo = Arc::new(ScriptedGeo::new(
            vec![vec![hyderabad()], vec![warangal()]],
            Some(RouteSegment {
                distance_meters: 150_500.0,
                duration_seconds: 9000.0,
            }),
        ));
        let resolver = RouteResolver::new(geo.clone());

        resolver
            .resolve("Hyderabad", "Warangal", TransportMode::Bus)
            .await
            .unwrap();

        let calls = geo.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec!["geocode Hyderabad", "geocode Warangal", "route driving-hgv"]
        );
    }

    #[tokio::test]
    async fn test_both_sides_geocoded_before_failing() {
        let geo = Arc::new(ScriptedGeo::new(vec![vec![], vec![warangal()]], None));
        let resolver = RouteResolver::new(geo.clone());

        resolver
            .resolve("Atlantis", "Warangal", TransportMode::Car)
            .await
            .unwrap_err();

        let calls = geo.calls.lock().unwrap();
        assert_eq!(*calls, vec!["geocode Atlantis", "geocode Warangal"]);
    }

    #[tokio::test]
    async fn test_flight_skips_routing() {
        let geo = ScriptedGeo::new(vec![vec![hyderabad()], vec![warangal()]], None);
        let resolver = resolver(geo);

        let estimate = resolver
            .resolve("Hyderabad", "Warangal", TransportMode::Flight)
            .await
            .unwrap();

        // Duration is always derived from the rounded distance.
        assert_eq!(estimate.duration_hours, round1(estimate.distance_km / 800.0));
        assert!(estimate.distance_km > 0.0);
    }

    #[tokio::test]
    async fn test_flight_distance_is_symmetric() {
        let geo_forward = ScriptedGeo::new(vec![vec![hyderabad()], vec![warangal()]], None);
        let geo_reverse = ScriptedGeo::new(vec![vec![warangal()], vec![hyderabad()]], None);

        let forward = resolver(geo_forward)
            .resolve("Hyderabad", "Warangal", TransportMode::Flight)
            .await
            .unwrap();
        let reverse = resolver(geo_reverse)
            .resolve("Warangal", "Hyderabad", TransportMode::Flight)
            .await
            .unwrap();

        assert_eq!(forward.distance_km, reverse.distance_km);
        assert_eq!(forward.duration_hours, reverse.duration_hours);
    }

    #[tokio::test]
    async fn test_zero_distance_flight() {
        let geo = ScriptedGeo::new(vec![vec![hyderabad()], vec![hyderabad()]], None);
        let resolver = resolver(geo);

        let estimate = resolver
            .resolve("Hyderabad", "Hyderabad", TransportMode::Flight)
            .await
            .unwrap();

        assert_eq!(estimate.distance_km, 0.0);
        assert_eq!(estimate.duration_hours, 0.0);
    }

    #[tokio::test]
    async fn test_unresolvable_origin() {
        let geo = ScriptedGeo::new(vec![vec![], vec![warangal()]], None);
        let resolver = resolver(geo);

        let error = resolver
            .resolve("Atlantis", "Warangal", TransportMode::Car)
            .await
            .unwrap_err();

        assert!(matches!(error, PlannerError::UnresolvedRoute { .. }));
        assert!(error.to_string().contains("Atlantis"));
    }

    #[tokio::test]
    async fn test_unresolvable_destination() {
        let geo = ScriptedGeo::new(vec![vec![hyderabad()], vec![]], None);
        let resolver = resolver(geo);

        let error = resolver
            .resolve("Hyderabad", "Atlantis", TransportMode::Train)
            .await
            .unwrap_err();

        assert!(matches!(error, PlannerError::UnresolvedRoute { .. }));
    }

    #[tokio::test]
    async fn test_missing_route_segment() {
        let geo = ScriptedGeo::new(vec![vec![hyderabad()], vec![warangal()]], None);
        let resolver = resolver(geo);

        let error = resolver
            .resolve("Hyderabad", "Warangal", TransportMode::Bike)
            .await
            .unwrap_err();

        assert!(matches!(error, PlannerError::UnresolvedRoute { .. }));
    }

    #[test]
    fn test_round1_half_to_even() {
        assert_eq!(round1(0.25), 0.2);
        assert_eq!(round1(0.26), 0.3);
        assert_eq!(round1(139.96), 140.0);
        assert_eq!(round1(2.0), 2.0);
    }
}
