//! OpenRouteService directions client
//!
//! Fetches a routed distance/duration between two resolved locations for a
//! given travel profile. Only the first segment of the first route matters
//! here; a response without one means the route could not be determined.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::GeoConfig;
use crate::models::Location;

/// Distance and duration of the first segment of a routed path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSegment {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Directions client for the `/v2/directions/{profile}` endpoint
#[derive(Clone)]
pub struct DirectionsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl DirectionsClient {
    /// Create a new client
    pub fn new(config: &GeoConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("tripsmith/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
        })
    }

    /// Route between `origin` and `destination` with the given profile and
    /// return the first segment, or `None` when the provider produced no
    /// usable route.
    #[instrument(skip(self, origin, destination))]
    pub async fn first_segment(
        &self,
        profile: &str,
        origin: &Location,
        destination: &Location,
    ) -> Result<Option<RouteSegment>> {
        let url = format!(
            "{}/v2/directions/{}?start={}&end={}",
            self.base_url,
            profile,
            origin.lon_lat_param(),
            destination.lon_lat_param()
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .send()
            .await
            .with_context(|| format!("Directions request for profile '{profile}' failed"))?;

        let body: openroute::DirectionsResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse directions response for '{profile}'"))?;

        let segment = body.into_segment();
        debug!(found = segment.is_some(), "Directions segment received");
        Ok(segment)
    }
}

/// `OpenRouteService` directions response structures
mod openroute {
    use serde::Deserialize;

    use super::RouteSegment;

    /// GeoJSON feature collection returned by `/v2/directions/{profile}`
    #[derive(Debug, Deserialize)]
    pub struct DirectionsResponse {
        pub features: Option<Vec<Feature>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Feature {
        pub properties: Option<Properties>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Properties {
        pub segments: Option<Vec<Segment>>,
    }

    /// One leg of a routed path
    #[derive(Debug, Deserialize)]
    pub struct Segment {
        /// Meters
        pub distance: Option<f64>,
        /// Seconds
        pub duration: Option<f64>,
    }

    impl DirectionsResponse {
        /// First segment of the first route, if both figures are present
        pub fn into_segment(self) -> Option<RouteSegment> {
            let segment = self
                .features?
                .into_iter()
                .next()?
                .properties?
                .segments?
                .into_iter()
                .next()?;

            match (segment.distance, segment.duration) {
                (Some(distance_meters), Some(duration_seconds)) => Some(RouteSegment {
                    distance_meters,
                    duration_seconds,
                }),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::openroute::DirectionsResponse;

    #[test]
    fn test_parse_full_response() {
        let json = r#"{
            "features": [
                {
                    "properties": {
                        "segments": [
                            {"distance": 140000.0, "duration": 7200.0},
                            {"distance": 5.0, "duration": 2.0}
                        ]
                    }
                }
            ]
        }"#;
        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        let segment = response.into_segment().unwrap();
        assert_eq!(segment.distance_meters, 140000.0);
        assert_eq!(segment.duration_seconds, 7200.0);
    }

    #[test]
    fn test_no_features_yields_no_segment() {
        let response: DirectionsResponse = serde_json::from_str(r#"{"features": []}"#).unwrap();
        assert!(response.into_segment().is_none());

        let response: DirectionsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_segment().is_none());
    }

    #[test]
    fn test_segment_missing_duration_yields_no_segment() {
        let json = r#"{
            "features": [
                {"properties": {"segments": [{"distance": 1000.0}]}}
            ]
        }"#;
        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert!(response.into_segment().is_none());
    }

    #[test]
    fn test_error_shaped_body_yields_no_segment() {
        let json = r#"{"error": {"code": 2010, "message": "Could not find point"}}"#;
        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert!(response.into_segment().is_none());
    }
}
