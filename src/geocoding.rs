//! OpenRouteService geocoding client
//!
//! Resolves free-text place names to coordinates. Candidates are returned
//! in provider order; an empty list means the name could not be resolved.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::GeoConfig;
use crate::models::Location;

/// Geocoding client for the `/geocode/search` endpoint
#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    api_key: String,
    base_url: String,
    candidates: u32,
}

impl GeocodeClient {
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
            candidates: config.candidates,
        })
    }

    /// Look up `place` and return the provider's candidates in order
    #[instrument(skip(self))]
    pub async fn geocode(&self, place: &str) -> Result<Vec<Location>> {
        let url = format!(
            "{}/geocode/search?api_key={}&text={}&size={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(place),
            self.candidates
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Geocoding request for '{place}' failed"))?;

        let body: openroute::GeocodeResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse geocoding response for '{place}'"))?;

        let candidates: Vec<Location> = body
            .features
            .unwrap_or_default()
            .into_iter()
            .filter_map(|feature| feature.into_location(place))
            .collect();

        debug!(count = candidates.len(), "Geocoding candidates received");
        Ok(candidates)
    }
}

/// `OpenRouteService` geocoding response structures and conversion utilities
mod openroute {
    use serde::Deserialize;

    use crate::models::Location;

    /// GeoJSON feature collection returned by `/geocode/search`
    #[derive(Debug, Deserialize)]
    pub struct GeocodeResponse {
        pub features: Option<Vec<Feature>>,
    }

    /// A single geocoding candidate
    #[derive(Debug, Deserialize)]
    pub struct Feature {
        pub geometry: Option<Geometry>,
        #[serde(default)]
        pub properties: Properties,
    }

    #[derive(Debug, Deserialize)]
    pub struct Geometry {
        /// `[longitude, latitude]` per GeoJSON
        pub coordinates: Option<Vec<f64>>,
    }

    #[derive(Debug, Deserialize, Default)]
    pub struct Properties {
        pub name: Option<String>,
        pub label: Option<String>,
        pub country: Option<String>,
    }

    impl Feature {
        /// Convert to a domain `Location`. Features without a usable
        /// coordinate pair are dropped; a missing display name falls back
        /// to the queried text.
        pub fn into_location(self, queried: &str) -> Option<Location> {
            let coordinates = self.geometry?.coordinates?;
            let longitude = *coordinates.first()?;
            let latitude = *coordinates.get(1)?;

            let name = self
                .properties
                .name
                .or(self.properties.label)
                .unwrap_or_else(|| queried.to_string());

            Some(match self.properties.country {
                Some(country) => Location::with_country(latitude, longitude, name, country),
                None => Location::new(latitude, longitude, name),
            })
        }
    }
}
