//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// A place name resolved to coordinates by the geocoding provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Location name (city, region, etc.)
    pub name: String,
    /// Country name as reported by the provider
    pub country: Option<String>,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: None,
        }
    }

    /// Create location with country
    #[must_use]
    pub fn with_country(latitude: f64, longitude: f64, name: String, country: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: Some(country),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Format as the `lon,lat` pair the directions API expects
    #[must_use]
    pub fn lon_lat_param(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lon_lat_param_order() {
        let location = Location::new(17.385, 78.4867, "Hyderabad".to_string());
        assert_eq!(location.lon_lat_param(), "78.4867,17.385");
    }

    #[test]
    fn test_format_coordinates() {
        let location = Location::new(46.818_234, 8.227_456, "Test".to_string());
        assert_eq!(location.format_coordinates(), "46.8182, 8.2275");
    }
}
