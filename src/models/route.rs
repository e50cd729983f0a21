//! Transport modes and route estimates

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Location;

/// The transport mode selected on the trip form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportMode {
    Flight,
    Train,
    Bus,
    Car,
    Bike,
}

impl TransportMode {
    /// All selectable modes, in form order
    pub const ALL: [Self; 5] = [Self::Flight, Self::Train, Self::Bus, Self::Car, Self::Bike];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flight => "Flight",
            Self::Train => "Train",
            Self::Bus => "Bus",
            Self::Car => "Car",
            Self::Bike => "Bike",
        }
    }

    /// The OpenRouteService directions profile for ground modes.
    /// Flight has none: it is estimated as a great-circle distance.
    /// Train falls back to the driving profile; the provider has no rail
    /// profile.
    #[must_use]
    pub fn routing_profile(self) -> Option<&'static str> {
        match self {
            Self::Flight => None,
            Self::Car | Self::Train => Some("driving-car"),
            Self::Bike => Some("cycling-regular"),
            Self::Bus => Some("driving-hgv"),
        }
    }

    #[must_use]
    pub fn is_flight(self) -> bool {
        self == Self::Flight
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distance and duration between the resolved endpoints, one decimal each
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEstimate {
    /// Mode that produced this estimate
    pub mode: TransportMode,
    /// Resolved starting point
    pub origin: Location,
    /// Resolved destination
    pub destination: Location,
    /// Distance in kilometers, rounded to one decimal
    pub distance_km: f64,
    /// Travel time in hours, rounded to one decimal
    pub duration_hours: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serde_uses_form_values() {
        for mode in TransportMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{mode}\""));
            let back: TransportMode = serde_json::from_str(&json).unwrap();
            assert_eq!(back, mode);
        }
        assert!(serde_json::from_str::<TransportMode>("\"Boat\"").is_err());
    }

    #[test]
    fn test_routing_profiles() {
        assert_eq!(TransportMode::Flight.routing_profile(), None);
        assert_eq!(TransportMode::Car.routing_profile(), Some("driving-car"));
        assert_eq!(TransportMode::Train.routing_profile(), Some("driving-car"));
        assert_eq!(TransportMode::Bike.routing_profile(), Some("cycling-regular"));
        assert_eq!(TransportMode::Bus.routing_profile(), Some("driving-hgv"));
    }
}
