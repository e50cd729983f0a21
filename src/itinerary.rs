//! Itinerary text processing and plan links
//!
//! The agent pipeline returns one block of prose. This module splits it
//! into day sections on `Day <n>` markers and builds the booking/map links
//! rendered next to the plan.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{DayPlan, TransportMode, TripLinks};

/// Matches day markers like "Day 1:", "day 2-" or "DAY3"
static DAY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Day\s*\d+[:\-]?").unwrap());

/// Split generated itinerary text into day sections.
///
/// Without any marker the whole text becomes a single section. With
/// markers, each section runs from its marker to the next one and text
/// before the first marker is dropped.
#[must_use]
pub fn split_days(text: &str) -> Vec<DayPlan> {
    let markers: Vec<_> = DAY_MARKER.find_iter(text).collect();

    if markers.is_empty() {
        return vec![DayPlan {
            number: 1,
            title: "Itinerary".to_string(),
            body: text.trim().to_string(),
        }];
    }

    markers
        .iter()
        .enumerate()
        .map(|(index, marker)| {
            let body_end = markers
                .get(index + 1)
                .map_or(text.len(), regex::Match::start);
            DayPlan {
                number: index as u32 + 1,
                title: marker.as_str().to_string(),
                body: text[marker.end()..body_end].trim().to_string(),
            }
        })
        .collect()
}

/// Build the booking and map links for a trip. Spaces in the destination
/// become `+` for the Google URLs; the flight link only exists for Flight
/// trips.
#[must_use]
pub fn build_links(
    google_api_key: &str,
    origin: &str,
    destination: &str,
    mode: TransportMode,
) -> TripLinks {
    let plus_destination = destination.replace(' ', "+");

    TripLinks {
        hotel_booking: "https://www.booking.com".to_string(),
        restaurants: format!(
            "https://www.google.com/maps/search/restaurants+in+{plus_destination}"
        ),
        map_embed: format!(
            "https://www.google.com/maps/embed/v1/place?key={google_api_key}&q={plus_destination}"
        ),
        flight_booking: mode.is_flight().then(|| {
            format!("https://www.google.com/flights?f=0&hl=en#flt={origin}.{destination}")
        }),
    }
}
