//! Normalized records emitted to the display layer.
//!
//! These are the projection targets the pollers produce from raw TfL
//! responses. They serialize with camelCase field names so a downstream
//! consumer sees the same payload shape the API speaks.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A planned journey from the configured origin to one destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyResult {
    /// Display name of the destination, from configuration.
    pub destination_name: String,

    /// Free-text address of the destination, from configuration.
    pub destination_address: String,

    /// Total journey duration in minutes.
    pub duration_minutes: u32,

    /// Departure time as reported by the journey planner (local, ISO 8601).
    pub start_time: String,

    /// Arrival time as reported by the journey planner (local, ISO 8601).
    pub arrival_time: String,

    /// Legs of the journey, in travel order.
    pub legs: Vec<JourneyLeg>,
}

impl JourneyResult {
    /// Total walking minutes across all legs.
    pub fn walking_minutes(&self) -> u32 {
        self.legs
            .iter()
            .filter(|leg| leg.mode == "walking")
            .map(|leg| leg.duration_minutes)
            .sum()
    }
}

/// One leg of a journey.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyLeg {
    /// Mode name, e.g. "tube" or "walking".
    pub mode: String,

    /// Leg duration in minutes.
    pub duration_minutes: u32,

    /// Human-readable instruction summary.
    pub instruction: String,

    /// Common name of the departure point, when the planner provides one.
    pub departure_point: Option<String>,

    /// Common name of the arrival point, when the planner provides one.
    pub arrival_point: Option<String>,

    /// Name of the first route option, when present (e.g. "Northern line").
    pub route_name: Option<String>,
}

/// A single upcoming departure from a station.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureRecord {
    pub line_name: String,
    pub line_id: String,

    /// Destination station name.
    pub destination: String,

    pub platform: Option<String>,

    /// Predicted arrival time at the station.
    pub expected_arrival: DateTime<Utc>,

    /// Seconds until the train reaches the station.
    pub time_to_station_seconds: i64,

    /// Where the train currently is, when the feed reports it.
    pub current_location: Option<String>,

    /// Direction text, e.g. "Morden via Bank".
    pub towards: String,
}

/// Service status for one line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStatusRecord {
    pub line_name: String,
    pub line_id: String,

    /// Current statuses. A line can carry several at once (e.g. a partial
    /// closure alongside minor delays elsewhere).
    pub statuses: Vec<LineStatusEntry>,
}

/// One status entry on a line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStatusEntry {
    /// Numeric severity (10 = good service; lower is worse).
    pub severity: i32,

    /// Human-readable severity, e.g. "Good Service" or "Severe Delays".
    pub severity_description: String,

    /// Explanation text, present when the line is disrupted.
    pub reason: Option<String>,

    /// Structured disruption detail, only when the feed provides one.
    pub disruption: Option<Disruption>,
}

/// Structured disruption detail attached to a status entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Disruption {
    pub category: String,
    pub description: String,
    pub additional_info: Option<String>,
}
