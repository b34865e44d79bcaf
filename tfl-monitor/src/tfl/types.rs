//! TfL API response DTOs.
//!
//! These types map directly to the TfL Unified API JSON responses.
//! They use `Option` liberally because TfL omits fields rather than
//! sending null values in many cases.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Response from the journey planner
/// (`Journey/JourneyResults/{from}/to/{to}`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyPlannerResult {
    /// Candidate journeys, fastest first under the least-time preference.
    #[serde(default)]
    pub journeys: Vec<JourneyDto>,
}

/// One candidate journey.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyDto {
    /// Total duration in minutes.
    pub duration: u32,

    /// Departure time (local, ISO 8601 without offset).
    pub start_date_time: Option<String>,

    /// Arrival time (local, ISO 8601 without offset).
    pub arrival_date_time: Option<String>,

    /// Legs of the journey, in travel order.
    #[serde(default)]
    pub legs: Vec<LegDto>,
}

/// One leg of a candidate journey.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    /// Leg duration in minutes.
    pub duration: u32,

    pub mode: ModeDto,

    pub instruction: InstructionDto,

    pub departure_point: Option<PointDto>,

    pub arrival_point: Option<PointDto>,

    /// Route options for this leg; the first one names the line taken.
    #[serde(default)]
    pub route_options: Vec<RouteOptionDto>,
}

/// Transport mode of a leg.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeDto {
    /// Mode name, e.g. "tube" or "walking".
    pub name: String,
}

/// Instruction attached to a leg.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionDto {
    /// One-line summary, e.g. "Northern line to Bank".
    pub summary: String,
}

/// A named point on a leg (departure or arrival).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDto {
    pub common_name: Option<String>,
}

/// A route option on a leg.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOptionDto {
    pub name: Option<String>,
}

/// One arrival prediction from `StopPoint/{id}/Arrivals`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionDto {
    pub line_name: Option<String>,

    pub line_id: Option<String>,

    pub destination_name: Option<String>,

    pub platform_name: Option<String>,

    /// Predicted arrival time (UTC).
    pub expected_arrival: DateTime<Utc>,

    /// Seconds until the vehicle reaches the station.
    pub time_to_station: i64,

    pub current_location: Option<String>,

    /// Direction text, e.g. "Morden via Bank".
    pub towards: Option<String>,

    /// Mode of the predicted vehicle, e.g. "tube" or "bus".
    pub mode_name: Option<String>,
}

/// One line entry from `Line/{id}/Status`.
///
/// The endpoint returns a list even when queried with a single line id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDto {
    pub id: String,

    pub name: String,

    /// Current statuses; omitted entirely when TfL has nothing to report.
    #[serde(default)]
    pub line_statuses: Vec<LineStatusDto>,
}

/// One status on a line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStatusDto {
    /// Numeric severity (10 = good service; lower is worse).
    pub status_severity: i32,

    pub status_severity_description: String,

    pub reason: Option<String>,

    pub disruption: Option<DisruptionDto>,
}

/// Disruption detail attached to a status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisruptionDto {
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    pub additional_info: Option<String>,
}
