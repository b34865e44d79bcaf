//! Projection from TfL DTOs into normalized records.

use crate::config::Destination;
use crate::records::{
    DepartureRecord, Disruption, JourneyLeg, JourneyResult, LineStatusEntry, LineStatusRecord,
};

use super::types::{JourneyPlannerResult, LegDto, LineDto, PredictionDto};

/// Project the primary journey of a planner response.
///
/// The first journey is taken as the fastest under the least-time
/// preference. Returns `None` when the response contains no journeys,
/// which callers treat as "nothing for this destination", not an error.
pub fn journey_result(
    response: &JourneyPlannerResult,
    destination: &Destination,
) -> Option<JourneyResult> {
    let journey = response.journeys.first()?;

    Some(JourneyResult {
        destination_name: destination.name.clone(),
        destination_address: destination.address.clone(),
        duration_minutes: journey.duration,
        start_time: journey.start_date_time.clone().unwrap_or_default(),
        arrival_time: journey.arrival_date_time.clone().unwrap_or_default(),
        legs: journey.legs.iter().map(journey_leg).collect(),
    })
}

fn journey_leg(leg: &LegDto) -> JourneyLeg {
    JourneyLeg {
        mode: leg.mode.name.clone(),
        duration_minutes: leg.duration,
        instruction: leg.instruction.summary.clone(),
        departure_point: leg
            .departure_point
            .as_ref()
            .and_then(|point| point.common_name.clone()),
        arrival_point: leg
            .arrival_point
            .as_ref()
            .and_then(|point| point.common_name.clone()),
        route_name: leg
            .route_options
            .first()
            .and_then(|route| route.name.clone()),
    }
}

/// Build the departure board from raw predictions.
///
/// Keeps tube arrivals only, sorted by expected arrival ascending and
/// truncated to `max_departures`. An empty board is a valid result.
pub fn departure_board(
    predictions: Vec<PredictionDto>,
    max_departures: usize,
) -> Vec<DepartureRecord> {
    let mut tube: Vec<PredictionDto> = predictions
        .into_iter()
        .filter(|prediction| prediction.mode_name.as_deref() == Some("tube"))
        .collect();

    tube.sort_by_key(|prediction| prediction.expected_arrival);
    tube.truncate(max_departures);

    tube.into_iter().map(departure_record).collect()
}

fn departure_record(prediction: PredictionDto) -> DepartureRecord {
    DepartureRecord {
        line_name: prediction.line_name.unwrap_or_default(),
        line_id: prediction.line_id.unwrap_or_default(),
        destination: prediction.destination_name.unwrap_or_default(),
        platform: prediction.platform_name,
        expected_arrival: prediction.expected_arrival,
        time_to_station_seconds: prediction.time_to_station,
        current_location: prediction.current_location,
        towards: prediction.towards.unwrap_or_default(),
    }
}

/// Project every line entry of a status response.
///
/// The response keeps its list shape; absent `lineStatuses` become an
/// empty list and disruptions pass through only when present.
pub fn line_status_records(lines: Vec<LineDto>) -> Vec<LineStatusRecord> {
    lines
        .into_iter()
        .map(|line| LineStatusRecord {
            line_name: line.name,
            line_id: line.id,
            statuses: line
                .line_statuses
                .into_iter()
                .map(|status| LineStatusEntry {
                    severity: status.status_severity,
                    severity_description: status.status_severity_description,
                    reason: status.reason,
                    disruption: status.disruption.map(|disruption| Disruption {
                        category: disruption.category,
                        description: disruption.description,
                        additional_info: disruption.additional_info,
                    }),
                })
                .collect(),
        })
        .collect()
}
