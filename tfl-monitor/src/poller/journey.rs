//! Journey-time evaluation.
//!
//! Gating is per destination: each destination carries its own active
//! window, and the feature-level schedule is never consulted. All active
//! destinations are fetched concurrently; a destination whose fetch fails
//! or returns nothing is dropped from the batch rather than failing it.

use chrono::{DateTime, Local};
use futures::future::join_all;
use tracing::warn;

use crate::config::{Destination, JourneyConfig};
use crate::outcome::PollOutcome;
use crate::records::JourneyResult;
use crate::schedule::is_active;
use crate::tfl::convert;

use super::TransitApi;

pub(crate) const NO_JOURNEYS: &str = "No journeys could be fetched";
pub(crate) const NO_DESTINATIONS: &str = "No destinations configured";

/// Evaluate the journey feature for one tick.
///
/// Emits `Inactive` without touching the network when no destination is
/// inside its window. Results keep the configured destination order.
pub(crate) async fn evaluate(
    api: &dyn TransitApi,
    config: &JourneyConfig,
    now: DateTime<Local>,
) -> PollOutcome<Vec<JourneyResult>> {
    if config.destinations.is_empty() {
        return PollOutcome::Error(NO_DESTINATIONS.to_string());
    }

    let active: Vec<&Destination> = config
        .destinations
        .iter()
        .filter(|destination| is_active(destination.active_schedule.as_ref(), now))
        .collect();

    if active.is_empty() {
        return PollOutcome::Inactive;
    }

    let fetches = active
        .iter()
        .map(|destination| fetch_one(api, &config.origin, destination));
    let results = join_all(fetches).await;

    let journeys: Vec<JourneyResult> = results.into_iter().flatten().collect();

    if journeys.is_empty() {
        PollOutcome::Error(NO_JOURNEYS.to_string())
    } else {
        PollOutcome::Data(journeys)
    }
}

/// Fetch and project a single destination. Failures are logged and
/// absorbed; only the whole batch coming back empty escalates.
async fn fetch_one(
    api: &dyn TransitApi,
    origin: &str,
    destination: &Destination,
) -> Option<JourneyResult> {
    match api.plan_journey(origin, &destination.address).await {
        Ok(response) => {
            let result = convert::journey_result(&response, destination);
            if result.is_none() {
                warn!(destination = %destination.name, "planner returned no journeys");
            }
            result
        }
        Err(e) => {
            warn!(destination = %destination.name, error = %e, "journey fetch failed");
            None
        }
    }
}
