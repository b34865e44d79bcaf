//! Station departures evaluation.

use chrono::{DateTime, Local};

use crate::config::DeparturesConfig;
use crate::outcome::PollOutcome;
use crate::records::DepartureRecord;
use crate::schedule::is_active;
use crate::tfl::convert;

use super::TransitApi;

/// Evaluate the departures feature for one tick.
///
/// An empty board (e.g. no tube arrivals right now) is valid data, not an
/// error.
pub(crate) async fn evaluate(
    api: &dyn TransitApi,
    config: &DeparturesConfig,
    now: DateTime<Local>,
) -> PollOutcome<Vec<DepartureRecord>> {
    if !is_active(config.active_schedule.as_ref(), now) {
        return PollOutcome::Inactive;
    }

    match api.arrivals(&config.station_id).await {
        Ok(predictions) => {
            PollOutcome::Data(convert::departure_board(predictions, config.max_departures))
        }
        Err(e) => PollOutcome::Error(e.to_string()),
    }
}
