//! Line status evaluation.

use chrono::{DateTime, Local};

use crate::config::LineStatusConfig;
use crate::outcome::PollOutcome;
use crate::records::LineStatusRecord;
use crate::schedule::is_active;
use crate::tfl::convert;

use super::TransitApi;

pub(crate) const NO_STATUS: &str = "No line status data found";

/// Evaluate the line status feature for one tick.
///
/// An empty response list means the line id matched nothing, which is an
/// error rather than an empty board.
pub(crate) async fn evaluate(
    api: &dyn TransitApi,
    config: &LineStatusConfig,
    now: DateTime<Local>,
) -> PollOutcome<Vec<LineStatusRecord>> {
    if !is_active(config.active_schedule.as_ref(), now) {
        return PollOutcome::Inactive;
    }

    match api.line_status(&config.line_id).await {
        Ok(lines) if lines.is_empty() => PollOutcome::Error(NO_STATUS.to_string()),
        Ok(lines) => PollOutcome::Data(convert::line_status_records(lines)),
        Err(e) => PollOutcome::Error(e.to_string()),
    }
}
