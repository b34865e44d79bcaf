//! Per-tick outcome events.
//!
//! Every poller tick produces exactly one outcome: fresh data, an error
//! message, or a note that the feature is outside its active window. The
//! display collaborator is expected to keep the last data it saw when an
//! error or inactive outcome arrives, so stale data stays visible.

use std::fmt;

use crate::records::{DepartureRecord, JourneyResult, LineStatusRecord};

/// The three independently scheduled data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Journey,
    Departures,
    LineStatus,
}

impl Feature {
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Journey => "journey",
            Feature::Departures => "departures",
            Feature::LineStatus => "lineStatus",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one poller tick.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome<T> {
    /// Fresh data from the upstream API.
    Data(T),

    /// The fetch failed; the message is human-readable.
    Error(String),

    /// The feature is outside its active window; no fetch was attempted.
    Inactive,
}

impl<T> PollOutcome<T> {
    pub fn is_data(&self) -> bool {
        matches!(self, PollOutcome::Data(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PollOutcome::Error(_))
    }

    pub fn is_inactive(&self) -> bool {
        matches!(self, PollOutcome::Inactive)
    }
}

/// An outcome tagged with the feature it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Journey(PollOutcome<Vec<JourneyResult>>),
    Departures(PollOutcome<Vec<DepartureRecord>>),
    LineStatus(PollOutcome<Vec<LineStatusRecord>>),
}

impl FeedEvent {
    /// Which feature produced this event.
    pub fn feature(&self) -> Feature {
        match self {
            FeedEvent::Journey(_) => Feature::Journey,
            FeedEvent::Departures(_) => Feature::Departures,
            FeedEvent::LineStatus(_) => Feature::LineStatus,
        }
    }
}
