//! Scheduled polling engine.
//!
//! One recurring task per enabled feature. On every tick the task checks
//! the feature's active window, fetches from the upstream API if eligible,
//! and emits exactly one outcome event. Fetch failures become error events;
//! they never kill the timer loop, so the next tick is the de facto retry.

mod departures;
mod journey;
mod line_status;
mod orchestrator;

#[cfg(test)]
mod poller_tests;

pub use orchestrator::Orchestrator;

use async_trait::async_trait;

use crate::tfl::{JourneyPlannerResult, LineDto, PredictionDto, TflClient, TflError};

/// The upstream transit API as seen by the pollers.
///
/// Abstracting the HTTP client behind this trait lets tests drive the
/// pollers with canned responses and count the calls they make.
#[async_trait]
pub trait TransitApi: Send + Sync {
    /// Plan a journey between two free-text addresses.
    async fn plan_journey(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<JourneyPlannerResult, TflError>;

    /// Live arrival predictions for a stop point.
    async fn arrivals(&self, station_id: &str) -> Result<Vec<PredictionDto>, TflError>;

    /// Current status for a line.
    async fn line_status(&self, line_id: &str) -> Result<Vec<LineDto>, TflError>;
}

#[async_trait]
impl TransitApi for TflClient {
    async fn plan_journey(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<JourneyPlannerResult, TflError> {
        TflClient::plan_journey(self, origin, destination).await
    }

    async fn arrivals(&self, station_id: &str) -> Result<Vec<PredictionDto>, TflError> {
        TflClient::arrivals(self, station_id).await
    }

    async fn line_status(&self, line_id: &str) -> Result<Vec<LineDto>, TflError> {
        TflClient::line_status(self, line_id).await
    }
}
