//! Lifecycle of the per-feature polling tasks.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Local;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::config::{AppConfig, DeparturesConfig, JourneyConfig, LineStatusConfig};
use crate::outcome::{Feature, FeedEvent};

use super::{TransitApi, departures, journey, line_status};

/// Starts and stops the per-feature polling loops.
///
/// Each enabled feature runs as an independent tokio task with its own
/// recurring timer; the first tick fires immediately so the display gets
/// data at startup. `start` always tears down existing tasks first, so
/// reconfiguring can never stack duplicate timers. Stopping aborts the
/// tasks, which cancels any in-flight fetch at its next await point, so
/// no events are emitted after `stop` returns.
pub struct Orchestrator {
    api: Arc<dyn TransitApi>,
    events: UnboundedSender<FeedEvent>,
    tasks: HashMap<Feature, JoinHandle<()>>,
}

impl Orchestrator {
    /// Create an orchestrator that polls `api` and emits on `events`.
    pub fn new(api: Arc<dyn TransitApi>, events: UnboundedSender<FeedEvent>) -> Self {
        Self {
            api,
            events,
            tasks: HashMap::new(),
        }
    }

    /// Start a polling loop for every enabled feature in `config`.
    ///
    /// Any loops from a previous `start` are stopped first.
    pub fn start(&mut self, config: &AppConfig) {
        self.stop();

        if let Some(journey) = &config.journey
            && journey.enabled
        {
            let handle = self.spawn_journey(journey.clone());
            self.tasks.insert(Feature::Journey, handle);
        }

        if let Some(departures) = &config.departures
            && departures.enabled
        {
            let handle = self.spawn_departures(departures.clone());
            self.tasks.insert(Feature::Departures, handle);
        }

        if let Some(line_status) = &config.line_status
            && line_status.enabled
        {
            let handle = self.spawn_line_status(line_status.clone());
            self.tasks.insert(Feature::LineStatus, handle);
        }

        info!(features = self.tasks.len(), "polling started");
    }

    /// Abort every polling task. No events are emitted after this returns.
    pub fn stop(&mut self) {
        for (feature, handle) in self.tasks.drain() {
            debug!(%feature, "stopping poller");
            handle.abort();
        }
    }

    /// Whether a poller task currently exists for `feature`.
    pub fn is_running(&self, feature: Feature) -> bool {
        self.tasks
            .get(&feature)
            .is_some_and(|handle| !handle.is_finished())
    }

    fn spawn_journey(&self, config: JourneyConfig) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.update_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let outcome = journey::evaluate(api.as_ref(), &config, Local::now()).await;
                if events.send(FeedEvent::Journey(outcome)).is_err() {
                    break; // receiver gone, nobody is listening
                }
            }
        })
    }

    fn spawn_departures(&self, config: DeparturesConfig) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.update_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let outcome = departures::evaluate(api.as_ref(), &config, Local::now()).await;
                if events.send(FeedEvent::Departures(outcome)).is_err() {
                    break;
                }
            }
        })
    }

    fn spawn_line_status(&self, config: LineStatusConfig) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.update_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let outcome = line_status::evaluate(api.as_ref(), &config, Local::now()).await;
                if events.send(FeedEvent::LineStatus(outcome)).is_err() {
                    break;
                }
            }
        })
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.stop();
    }
}
