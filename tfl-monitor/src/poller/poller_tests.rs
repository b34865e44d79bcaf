//! Unit tests for the polling engine.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use tokio::sync::mpsc;

use super::*;
use crate::config::{AppConfig, DeparturesConfig, Destination, JourneyConfig, LineStatusConfig};
use crate::outcome::{Feature, PollOutcome};
use crate::schedule::{ActiveHours, Schedule, TimeOfDay};
use crate::tfl::{JourneyDto, LineDto, LineStatusDto, PredictionDto};

/// Mock transit API serving canned responses and counting calls.
#[derive(Default)]
struct MockApi {
    /// Planner responses keyed by destination address.
    journeys: HashMap<String, JourneyPlannerResult>,
    arrivals: Vec<PredictionDto>,
    lines: Vec<LineDto>,
    /// When set, every call fails with this HTTP status.
    fail_status: Option<u16>,
    journey_calls: AtomicUsize,
    arrival_calls: AtomicUsize,
    line_calls: AtomicUsize,
}

impl MockApi {
    fn new() -> Self {
        Self::default()
    }

    fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    fn with_journey(mut self, address: &str, minutes: u32) -> Self {
        self.journeys
            .insert(address.to_string(), planner_result(minutes));
        self
    }

    fn with_arrivals(mut self, arrivals: Vec<PredictionDto>) -> Self {
        self.arrivals = arrivals;
        self
    }

    fn with_lines(mut self, lines: Vec<LineDto>) -> Self {
        self.lines = lines;
        self
    }

    fn journey_call_count(&self) -> usize {
        self.journey_calls.load(Ordering::SeqCst)
    }

    fn arrival_call_count(&self) -> usize {
        self.arrival_calls.load(Ordering::SeqCst)
    }

    fn line_call_count(&self) -> usize {
        self.line_calls.load(Ordering::SeqCst)
    }

    fn fail_if_configured(&self) -> Result<(), TflError> {
        match self.fail_status {
            Some(status) => Err(TflError::Api {
                status,
                message: "mock failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TransitApi for MockApi {
    async fn plan_journey(
        &self,
        _origin: &str,
        destination: &str,
    ) -> Result<JourneyPlannerResult, TflError> {
        self.journey_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if_configured()?;
        Ok(self
            .journeys
            .get(destination)
            .cloned()
            .unwrap_or(JourneyPlannerResult { journeys: vec![] }))
    }

    async fn arrivals(&self, _station_id: &str) -> Result<Vec<PredictionDto>, TflError> {
        self.arrival_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if_configured()?;
        Ok(self.arrivals.clone())
    }

    async fn line_status(&self, _line_id: &str) -> Result<Vec<LineDto>, TflError> {
        self.line_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if_configured()?;
        Ok(self.lines.clone())
    }
}

fn planner_result(minutes: u32) -> JourneyPlannerResult {
    JourneyPlannerResult {
        journeys: vec![JourneyDto {
            duration: minutes,
            start_date_time: None,
            arrival_date_time: None,
            legs: vec![],
        }],
    }
}

fn window(days: &[u8], start: &str, end: &str) -> Schedule {
    Schedule {
        active_days: days.to_vec(),
        active_hours: ActiveHours {
            start: TimeOfDay::parse(start).unwrap(),
            end: TimeOfDay::parse(end).unwrap(),
        },
    }
}

fn destination(name: &str, address: &str, schedule: Option<Schedule>) -> Destination {
    Destination {
        name: name.to_string(),
        address: address.to_string(),
        active_schedule: schedule,
    }
}

fn journey_config(destinations: Vec<Destination>) -> JourneyConfig {
    JourneyConfig {
        enabled: true,
        origin: "10 Downing Street, London SW1A 2AA".to_string(),
        destinations,
        update_interval_ms: 60_000,
        show_walking_time: true,
        active_schedule: None,
    }
}

fn departures_config(schedule: Option<Schedule>) -> DeparturesConfig {
    DeparturesConfig {
        enabled: true,
        station_id: "940GZZLUSFS".to_string(),
        station_name: None,
        max_departures: 5,
        show_line_badge: false,
        update_interval_ms: 30_000,
        active_schedule: schedule,
    }
}

fn line_status_config() -> LineStatusConfig {
    LineStatusConfig {
        enabled: true,
        line_id: "northern".to_string(),
        update_interval_ms: 300_000,
        active_schedule: None,
    }
}

fn tube_prediction(arrival: &str) -> PredictionDto {
    PredictionDto {
        line_name: Some("District".to_string()),
        line_id: Some("district".to_string()),
        destination_name: Some("Wimbledon Underground Station".to_string()),
        platform_name: None,
        expected_arrival: arrival.parse::<DateTime<chrono::Utc>>().unwrap(),
        time_to_station: 120,
        current_location: None,
        towards: Some("Wimbledon".to_string()),
        mode_name: Some("tube".to_string()),
    }
}

fn bus_prediction(arrival: &str) -> PredictionDto {
    PredictionDto {
        mode_name: Some("bus".to_string()),
        ..tube_prediction(arrival)
    }
}

fn good_service_line(id: &str, name: &str) -> LineDto {
    LineDto {
        id: id.to_string(),
        name: name.to_string(),
        line_statuses: vec![LineStatusDto {
            status_severity: 10,
            status_severity_description: "Good Service".to_string(),
            reason: None,
            disruption: None,
        }],
    }
}

/// 2026-01-05 is a Monday; 08:00 sits inside a weekday morning window.
fn monday_morning() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap()
}

// --- journey evaluation ---

#[tokio::test]
async fn journey_fetches_only_destinations_in_their_window() {
    let api = MockApi::new()
        .with_journey("Canary Wharf, London E14", 42)
        .with_journey("123 Fitness Street, London", 25);

    let config = journey_config(vec![
        destination(
            "Work",
            "Canary Wharf, London E14",
            Some(window(&[1, 2, 3, 4, 5], "07:00", "09:00")),
        ),
        destination(
            "Gym",
            "123 Fitness Street, London",
            Some(window(&[1, 3, 5], "18:00", "20:00")),
        ),
        destination(
            "Weekend Market",
            "Borough Market, London SE1",
            Some(window(&[0, 6], "10:00", "16:00")),
        ),
    ]);

    let outcome = journey::evaluate(&api, &config, monday_morning()).await;

    assert_eq!(api.journey_call_count(), 1);
    match outcome {
        PollOutcome::Data(results) => {
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].destination_name, "Work");
            assert_eq!(results[0].duration_minutes, 42);
        }
        other => panic!("expected data, got {other:?}"),
    }
}

#[tokio::test]
async fn journey_with_no_active_destinations_is_inactive_without_fetching() {
    let api = MockApi::new();

    let config = journey_config(vec![
        destination(
            "Gym",
            "123 Fitness Street, London",
            Some(window(&[1, 3, 5], "18:00", "20:00")),
        ),
        destination(
            "Weekend Market",
            "Borough Market, London SE1",
            Some(window(&[0, 6], "10:00", "16:00")),
        ),
    ]);

    let outcome = journey::evaluate(&api, &config, monday_morning()).await;

    assert_eq!(outcome, PollOutcome::Inactive);
    assert_eq!(api.journey_call_count(), 0);
}

#[tokio::test]
async fn journey_with_no_destinations_is_an_error_without_fetching() {
    let api = MockApi::new();
    let config = journey_config(vec![]);

    let outcome = journey::evaluate(&api, &config, monday_morning()).await;

    assert_eq!(
        outcome,
        PollOutcome::Error(journey::NO_DESTINATIONS.to_string())
    );
    assert_eq!(api.journey_call_count(), 0);
}

#[tokio::test]
async fn journey_with_all_fetches_failing_is_an_error() {
    let api = MockApi::failing(500);

    let config = journey_config(vec![
        destination("Work", "Canary Wharf, London E14", None),
        destination("Gym", "123 Fitness Street, London", None),
    ]);

    let outcome = journey::evaluate(&api, &config, monday_morning()).await;

    assert_eq!(outcome, PollOutcome::Error(journey::NO_JOURNEYS.to_string()));
    assert_eq!(api.journey_call_count(), 2);
}

#[tokio::test]
async fn journey_partial_failure_keeps_configured_order() {
    // No planner response for the middle destination
    let api = MockApi::new()
        .with_journey("Canary Wharf, London E14", 42)
        .with_journey("Borough Market, London SE1", 28);

    let config = journey_config(vec![
        destination("Work", "Canary Wharf, London E14", None),
        destination("Gym", "123 Fitness Street, London", None),
        destination("Weekend Market", "Borough Market, London SE1", None),
    ]);

    let outcome = journey::evaluate(&api, &config, monday_morning()).await;

    assert_eq!(api.journey_call_count(), 3);
    match outcome {
        PollOutcome::Data(results) => {
            let names: Vec<&str> = results
                .iter()
                .map(|result| result.destination_name.as_str())
                .collect();
            assert_eq!(names, vec!["Work", "Weekend Market"]);
        }
        other => panic!("expected data, got {other:?}"),
    }
}

// --- departures evaluation ---

#[tokio::test]
async fn departures_outside_window_is_inactive_without_fetching() {
    let api = MockApi::new();
    let config = departures_config(Some(window(&[1, 2, 3, 4, 5], "17:00", "19:00")));

    let outcome = departures::evaluate(&api, &config, monday_morning()).await;

    assert_eq!(outcome, PollOutcome::Inactive);
    assert_eq!(api.arrival_call_count(), 0);
}

#[tokio::test]
async fn departures_inside_window_emits_filtered_board() {
    let api = MockApi::new().with_arrivals(vec![
        bus_prediction("2026-01-05T08:02:00Z"),
        tube_prediction("2026-01-05T08:05:00Z"),
        tube_prediction("2026-01-05T08:03:00Z"),
    ]);
    let config = departures_config(Some(window(&[1, 2, 3, 4, 5], "06:30", "09:30")));

    let outcome = departures::evaluate(&api, &config, monday_morning()).await;

    match outcome {
        PollOutcome::Data(board) => {
            assert_eq!(board.len(), 2);
            assert!(board[0].expected_arrival < board[1].expected_arrival);
        }
        other => panic!("expected data, got {other:?}"),
    }
}

#[tokio::test]
async fn departures_with_no_tube_arrivals_is_empty_data_not_error() {
    let api = MockApi::new().with_arrivals(vec![
        bus_prediction("2026-01-05T08:02:00Z"),
        bus_prediction("2026-01-05T08:04:00Z"),
    ]);
    let config = departures_config(None);

    let outcome = departures::evaluate(&api, &config, monday_morning()).await;

    assert_eq!(outcome, PollOutcome::Data(vec![]));
}

#[tokio::test]
async fn departures_error_message_carries_http_status() {
    let api = MockApi::failing(503);
    let config = departures_config(None);

    let outcome = departures::evaluate(&api, &config, monday_morning()).await;

    match outcome {
        PollOutcome::Error(message) => assert!(message.contains("503"), "message: {message}"),
        other => panic!("expected error, got {other:?}"),
    }
}

// --- line status evaluation ---

#[tokio::test]
async fn line_status_empty_response_is_an_error() {
    let api = MockApi::new();
    let config = line_status_config();

    let outcome = line_status::evaluate(&api, &config, monday_morning()).await;

    assert_eq!(
        outcome,
        PollOutcome::Error(line_status::NO_STATUS.to_string())
    );
    assert_eq!(api.line_call_count(), 1);
}

#[tokio::test]
async fn line_status_projects_every_entry() {
    let api = MockApi::new().with_lines(vec![
        good_service_line("northern", "Northern"),
        good_service_line("victoria", "Victoria"),
    ]);
    let config = line_status_config();

    let outcome = line_status::evaluate(&api, &config, monday_morning()).await;

    match outcome {
        PollOutcome::Data(records) => {
            assert_eq!(records.len(), 2);
            assert_eq!(records[0].line_id, "northern");
            assert_eq!(records[1].line_id, "victoria");
        }
        other => panic!("expected data, got {other:?}"),
    }
}

#[tokio::test]
async fn line_status_outside_window_is_inactive() {
    let api = MockApi::new();
    let mut config = line_status_config();
    config.active_schedule = Some(window(&[0, 6], "00:00", "23:59"));

    let outcome = line_status::evaluate(&api, &config, monday_morning()).await;

    assert_eq!(outcome, PollOutcome::Inactive);
    assert_eq!(api.line_call_count(), 0);
}

// --- orchestrator ---

fn departures_only_config() -> AppConfig {
    AppConfig {
        app_key: None,
        journey: None,
        departures: Some(departures_config(None)),
        line_status: None,
    }
}

#[tokio::test(start_paused = true)]
async fn start_fires_an_immediate_poll() {
    let api = Arc::new(MockApi::new());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(api, tx);

    orchestrator.start(&departures_only_config());

    let event = rx.recv().await.unwrap();
    assert_eq!(event.feature(), Feature::Departures);
    assert!(orchestrator.is_running(Feature::Departures));
    assert!(!orchestrator.is_running(Feature::Journey));
}

#[tokio::test(start_paused = true)]
async fn stop_prevents_further_events() {
    let api = Arc::new(MockApi::new());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(api, tx);

    orchestrator.start(&departures_only_config());

    // Consume the immediate startup poll, then stop before the next tick
    rx.recv().await.unwrap();
    orchestrator.stop();
    assert!(!orchestrator.is_running(Feature::Departures));

    // Well past several poll intervals, nothing further arrives
    let waited = tokio::time::timeout(Duration::from_secs(300), rx.recv()).await;
    assert!(waited.is_err(), "expected no events after stop");
}

#[tokio::test(start_paused = true)]
async fn restart_does_not_stack_timers() {
    let api = Arc::new(MockApi::new());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(api, tx);

    orchestrator.start(&departures_only_config());
    rx.recv().await.unwrap();

    // Restart replaces the running loop and fires a fresh startup poll
    orchestrator.start(&departures_only_config());
    rx.recv().await.unwrap();

    // Across the next interval only the restarted loop ticks
    tokio::time::sleep(Duration::from_millis(35_000)).await;
    let mut ticks = 0;
    while rx.try_recv().is_ok() {
        ticks += 1;
    }
    assert_eq!(ticks, 1);
}

#[tokio::test(start_paused = true)]
async fn disabled_features_are_not_polled() {
    let api = Arc::new(MockApi::new());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(api, tx);

    let mut config = departures_only_config();
    config.departures.as_mut().unwrap().enabled = false;
    orchestrator.start(&config);

    assert!(!orchestrator.is_running(Feature::Departures));
    let waited = tokio::time::timeout(Duration::from_secs(60), rx.recv()).await;
    assert!(waited.is_err(), "expected no events from disabled features");
}

#[tokio::test(start_paused = true)]
async fn poller_exits_when_receiver_is_dropped() {
    let api = Arc::new(MockApi::new());
    let (tx, rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(api, tx);

    orchestrator.start(&departures_only_config());
    drop(rx);

    // The next send fails and the loop breaks
    tokio::time::sleep(Duration::from_millis(35_000)).await;
    assert!(!orchestrator.is_running(Feature::Departures));
}
