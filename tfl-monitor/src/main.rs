use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use tfl_monitor::config::AppConfig;
use tfl_monitor::outcome::{FeedEvent, PollOutcome};
use tfl_monitor::poller::Orchestrator;
use tfl_monitor::tfl::{TflClient, TflConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());

    let config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %config_path, error = %e, "could not load configuration");
            std::process::exit(1);
        }
    };

    // The environment wins over the config file so API keys can stay out of it
    let app_key = std::env::var("TFL_APP_KEY")
        .ok()
        .or_else(|| config.app_key.clone());

    let mut tfl_config = TflConfig::new();
    if let Some(key) = app_key {
        tfl_config = tfl_config.with_app_key(key);
    }
    let client = TflClient::new(tfl_config).expect("Failed to create TfL client");

    let show_walking_time = config
        .journey
        .as_ref()
        .is_some_and(|journey| journey.show_walking_time);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(Arc::new(client), tx);
    orchestrator.start(&config);

    info!(config = %config_path, "TfL monitor running, press Ctrl-C to stop");

    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Some(event) => render(event, show_walking_time),
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                orchestrator.stop();
                break;
            }
        }
    }
}

/// Stand-in for the display layer: log each outcome as it arrives.
fn render(event: FeedEvent, show_walking_time: bool) {
    let feature = event.feature();

    match event {
        FeedEvent::Journey(PollOutcome::Data(journeys)) => {
            for journey in &journeys {
                if show_walking_time {
                    info!(
                        %feature,
                        destination = %journey.destination_name,
                        minutes = journey.duration_minutes,
                        walking_minutes = journey.walking_minutes(),
                        "journey time"
                    );
                } else {
                    info!(
                        %feature,
                        destination = %journey.destination_name,
                        minutes = journey.duration_minutes,
                        "journey time"
                    );
                }
            }
        }
        FeedEvent::Departures(PollOutcome::Data(board)) => {
            if board.is_empty() {
                info!(%feature, "no tube departures");
            }
            for departure in &board {
                info!(
                    %feature,
                    line = %departure.line_name,
                    towards = %departure.towards,
                    seconds = departure.time_to_station_seconds,
                    "departure"
                );
            }
        }
        FeedEvent::LineStatus(PollOutcome::Data(records)) => {
            for record in &records {
                for status in &record.statuses {
                    info!(
                        %feature,
                        line = %record.line_name,
                        status = %status.severity_description,
                        "line status"
                    );
                }
            }
        }
        FeedEvent::Journey(PollOutcome::Error(message))
        | FeedEvent::Departures(PollOutcome::Error(message))
        | FeedEvent::LineStatus(PollOutcome::Error(message)) => {
            warn!(%feature, %message, "poll failed");
        }
        FeedEvent::Journey(PollOutcome::Inactive)
        | FeedEvent::Departures(PollOutcome::Inactive)
        | FeedEvent::LineStatus(PollOutcome::Inactive) => {
            debug!(%feature, "outside active window");
        }
    }
}
