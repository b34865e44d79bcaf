//! Runtime configuration.
//!
//! One JSON payload, consumed once at startup and immutable for the life of
//! the process. Each feature block carries its own `enabled` flag, update
//! interval, and active schedule; a missing block behaves as disabled.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::schedule::Schedule;

/// Error loading or parsing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Could not read the config file
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file contents were not valid
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level monitor configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// TfL API application key, sent as the `app_key` query parameter.
    #[serde(default)]
    pub app_key: Option<String>,

    #[serde(default)]
    pub journey: Option<JourneyConfig>,

    #[serde(default)]
    pub departures: Option<DeparturesConfig>,

    #[serde(default)]
    pub line_status: Option<LineStatusConfig>,
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Journey-time feature: one origin, several destinations, each destination
/// gated by its own schedule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Free-text origin address.
    pub origin: String,

    #[serde(default)]
    pub destinations: Vec<Destination>,

    /// Poll interval in milliseconds.
    #[serde(rename = "updateInterval", default = "default_journey_interval")]
    pub update_interval_ms: u64,

    /// Whether the display should surface total walking time.
    #[serde(default = "default_true")]
    pub show_walking_time: bool,

    /// Feature-level schedule. Advisory only: journey polling is gated by
    /// the per-destination schedules, never by this one.
    #[serde(default)]
    pub active_schedule: Option<Schedule>,
}

impl JourneyConfig {
    /// Poll interval as a `Duration`. Clamped to at least 1ms because a
    /// zero-period timer is invalid.
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms.max(1))
    }
}

/// One journey destination with its own active window.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Display name, e.g. "Work".
    pub name: String,

    /// Free-text address passed to the journey planner.
    pub address: String,

    #[serde(default)]
    pub active_schedule: Option<Schedule>,
}

/// Station departures feature.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeparturesConfig {
    #[serde(default)]
    pub enabled: bool,

    /// StopPoint id, e.g. "940GZZLUSFS".
    pub station_id: String,

    /// Display name override for the station.
    #[serde(default)]
    pub station_name: Option<String>,

    /// How many upcoming departures to keep.
    #[serde(default = "default_max_departures")]
    pub max_departures: usize,

    /// Whether the display should show a line badge next to departures.
    #[serde(default)]
    pub show_line_badge: bool,

    /// Poll interval in milliseconds.
    #[serde(rename = "updateInterval", default = "default_departures_interval")]
    pub update_interval_ms: u64,

    #[serde(default)]
    pub active_schedule: Option<Schedule>,
}

impl DeparturesConfig {
    /// Poll interval as a `Duration`. Clamped to at least 1ms.
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms.max(1))
    }
}

/// Line status feature.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStatusConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Line id, e.g. "northern".
    pub line_id: String,

    /// Poll interval in milliseconds.
    #[serde(rename = "updateInterval", default = "default_line_status_interval")]
    pub update_interval_ms: u64,

    #[serde(default)]
    pub active_schedule: Option<Schedule>,
}

impl LineStatusConfig {
    /// Poll interval as a `Duration`. Clamped to at least 1ms.
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms.max(1))
    }
}

fn default_true() -> bool {
    true
}

fn default_max_departures() -> usize {
    5
}

fn default_journey_interval() -> u64 {
    60_000
}

fn default_departures_interval() -> u64 {
    30_000
}

fn default_line_status_interval() -> u64 {
    300_000
}
