//! Scheduled TfL feed monitor.
//!
//! Polls the TfL Unified API on per-feature schedules (journey times,
//! station departures, line status), normalizes the responses, and emits
//! a stream of outcome events for a display layer to consume.

pub mod config;
pub mod outcome;
pub mod poller;
pub mod records;
pub mod schedule;
pub mod tfl;
