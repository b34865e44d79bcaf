//! TfL Unified API client.
//!
//! Three endpoints are consumed, all returning JSON:
//! - journey planning between two free-text addresses
//! - live arrival predictions for a stop point
//! - service status for a line
//!
//! The client maps non-2xx responses to typed errors; `convert` projects
//! the raw DTOs into the normalized records the pollers emit.

mod client;
pub mod convert;
mod error;
mod types;

pub use client::{TflClient, TflConfig};
pub use error::TflError;
pub use types::{
    DisruptionDto, InstructionDto, JourneyDto, JourneyPlannerResult, LegDto, LineDto,
    LineStatusDto, ModeDto, PointDto, PredictionDto, RouteOptionDto,
};
