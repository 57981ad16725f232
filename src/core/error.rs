//! Error and diagnostic types.
//!
//! `SimError` is the only condition that stops a simulation from starting.
//! Everything else is reported as a `Diagnostic` and healed on later ticks.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },
    #[error("invalid viewport {width}x{height}: both sides must be positive and finite")]
    InvalidViewport { width: f32, height: f32 },
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
    #[error("malformed config json: {0}")]
    Config(#[from] serde_json::Error),
    #[error("simulation is stopped")]
    Stopped,
}

impl SimError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidConfiguration { field, reason: reason.into() }
    }
}

/// Non-fatal conditions observed while placing or stepping bodies
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A body could not be placed without overlap and was dropped
    PlacementExhausted { radius: f32, attempts: u32 },
    /// Two centres coincided; the pair was skipped for this tick
    DegenerateGeometry { first: usize, second: usize },
}
