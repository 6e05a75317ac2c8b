//! Unified error types for the ovenprobe appliance.
//!
//! A single `Error` enum that every subsystem converts into, so the main
//! loop can funnel any fatal condition through one shutdown path.  The
//! per-port error enums live next to their traits in [`crate::app::ports`].

use core::fmt;

use crate::app::ports::{GraphError, LogError, SensorError};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the appliance funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// The thermocouple could not be read.
    Sensor(SensorError),
    /// The CSV log could not be rotated, written or flushed.
    Log(LogError),
    /// Graph image generation failed.
    Graph(GraphError),
    /// Configuration is invalid or could not be loaded.
    Config(String),
    /// Startup could not complete.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Log(e) => write!(f, "log: {e}"),
            Self::Graph(e) => write!(f, "graph: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Log(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

impl From<LogError> for Error {
    fn from(e: LogError) -> Self {
        Self::Log(e)
    }
}

impl From<GraphError> for Error {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
