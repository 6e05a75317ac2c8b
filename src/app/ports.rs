//! Port traits: the hexagonal boundary between the appliance core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (probe, screen, graph renderer, LED, tickers, CSV log)
//! implement these traits.  [`MonitorService`](super::service::MonitorService)
//! consumes them via generics, so the core never touches hardware directly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::SystemConfig;
use crate::recording::Sample;

use super::screens::ScreenSpec;

// ───────────────────────────────────────────────────────────────
// Sensor port (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Thermocouple probe.  Reads are bounded in time.
pub trait SensorPort {
    /// Raw probe temperature in °C, before calibration.
    fn read_temperature(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Display port (domain → screen)
// ───────────────────────────────────────────────────────────────

/// The 320x240 screen.  Each call replaces the whole frame.
pub trait DisplayPort {
    /// Blank the screen and draw a text layout.
    fn render_screen(&mut self, screen: &ScreenSpec);

    /// Blank the screen and draw a pre-rendered image.
    fn render_image(&mut self, path: &Path);

    /// Give the framebuffer back to the console.
    fn release(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Graph port (domain → graph renderer)
// ───────────────────────────────────────────────────────────────

/// Trace colour for the temperature graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceColour {
    /// Above freezing.
    Red,
    /// At or below freezing.
    Blue,
}

impl TraceColour {
    /// Red when `temp_c` is above 0 °C, blue otherwise.
    pub fn for_temperature(temp_c: f32) -> Self {
        if temp_c > 0.0 { Self::Red } else { Self::Blue }
    }
}

/// Renders the series (minutes vs °F) to an image the display can show.
pub trait GraphPort {
    fn render_graph(&mut self, samples: &[Sample], colour: TraceColour)
    -> Result<PathBuf, GraphError>;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (domain → activity LED)
// ───────────────────────────────────────────────────────────────

pub trait IndicatorPort {
    fn set_activity(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Ticker port (domain → sampling timer)
// ───────────────────────────────────────────────────────────────

pub trait TickerPort {
    /// Restart the sampling timer with a new period, counted from now.
    fn rearm_sampling(&mut self, period: Duration);
}

// ───────────────────────────────────────────────────────────────
// Combined peripheral bound
// ───────────────────────────────────────────────────────────────

/// Everything the service drives except the log.  One `&mut` satisfies
/// every port without a double mutable borrow.
pub trait Peripherals: SensorPort + DisplayPort + GraphPort + IndicatorPort + TickerPort {}

impl<T> Peripherals for T where T: SensorPort + DisplayPort + GraphPort + IndicatorPort + TickerPort {}

// ───────────────────────────────────────────────────────────────
// Log port (domain → CSV file)
// ───────────────────────────────────────────────────────────────

/// One line of the CSV log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogRecord {
    /// `elapsed,temp_c,temp_f`
    Sample(Sample),
    /// `00,00,00`, written when the operator restarts recording.
    RestartMarker,
}

impl LogRecord {
    /// The three CSV fields of this record.
    pub fn fields(&self) -> [String; 3] {
        match self {
            Self::Sample(s) => [
                s.elapsed_secs.to_string(),
                format!("{:.2}", s.temp_c),
                format!("{:.2}", s.temp_f),
            ],
            Self::RestartMarker => ["00".into(), "00".into(), "00".into()],
        }
    }
}

impl core::fmt::Display for LogRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.fields().join(","))
    }
}

/// Append-only sample log.  Every append is flushed before it returns.
pub trait LogPort {
    fn append(&mut self, record: &LogRecord) -> Result<(), LogError>;

    /// Flush and close.  Appends after `close` fail with [`LogError::Closed`].
    fn close(&mut self) -> Result<(), LogError>;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (domain ← persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads boot-time configuration.
///
/// Implementations validate with [`SystemConfig::validate`] and reject bad
/// values with [`ConfigError::ValidationFailed`] instead of clamping.
pub trait ConfigPort {
    /// Returns [`ConfigError::NotFound`] when no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SensorPort`].  Mirrors the MAX31855 fault bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The amplifier did not answer.
    Unavailable,
    /// No thermocouple attached.
    OpenCircuit,
    ShortToGround,
    ShortToSupply,
}

/// Errors from [`LogPort`].
#[derive(Debug)]
pub enum LogError {
    /// Rotating the previous generations failed.
    Rotate(std::io::Error),
    /// Creating the fresh log failed.
    Open(std::io::Error),
    /// Writing or flushing a record failed.
    Write(std::io::Error),
    /// The log was already closed.
    Closed,
}

/// Errors from [`GraphPort`].
#[derive(Debug)]
pub enum GraphError {
    /// Nothing to plot.
    EmptySeries,
    Io(std::io::Error),
}

/// Errors from [`ConfigPort`].
#[derive(Debug)]
pub enum ConfigError {
    /// No config file (first boot).
    NotFound,
    /// The file exists but could not be parsed.
    Corrupted(String),
    /// A field failed range validation.
    ValidationFailed(&'static str),
    IoError(std::io::Error),
}

impl core::fmt::Display for SensorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "probe unavailable"),
            Self::OpenCircuit => write!(f, "thermocouple open circuit"),
            Self::ShortToGround => write!(f, "thermocouple shorted to ground"),
            Self::ShortToSupply => write!(f, "thermocouple shorted to supply"),
        }
    }
}

impl core::fmt::Display for LogError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Rotate(e) => write!(f, "rotation failed: {}", e),
            Self::Open(e) => write!(f, "open failed: {}", e),
            Self::Write(e) => write!(f, "write failed: {}", e),
            Self::Closed => write!(f, "log already closed"),
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rotate(e) | Self::Open(e) | Self::Write(e) => Some(e),
            Self::Closed => None,
        }
    }
}

impl core::fmt::Display for GraphError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptySeries => write!(f, "no samples to plot"),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for GraphError {}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted(msg) => write!(f, "config corrupted: {}", msg),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
