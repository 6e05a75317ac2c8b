//! System configuration parameters
//!
//! [`SystemConfig`] holds the boot-time settings read from the JSON config
//! file.  [`CommittedConfig`] is the small runtime subset the operator can
//! change from the menu; it is the only configuration the recording engine
//! ever reads.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Sampling intervals offered on the Time Adjust page, in seconds.
pub const SAMPLE_INTERVALS_SECS: [u32; 7] = [6, 30, 60, 120, 600, 1800, 3600];

/// Calibration offset limits (°C) reachable from the Temp Adjust page.
pub const OFFSET_MIN_C: f32 = -10.0;
pub const OFFSET_MAX_C: f32 = 10.0;

/// Boot-time configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Calibration ---
    /// Offset added to every probe reading (°C), from calibration testing.
    pub calibration_offset_c: f32,
    /// Index into [`SAMPLE_INTERVALS_SECS`] used at startup.
    pub sample_interval_index: usize,

    // --- Timing ---
    /// Period of the display refresh tick (seconds).
    pub display_refresh_secs: u32,
    /// Minimum gap between accepted presses of the same button (ms).
    pub button_debounce_ms: u64,
    /// Minimum gap between accepted touch events (ms).
    pub touch_debounce_ms: u64,

    // --- Recording ---
    /// Smooth single-sample spikes in the graphed series (never the log).
    pub glitch_filter: bool,
    /// CSV log of every sample.  Two older generations are kept beside it.
    pub log_path: PathBuf,
    /// Where the graphing collaborator writes the rendered graph.
    pub graph_path: PathBuf,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Calibration
            calibration_offset_c: 0.0,
            sample_interval_index: 0, // 6 s

            // Timing
            display_refresh_secs: 1,
            button_debounce_ms: 300,
            touch_debounce_ms: 2000,

            // Recording
            glitch_filter: false,
            log_path: PathBuf::from("/home/pi/ovenprobe.csv"),
            graph_path: PathBuf::from("/home/pi/ovenprobe-graph.dat"),
        }
    }
}

impl SystemConfig {
    /// Reject out-of-range values.  Nothing is clamped silently.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(OFFSET_MIN_C..=OFFSET_MAX_C).contains(&self.calibration_offset_c) {
            return Err("calibration_offset_c must be within -10.0..=10.0");
        }
        if self.sample_interval_index >= SAMPLE_INTERVALS_SECS.len() {
            return Err("sample_interval_index is past the interval table");
        }
        if self.display_refresh_secs == 0 {
            return Err("display_refresh_secs must be positive");
        }
        if self.button_debounce_ms == 0 || self.touch_debounce_ms == 0 {
            return Err("debounce windows must be positive");
        }
        if self.log_path.as_os_str().is_empty() {
            return Err("log_path must not be empty");
        }
        Ok(())
    }

    /// The runtime subset the menu edits.
    pub fn committed(&self) -> CommittedConfig {
        CommittedConfig {
            calibration_offset_c: self.calibration_offset_c,
            interval_index: self.sample_interval_index,
        }
    }
}

/// Configuration currently in effect for recording.
///
/// Written only by a commit on one of the adjust pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommittedConfig {
    pub calibration_offset_c: f32,
    pub interval_index: usize,
}

impl CommittedConfig {
    /// Committed sampling interval in seconds.
    pub fn interval_secs(&self) -> u32 {
        SAMPLE_INTERVALS_SECS[self.interval_index.min(SAMPLE_INTERVALS_SECS.len() - 1)]
    }
}

impl Default for CommittedConfig {
    fn default() -> Self {
        SystemConfig::default().committed()
    }
}
