//! Sample recording: the time series, the held reading, and the engine that
//! turns sampling ticks into calibrated samples and log records.
//!
//! ```text
//!  SampleTick ──▶ elapsed += interval ──▶ SensorPort + offset ──▶ Sample
//!                                                               │
//!                               TimeSeries (glitch filter) ◀────┤
//!                               LogPort (raw, flushed)     ◀────┘
//! ```

use log::{info, warn};

use crate::app::ports::{LogPort, LogRecord, SensorPort};
use crate::config::CommittedConfig;
use crate::error::Result;

/// Celsius to Fahrenheit.
pub fn c_to_f(c: f32) -> f32 {
    c * 9.0 / 5.0 + 32.0
}

/// Read the probe and apply the committed calibration offset.
pub fn read_calibrated(
    sensor: &mut impl SensorPort,
    config: &CommittedConfig,
) -> core::result::Result<f32, crate::app::ports::SensorError> {
    Ok(sensor.read_temperature()? + config.calibration_offset_c)
}

// ---------------------------------------------------------------------------
// Sample / TimeSeries
// ---------------------------------------------------------------------------

/// One recorded reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Seconds since recording (re)started.
    pub elapsed_secs: u32,
    pub temp_c: f32,
    pub temp_f: f32,
}

impl Sample {
    pub fn new(elapsed_secs: u32, temp_c: f32) -> Self {
        Self {
            elapsed_secs,
            temp_c,
            temp_f: c_to_f(temp_c),
        }
    }

    /// Elapsed time in minutes, the graph's x axis.
    pub fn elapsed_minutes(&self) -> f32 {
        self.elapsed_secs as f32 / 60.0
    }
}

/// Samples of the current run in time order.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// A series holding just the seed sample.
    pub fn seeded(seed: Sample) -> Self {
        Self {
            samples: vec![seed],
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Smooth a single-sample spike: when the sample two back equals the
    /// newest and the one in between differs, the middle one takes the
    /// newest temperature.  Compared on °F, the unit that is graphed.
    /// Returns `true` if a sample was rewritten.
    pub fn smooth_glitch(&mut self) -> bool {
        let n = self.samples.len();
        if n < 3 {
            return false;
        }
        let newest = self.samples[n - 1];
        let before = self.samples[n - 3];
        let middle = &mut self.samples[n - 2];
        if before.temp_f == newest.temp_f && middle.temp_f != newest.temp_f {
            middle.temp_c = newest.temp_c;
            middle.temp_f = newest.temp_f;
            return true;
        }
        false
    }
}

// ---------------------------------------------------------------------------
// HeldReading
// ---------------------------------------------------------------------------

/// Operator-captured snapshot, shown under the live reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeldReading {
    pub elapsed_secs: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub temp_c: f32,
    pub temp_f: f32,
}

impl HeldReading {
    /// Capture `temp_c` at display-clock time `elapsed_secs`.
    pub fn capture(elapsed_secs: u32, temp_c: f32) -> Self {
        Self {
            elapsed_secs,
            minutes: elapsed_secs / 60,
            seconds: elapsed_secs % 60,
            temp_c,
            temp_f: c_to_f(temp_c),
        }
    }

    pub fn from_sample(sample: &Sample) -> Self {
        Self::capture(sample.elapsed_secs, sample.temp_c)
    }
}

// ---------------------------------------------------------------------------
// RecordingEngine
// ---------------------------------------------------------------------------

/// Owns the series and the recording clock.
pub struct RecordingEngine {
    elapsed_secs: u32,
    series: TimeSeries,
    glitch_filter: bool,
}

impl RecordingEngine {
    /// Take the seed sample and write it as the first log record.
    ///
    /// A probe failure here is fatal: there is nothing to seed the run with.
    pub fn start(
        config: &CommittedConfig,
        glitch_filter: bool,
        sensor: &mut impl SensorPort,
        log: &mut impl LogPort,
    ) -> Result<Self> {
        let seed = Sample::new(0, read_calibrated(sensor, config)?);
        log.append(&LogRecord::Sample(seed))?;
        info!("recording started at {:.1} C", seed.temp_c);
        Ok(Self {
            elapsed_secs: 0,
            series: TimeSeries::seeded(seed),
            glitch_filter,
        })
    }

    /// Advance the clock by the committed interval and record one sample.
    ///
    /// A probe failure skips the sample (the clock still advances).  A log
    /// failure is returned to the caller.
    pub fn on_sample_tick(
        &mut self,
        config: &CommittedConfig,
        sensor: &mut impl SensorPort,
        log: &mut impl LogPort,
    ) -> Result<Option<Sample>> {
        self.elapsed_secs = self.elapsed_secs.saturating_add(config.interval_secs());

        let temp_c = match read_calibrated(sensor, config) {
            Ok(t) => t,
            Err(e) => {
                warn!("sample at {}s skipped: {}", self.elapsed_secs, e);
                return Ok(None);
            }
        };

        let sample = Sample::new(self.elapsed_secs, temp_c);
        self.series.push(sample);
        if self.glitch_filter && self.series.smooth_glitch() {
            log::debug!("glitch smoothed before {}s", self.elapsed_secs);
        }
        log.append(&LogRecord::Sample(sample))?;
        Ok(Some(sample))
    }

    /// Start the run over: clock to zero, series to one fresh sample, and a
    /// restart marker in the log ahead of the fresh record.
    ///
    /// Returns `Ok(None)` without touching anything if the probe read fails.
    pub fn restart(
        &mut self,
        config: &CommittedConfig,
        sensor: &mut impl SensorPort,
        log: &mut impl LogPort,
    ) -> Result<Option<Sample>> {
        let temp_c = match read_calibrated(sensor, config) {
            Ok(t) => t,
            Err(e) => {
                warn!("restart ignored, probe read failed: {}", e);
                return Ok(None);
            }
        };

        let seed = Sample::new(0, temp_c);
        self.elapsed_secs = 0;
        self.series = TimeSeries::seeded(seed);
        log.append(&LogRecord::RestartMarker)?;
        log.append(&LogRecord::Sample(seed))?;
        info!("recording restarted at {:.1} C", temp_c);
        Ok(Some(seed))
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Newest sample in the series.
    pub fn latest(&self) -> Option<&Sample> {
        self.series.latest()
    }
}
