//! Mock peripherals and log for integration tests.
//!
//! Records every port call so tests can assert on the full history
//! without a screen, a probe or a filesystem.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ovenprobe::app::ports::{
    DisplayPort, GraphError, GraphPort, IndicatorPort, LogError, LogPort, LogRecord, SensorError,
    SensorPort, TickerPort, TraceColour,
};
use ovenprobe::app::screens::ScreenSpec;
use ovenprobe::recording::Sample;

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Screen(ScreenSpec),
    Image(PathBuf),
    Graph { points: usize, colour: TraceColour },
    Activity(bool),
    Rearm(Duration),
    Release,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Raw probe value returned by every read.
    pub temp_c: f32,
    /// When set, every probe read fails with this error.
    pub sensor_fault: Option<SensorError>,
    pub graph_fails: bool,
    pub reads: usize,
    pub calls: Vec<HwCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(temp_c: f32) -> Self {
        Self {
            temp_c,
            sensor_fault: None,
            graph_fails: false,
            reads: 0,
            calls: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn screens(&self) -> Vec<&ScreenSpec> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Screen(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn last_screen(&self) -> Option<&ScreenSpec> {
        self.screens().last().copied()
    }

    /// Text of the most recent screen's lines.
    pub fn last_text(&self) -> Vec<String> {
        self.last_screen()
            .map(|s| s.lines.iter().map(|l| l.text.clone()).collect())
            .unwrap_or_default()
    }

    pub fn images(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HwCall::Image(_)))
            .count()
    }

    pub fn graphs(&self) -> Vec<(usize, TraceColour)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Graph { points, colour } => Some((*points, *colour)),
                _ => None,
            })
            .collect()
    }

    /// Last level written to the activity LED.
    pub fn led(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            HwCall::Activity(on) => Some(*on),
            _ => None,
        })
    }

    pub fn rearms(&self) -> Vec<Duration> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Rearm(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    pub fn released(&self) -> bool {
        self.calls.contains(&HwCall::Release)
    }
}

impl SensorPort for MockHardware {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.reads += 1;
        match self.sensor_fault {
            Some(e) => Err(e),
            None => Ok(self.temp_c),
        }
    }
}

impl DisplayPort for MockHardware {
    fn render_screen(&mut self, screen: &ScreenSpec) {
        self.calls.push(HwCall::Screen(screen.clone()));
    }

    fn render_image(&mut self, path: &Path) {
        self.calls.push(HwCall::Image(path.to_path_buf()));
    }

    fn release(&mut self) {
        self.calls.push(HwCall::Release);
    }
}

impl GraphPort for MockHardware {
    fn render_graph(
        &mut self,
        samples: &[Sample],
        colour: TraceColour,
    ) -> Result<PathBuf, GraphError> {
        self.calls.push(HwCall::Graph {
            points: samples.len(),
            colour,
        });
        if self.graph_fails {
            return Err(GraphError::Io(std::io::Error::other("plotter crashed")));
        }
        Ok(PathBuf::from("/tmp/mock-graph.dat"))
    }
}

impl IndicatorPort for MockHardware {
    fn set_activity(&mut self, on: bool) {
        self.calls.push(HwCall::Activity(on));
    }
}

impl TickerPort for MockHardware {
    fn rearm_sampling(&mut self, period: Duration) {
        self.calls.push(HwCall::Rearm(period));
    }
}

// ── MockLog ───────────────────────────────────────────────────

#[derive(Default)]
pub struct MockLog {
    pub lines: Vec<String>,
    pub closed: bool,
    /// Appends fail once this many records have been written.
    pub fail_after: Option<usize>,
}

#[allow(dead_code)]
impl MockLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tail(&self, n: usize) -> &[String] {
        &self.lines[self.lines.len().saturating_sub(n)..]
    }
}

impl LogPort for MockLog {
    fn append(&mut self, record: &LogRecord) -> Result<(), LogError> {
        if self.closed {
            return Err(LogError::Closed);
        }
        if self.fail_after.is_some_and(|n| self.lines.len() >= n) {
            return Err(LogError::Write(std::io::Error::other("disk full")));
        }
        self.lines.push(record.to_string());
        Ok(())
    }

    fn close(&mut self) -> Result<(), LogError> {
        self.closed = true;
        Ok(())
    }
}
