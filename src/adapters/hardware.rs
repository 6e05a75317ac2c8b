//! Hardware adapter: bridges the peripherals to the domain port traits.
//!
//! Owns the thermocouple probe, the screen, the graph renderer and the
//! activity LED, exposing them through [`SensorPort`], [`DisplayPort`],
//! [`GraphPort`], [`IndicatorPort`] and [`TickerPort`].  This is the only
//! module that touches the peripherals; on a development machine the
//! underlying drivers are the console and simulation stand-ins.

use core::convert::Infallible;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::debug;

use super::console::TextDisplay;
use super::graph::PlotFileGraph;
use crate::app::ports::{
    DisplayPort, GraphError, GraphPort, IndicatorPort, SensorError, SensorPort, TickerPort,
    TraceColour,
};
use crate::app::screens::ScreenSpec;
use crate::drivers::status_led::ActivityLed;
use crate::drivers::ticker;
use crate::recording::Sample;
use crate::sensors::thermocouple::ThermocoupleProbe;

/// Output pin that only logs its level.
#[derive(Debug, Default)]
pub struct SimPin {
    gpio: i32,
}

impl SimPin {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        debug!("gpio {}: low", self.gpio);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        debug!("gpio {}: high", self.gpio);
        Ok(())
    }
}

/// Concrete adapter that combines all peripherals behind port traits.
pub struct HardwareAdapter<W: Write, P: OutputPin> {
    probe: ThermocoupleProbe,
    display: TextDisplay<W>,
    graph: PlotFileGraph,
    led: ActivityLed<P>,
}

impl<W: Write, P: OutputPin> HardwareAdapter<W, P> {
    pub fn new(
        probe: ThermocoupleProbe,
        display: TextDisplay<W>,
        graph_path: impl Into<PathBuf>,
        led: ActivityLed<P>,
    ) -> Self {
        Self {
            probe,
            display,
            graph: PlotFileGraph::new(graph_path),
            led,
        }
    }
}

// ── SensorPort ───────────────────────────────────────────────

impl<W: Write, P: OutputPin> SensorPort for HardwareAdapter<W, P> {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.probe.read_temperature()
    }
}

// ── DisplayPort ──────────────────────────────────────────────

impl<W: Write, P: OutputPin> DisplayPort for HardwareAdapter<W, P> {
    fn render_screen(&mut self, screen: &ScreenSpec) {
        self.display.render_screen(screen);
    }

    fn render_image(&mut self, path: &Path) {
        self.display.render_image(path);
    }

    fn release(&mut self) {
        self.display.release();
    }
}

// ── GraphPort ────────────────────────────────────────────────

impl<W: Write, P: OutputPin> GraphPort for HardwareAdapter<W, P> {
    fn render_graph(
        &mut self,
        samples: &[Sample],
        colour: TraceColour,
    ) -> Result<PathBuf, GraphError> {
        self.graph.render_graph(samples, colour)
    }
}

// ── IndicatorPort ────────────────────────────────────────────

impl<W: Write, P: OutputPin> IndicatorPort for HardwareAdapter<W, P> {
    fn set_activity(&mut self, on: bool) {
        self.led.set(on);
    }
}

// ── TickerPort ───────────────────────────────────────────────

impl<W: Write, P: OutputPin> TickerPort for HardwareAdapter<W, P> {
    fn rearm_sampling(&mut self, period: Duration) {
        ticker::rearm_sampling(period);
    }
}
