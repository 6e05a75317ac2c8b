//! Application service: the hexagonal core and the main loop.
//!
//! [`MonitorService`] owns the menu FSM, the recording engine, the display
//! state and the held reading.  It is the single consumer of the event
//! queue and the only code that touches appliance state, so none of that
//! state is behind a lock.  All I/O flows through port traits passed in at
//! call sites.
//!
//! ```text
//!  EventQueue ──▶ ┌──────────────────────────────┐ ──▶ DisplayPort
//!                 │        MonitorService         │ ──▶ GraphPort
//!   SensorPort ──▶│  MenuFsm · Recorder · View    │ ──▶ IndicatorPort
//!                 └──────────────────────────────┘ ──▶ LogPort
//! ```

use log::{debug, error, info, warn};

use crate::config::{CommittedConfig, SystemConfig};
use crate::display::{DisplayMode, DisplayState};
use crate::drivers::button::Debouncer;
use crate::error::Result;
use crate::events::{Button, Event, EventQueue};
use crate::fsm::context::{MenuAction, MenuContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{MenuFsm, Mode, StateId};
use crate::recording::{HeldReading, RecordingEngine, read_calibrated};

use super::ports::{LogPort, Peripherals, TraceColour};
use super::screens;

/// Whether the main loop keeps going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Keyboard aliases for the side buttons.  `x` is handled separately.
///
/// | Key | Normal  | Menu   |
/// |-----|---------|--------|
/// | h/u | `Two`   | `Two`  |
/// | r/d | `Three` | `Three`|
/// | m/s | `Four`  | `Four` |
pub fn key_to_button(mode: Mode, key: char) -> Option<Button> {
    match (mode, key) {
        (Mode::Normal, 'h') | (Mode::Menu, 'u') => Some(Button::Two),
        (Mode::Normal, 'r') | (Mode::Menu, 'd') => Some(Button::Three),
        (Mode::Normal, 'm') | (Mode::Menu, 's') => Some(Button::Four),
        _ => None,
    }
}

/// Flush the log, darken the LED and hand the screen back.
///
/// Every step runs even if closing the log fails; that failure is returned
/// afterwards.
pub fn shutdown_sequence(hw: &mut impl Peripherals, log: &mut impl LogPort) -> Result<()> {
    let closed = log.close();
    hw.set_activity(false);
    hw.release();
    closed?;
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

pub struct MonitorService {
    fsm: MenuFsm,
    menu: MenuContext,
    recorder: RecordingEngine,
    view: DisplayState,
    held: HeldReading,
    touch: Debouncer,
    refresh_secs: u32,
    led_on: bool,
    shut_down: bool,
}

impl MonitorService {
    // ── Lifecycle ─────────────────────────────────────────────

    /// Show the splash, light the LED, take the seed sample and draw the
    /// first temperature screen.  The touch debounce window starts at
    /// `now_ms`.
    ///
    /// Fails if the seed sample cannot be read or logged.
    pub fn start(
        config: &SystemConfig,
        hw: &mut impl Peripherals,
        log: &mut impl LogPort,
        now_ms: u64,
    ) -> Result<Self> {
        hw.render_screen(&screens::splash());
        hw.set_activity(true);

        let committed = config.committed();
        let recorder = RecordingEngine::start(&committed, config.glitch_filter, hw, log)?;
        let seed = *recorder.latest().ok_or(crate::error::Error::Init("no seed sample"))?;

        let mut service = Self {
            fsm: MenuFsm::new(build_state_table(), StateId::Normal),
            menu: MenuContext::new(committed),
            recorder,
            view: DisplayState::new(seed.temp_c),
            held: HeldReading::from_sample(&seed),
            touch: Debouncer::armed(config.touch_debounce_ms, now_ms),
            refresh_secs: config.display_refresh_secs,
            led_on: true,
            shut_down: false,
        };
        service.fsm.start(&mut service.menu);
        service.apply_actions(hw, log)?;

        info!(
            "MonitorService started: offset {:.1} C, sampling every {}s",
            committed.calibration_offset_c,
            committed.interval_secs()
        );
        Ok(service)
    }

    /// Like [`start`](Self::start), but a failed start still runs the
    /// shutdown sequence before the error is returned.
    pub fn boot(
        config: &SystemConfig,
        hw: &mut impl Peripherals,
        log: &mut impl LogPort,
        now_ms: u64,
    ) -> Result<Self> {
        match Self::start(config, hw, log, now_ms) {
            Ok(service) => Ok(service),
            Err(e) => {
                error!("start failed: {}", e);
                if let Err(close) = shutdown_sequence(hw, log) {
                    warn!("shutdown after failed start: {}", close);
                }
                Err(e)
            }
        }
    }

    /// Consume events until quit or a fatal error.  Runs the shutdown
    /// sequence on both paths.
    pub fn run(
        &mut self,
        queue: &EventQueue,
        hw: &mut impl Peripherals,
        log: &mut impl LogPort,
        mut now_ms: impl FnMut() -> u64,
    ) -> Result<()> {
        loop {
            let event = queue.wait();
            match self.handle(event, hw, log, now_ms()) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => {
                    info!("quit requested in {:?}", self.fsm.current_state());
                    return self.shutdown(hw, log);
                }
                Err(e) => {
                    error!("fatal: {}", e);
                    if let Err(close) = self.shutdown(hw, log) {
                        warn!("shutdown after fatal error: {}", close);
                    }
                    return Err(e);
                }
            }
        }
    }

    /// Run the shutdown sequence once; later calls do nothing.
    pub fn shutdown(&mut self, hw: &mut impl Peripherals, log: &mut impl LogPort) -> Result<()> {
        if self.shut_down {
            return Ok(());
        }
        self.shut_down = true;
        self.led_on = false;
        shutdown_sequence(hw, log)
    }

    // ── Event dispatch ────────────────────────────────────────

    /// Handle exactly one event.
    pub fn handle(
        &mut self,
        event: Event,
        hw: &mut impl Peripherals,
        log: &mut impl LogPort,
        now_ms: u64,
    ) -> Result<Flow> {
        match event {
            Event::Quit | Event::KeyPress('x') => Ok(Flow::Quit),
            Event::KeyPress(key) => match key_to_button(self.mode(), key) {
                Some(button) => self.press(button, hw, log),
                None => {
                    debug!("key {:?} ignored in {:?} mode", key, self.mode());
                    Ok(Flow::Continue)
                }
            },
            Event::ButtonPress(button) => self.press(button, hw, log),
            Event::PointerDown => {
                self.on_pointer(hw, now_ms);
                Ok(Flow::Continue)
            }
            Event::DisplayTick => {
                self.on_display_tick(hw);
                Ok(Flow::Continue)
            }
            Event::SampleTick => {
                self.on_sample_tick(hw, log)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn press(
        &mut self,
        button: Button,
        hw: &mut impl Peripherals,
        log: &mut impl LogPort,
    ) -> Result<Flow> {
        self.fsm.press(button, &mut self.menu);
        self.apply_actions(hw, log)
    }

    fn apply_actions(&mut self, hw: &mut impl Peripherals, log: &mut impl LogPort) -> Result<Flow> {
        for action in self.menu.take_actions() {
            match action {
                MenuAction::CaptureHold => self.capture_hold(hw),
                MenuAction::Restart => self.restart(hw, log)?,
                MenuAction::RedrawMenu => self.redraw_menu(hw),
                MenuAction::ResumeNormalView => self.show_view(hw),
                MenuAction::RearmSampling(period) => hw.rearm_sampling(period),
                MenuAction::Shutdown => return Ok(Flow::Quit),
            }
        }
        Ok(Flow::Continue)
    }

    // ── Inputs ────────────────────────────────────────────────

    fn on_pointer(&mut self, hw: &mut impl Peripherals, now_ms: u64) {
        if self.mode() != Mode::Normal {
            debug!("touch ignored in menu");
            return;
        }
        if !self.touch.accept(now_ms) {
            debug!("touch inside debounce window ignored");
            return;
        }
        let mode = self.view.toggle();
        info!("display view -> {:?}", mode);
        self.show_view(hw);
    }

    fn on_display_tick(&mut self, hw: &mut impl Peripherals) {
        self.view.advance(self.refresh_secs);
        self.led_on = !self.led_on;
        hw.set_activity(self.led_on);

        if self.mode() == Mode::Normal && self.view.mode() == DisplayMode::Temperature {
            self.refresh_live(hw);
            self.render_temperature(hw);
        }
    }

    fn on_sample_tick(&mut self, hw: &mut impl Peripherals, log: &mut impl LogPort) -> Result<()> {
        let config = self.menu.config;
        self.recorder.on_sample_tick(&config, hw, log)?;
        if self.mode() == Mode::Normal && self.view.mode() == DisplayMode::Graph {
            self.show_graph(hw);
        }
        Ok(())
    }

    // ── Actions ───────────────────────────────────────────────

    fn capture_hold(&mut self, hw: &mut impl Peripherals) {
        self.refresh_live(hw);
        self.held = HeldReading::capture(self.view.display_secs(), self.view.live_c());
        info!(
            "hold captured: {:.1} C at {}:{:02}",
            self.held.temp_c, self.held.minutes, self.held.seconds
        );
        if self.view.mode() == DisplayMode::Temperature {
            self.render_temperature(hw);
        }
    }

    fn restart(&mut self, hw: &mut impl Peripherals, log: &mut impl LogPort) -> Result<()> {
        let config = self.menu.config;
        let Some(seed) = self.recorder.restart(&config, hw, log)? else {
            return Ok(());
        };
        self.view.reset_clock();
        self.view.set_live(seed.temp_c);
        self.view.set_mode(DisplayMode::Temperature);
        self.held = HeldReading::from_sample(&seed);
        self.render_temperature(hw);
        Ok(())
    }

    fn redraw_menu(&self, hw: &mut impl Peripherals) {
        let screen = match self.fsm.current_state() {
            StateId::Normal => return,
            StateId::MainMenu => screens::main_menu(self.menu.highlighted),
            StateId::TempAdjust => screens::temp_adjust(self.menu.staged_offset_c),
            StateId::TimeAdjust => screens::time_adjust(self.menu.staged_interval_secs()),
        };
        hw.render_screen(&screen);
    }

    // ── Rendering ─────────────────────────────────────────────

    fn refresh_live(&mut self, hw: &mut impl Peripherals) {
        match read_calibrated(hw, &self.menu.config) {
            Ok(t) => self.view.set_live(t),
            Err(e) => warn!("live read failed, showing last value: {}", e),
        }
    }

    fn show_view(&mut self, hw: &mut impl Peripherals) {
        match self.view.mode() {
            DisplayMode::Temperature => {
                self.refresh_live(hw);
                self.render_temperature(hw);
            }
            DisplayMode::Graph => self.show_graph(hw),
        }
    }

    fn render_temperature(&self, hw: &mut impl Peripherals) {
        hw.render_screen(&screens::temperature(
            self.view.live_c(),
            self.view.display_secs(),
            &self.held,
        ));
    }

    fn show_graph(&self, hw: &mut impl Peripherals) {
        let samples = self.recorder.series().samples();
        let colour = TraceColour::for_temperature(samples.last().map_or(0.0, |s| s.temp_c));
        match hw.render_graph(samples, colour) {
            Ok(path) => hw.render_image(&path),
            Err(e) => warn!("graph not updated: {}", e),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.fsm.mode()
    }

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.view.mode()
    }

    /// Seconds on the display clock.
    pub fn display_secs(&self) -> u32 {
        self.view.display_secs()
    }

    pub fn live_c(&self) -> f32 {
        self.view.live_c()
    }

    pub fn held(&self) -> &HeldReading {
        &self.held
    }

    pub fn recorder(&self) -> &RecordingEngine {
        &self.recorder
    }

    pub fn committed(&self) -> CommittedConfig {
        self.menu.config
    }

    pub fn highlighted(&self) -> u8 {
        self.menu.highlighted
    }

    pub fn staged_offset_c(&self) -> f32 {
        self.menu.staged_offset_c
    }

    pub fn staged_interval_secs(&self) -> u32 {
        self.menu.staged_interval_secs()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}
