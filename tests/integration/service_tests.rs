//! Integration tests for the MonitorService → recorder → display pipeline.

use ovenprobe::app::ports::{SensorError, TraceColour};
use ovenprobe::app::service::{Flow, MonitorService};
use ovenprobe::config::SystemConfig;
use ovenprobe::display::DisplayMode;
use ovenprobe::error::Error;
use ovenprobe::events::{Button, Event};
use ovenprobe::fsm::Mode;

use crate::mock_hw::{HwCall, MockHardware, MockLog};
use crate::{boot, boot_with, send, send_at};

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_shows_splash_then_temperature_and_logs_seed() {
    let (svc, hw, log) = boot(20.0);

    assert_eq!(hw.screens()[0].lines[0].text, "Starting ...");
    assert!(hw.calls.contains(&HwCall::Activity(true)));
    assert_eq!(
        hw.last_text(),
        [
            "Current Temperature",
            "20.0 C",
            "68.0 F",
            "Time (min:sec) = 0:00",
            "Save/Hold Temperature",
            "20.0 C",
            "68.0 F",
            "Time (min:sec) = 0:00",
        ]
    );
    assert_eq!(log.lines, ["0,20.00,68.00"]);
    assert_eq!(svc.mode(), Mode::Normal);
    assert_eq!(svc.display_mode(), DisplayMode::Temperature);
}

#[test]
fn start_fails_when_probe_is_open() {
    let mut hw = MockHardware::new(20.0);
    hw.sensor_fault = Some(SensorError::OpenCircuit);
    let mut log = MockLog::new();
    let res = MonitorService::start(&SystemConfig::default(), &mut hw, &mut log, 0);
    assert!(matches!(res, Err(Error::Sensor(SensorError::OpenCircuit))));
    assert!(log.lines.is_empty());
}

#[test]
fn failed_boot_still_cleans_up() {
    let mut hw = MockHardware::new(20.0);
    hw.sensor_fault = Some(SensorError::Unavailable);
    let mut log = MockLog::new();
    let res = MonitorService::boot(&SystemConfig::default(), &mut hw, &mut log, 0);

    assert!(matches!(res, Err(Error::Sensor(SensorError::Unavailable))));
    assert!(log.closed);
    assert!(hw.released());
    assert_eq!(hw.led(), Some(false));
    assert_eq!(hw.calls.last(), Some(&HwCall::Release));
}

#[test]
fn boot_on_healthy_probe_matches_start() {
    let mut hw = MockHardware::new(20.0);
    let mut log = MockLog::new();
    let svc = MonitorService::boot(&SystemConfig::default(), &mut hw, &mut log, 0).unwrap();
    assert!(!svc.is_shut_down());
    assert!(!log.closed);
    assert!(!hw.released());
    assert_eq!(log.lines, ["0,20.00,68.00"]);
}

#[test]
fn start_applies_configured_offset() {
    let cfg = SystemConfig {
        calibration_offset_c: -1.5,
        ..SystemConfig::default()
    };
    let (_, _, log) = boot_with(cfg, 20.0);
    assert_eq!(log.lines, ["0,18.50,65.30"]);
}

// ── Display ticks ─────────────────────────────────────────────

#[test]
fn display_tick_advances_clock_and_blinks_led() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    hw.clear();
    send(&mut svc, &mut hw, &mut log, Event::DisplayTick);

    assert_eq!(hw.calls[0], HwCall::Activity(false));
    assert_eq!(hw.last_text()[3], "Time (min:sec) = 0:01");
    assert_eq!(svc.display_secs(), 1);

    send(&mut svc, &mut hw, &mut log, Event::DisplayTick);
    assert_eq!(hw.led(), Some(true));
}

#[test]
fn display_tick_reads_live_temperature() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    hw.temp_c = 150.0;
    send(&mut svc, &mut hw, &mut log, Event::DisplayTick);
    assert_eq!(hw.last_text()[1], "150.0 C");
    assert_eq!(hw.last_text()[5], "20.0 C", "hold untouched");
    assert_eq!(log.lines.len(), 1, "display ticks never log");
}

#[test]
fn display_tick_keeps_last_value_on_probe_fault() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    hw.sensor_fault = Some(SensorError::ShortToGround);
    send(&mut svc, &mut hw, &mut log, Event::DisplayTick);
    assert_eq!(svc.live_c(), 20.0);
    assert_eq!(hw.last_text()[1], "20.0 C");
}

// ── Sampling ticks ────────────────────────────────────────────

#[test]
fn sample_ticks_log_each_interval() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    hw.temp_c = 21.0;
    send(&mut svc, &mut hw, &mut log, Event::SampleTick);
    hw.temp_c = 22.5;
    send(&mut svc, &mut hw, &mut log, Event::SampleTick);

    assert_eq!(log.lines, ["0,20.00,68.00", "6,21.00,69.80", "12,22.50,72.50"]);
    assert_eq!(svc.recorder().series().len(), 3);
}

#[test]
fn sample_tick_in_temperature_view_draws_nothing() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    hw.clear();
    send(&mut svc, &mut hw, &mut log, Event::SampleTick);
    assert!(hw.calls.is_empty());
}

#[test]
fn failed_sample_is_skipped_but_time_advances() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    hw.sensor_fault = Some(SensorError::Unavailable);
    send(&mut svc, &mut hw, &mut log, Event::SampleTick);
    hw.sensor_fault = None;
    send(&mut svc, &mut hw, &mut log, Event::SampleTick);

    assert_eq!(log.lines, ["0,20.00,68.00", "12,20.00,68.00"]);
    assert_eq!(svc.recorder().elapsed_secs(), 12);
}

#[test]
fn glitch_filter_smooths_series_not_log() {
    let cfg = SystemConfig {
        glitch_filter: true,
        ..SystemConfig::default()
    };
    let (mut svc, mut hw, mut log) = boot_with(cfg, 20.0);
    hw.temp_c = 21.0;
    send(&mut svc, &mut hw, &mut log, Event::SampleTick);
    hw.temp_c = 20.0;
    send(&mut svc, &mut hw, &mut log, Event::SampleTick);

    let temps: Vec<f32> = svc.recorder().series().samples().iter().map(|s| s.temp_c).collect();
    assert_eq!(temps, [20.0, 20.0, 20.0]);
    assert_eq!(log.lines[1], "6,21.00,69.80");
}

// ── Hold and restart ──────────────────────────────────────────

#[test]
fn hold_captures_live_reading_and_clock() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    for _ in 0..75 {
        send(&mut svc, &mut hw, &mut log, Event::DisplayTick);
    }
    hw.temp_c = 30.0;
    send(&mut svc, &mut hw, &mut log, Event::ButtonPress(Button::Two));

    let held = svc.held();
    assert_eq!((held.minutes, held.seconds), (1, 15));
    assert_eq!(held.temp_c, 30.0);
    assert_eq!(held.temp_f, 86.0);
    let text = hw.last_text();
    assert_eq!(text[5], "30.0 C");
    assert_eq!(text[7], "Time (min:sec) = 1:15");
}

#[test]
fn restart_resets_run_and_logs_marker() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    for _ in 0..3 {
        send(&mut svc, &mut hw, &mut log, Event::SampleTick);
    }
    for _ in 0..5 {
        send(&mut svc, &mut hw, &mut log, Event::DisplayTick);
    }
    hw.temp_c = 25.0;
    send(&mut svc, &mut hw, &mut log, Event::ButtonPress(Button::Three));

    assert_eq!(log.tail(2), ["00,00,00", "0,25.00,77.00"]);
    assert_eq!(svc.recorder().elapsed_secs(), 0);
    assert_eq!(svc.recorder().series().len(), 1);
    assert_eq!(svc.display_secs(), 0);
    assert_eq!(svc.held().temp_c, 25.0);
    assert_eq!(svc.held().elapsed_secs, 0);
    assert_eq!(hw.last_text()[3], "Time (min:sec) = 0:00");

    send(&mut svc, &mut hw, &mut log, Event::SampleTick);
    assert_eq!(log.tail(1), ["6,25.00,77.00"]);
}

#[test]
fn restart_from_graph_returns_to_temperature() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    send_at(&mut svc, &mut hw, &mut log, Event::PointerDown, 2000);
    assert_eq!(svc.display_mode(), DisplayMode::Graph);

    send(&mut svc, &mut hw, &mut log, Event::ButtonPress(Button::Three));
    assert_eq!(svc.display_mode(), DisplayMode::Temperature);
    assert_eq!(hw.last_text()[0], "Current Temperature");
}

#[test]
fn restart_with_probe_fault_changes_nothing() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    send(&mut svc, &mut hw, &mut log, Event::SampleTick);
    hw.sensor_fault = Some(SensorError::OpenCircuit);
    let flow = send(&mut svc, &mut hw, &mut log, Event::ButtonPress(Button::Three));

    assert_eq!(flow, Flow::Continue);
    assert_eq!(log.lines.len(), 2);
    assert_eq!(svc.recorder().elapsed_secs(), 6);
    assert_eq!(svc.recorder().series().len(), 2);
}

// ── Touch / display toggle ────────────────────────────────────

#[test]
fn touch_inside_startup_window_is_ignored() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    send_at(&mut svc, &mut hw, &mut log, Event::PointerDown, 500);
    assert_eq!(svc.display_mode(), DisplayMode::Temperature);
    assert!(hw.graphs().is_empty());
}

#[test]
fn touch_toggles_graph_with_debounce() {
    let (mut svc, mut hw, mut log) = boot(20.0);

    send_at(&mut svc, &mut hw, &mut log, Event::PointerDown, 2500);
    assert_eq!(svc.display_mode(), DisplayMode::Graph);
    assert_eq!(hw.graphs(), [(1, TraceColour::Red)]);
    assert_eq!(hw.images(), 1);

    send_at(&mut svc, &mut hw, &mut log, Event::PointerDown, 3000);
    assert_eq!(svc.display_mode(), DisplayMode::Graph);

    send_at(&mut svc, &mut hw, &mut log, Event::PointerDown, 4600);
    assert_eq!(svc.display_mode(), DisplayMode::Temperature);
    assert_eq!(hw.last_text()[0], "Current Temperature");
}

#[test]
fn graph_is_blue_at_or_below_freezing() {
    let (mut svc, mut hw, mut log) = boot(-5.0);
    send_at(&mut svc, &mut hw, &mut log, Event::PointerDown, 2000);
    assert_eq!(hw.graphs(), [(1, TraceColour::Blue)]);
}

#[test]
fn toggling_twice_leaves_run_untouched() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    send(&mut svc, &mut hw, &mut log, Event::SampleTick);
    let series = svc.recorder().series().samples().to_vec();
    let config = svc.committed();

    send_at(&mut svc, &mut hw, &mut log, Event::PointerDown, 2000);
    send_at(&mut svc, &mut hw, &mut log, Event::PointerDown, 4000);

    assert_eq!(svc.display_mode(), DisplayMode::Temperature);
    assert_eq!(svc.recorder().series().samples(), series.as_slice());
    assert_eq!(svc.committed(), config);
}

#[test]
fn sample_tick_in_graph_view_redraws_graph() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    send_at(&mut svc, &mut hw, &mut log, Event::PointerDown, 2000);
    hw.clear();

    send(&mut svc, &mut hw, &mut log, Event::SampleTick);
    assert_eq!(hw.graphs(), [(2, TraceColour::Red)]);
    assert_eq!(hw.images(), 1);
}

#[test]
fn display_tick_in_graph_view_only_blinks() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    send_at(&mut svc, &mut hw, &mut log, Event::PointerDown, 2000);
    hw.clear();

    send(&mut svc, &mut hw, &mut log, Event::DisplayTick);
    assert_eq!(hw.calls, [HwCall::Activity(false)]);
}

#[test]
fn graph_failure_keeps_previous_screen() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    hw.graph_fails = true;
    hw.clear();

    send_at(&mut svc, &mut hw, &mut log, Event::PointerDown, 2000);
    assert_eq!(svc.display_mode(), DisplayMode::Graph);
    assert_eq!(hw.images(), 0);
    assert!(hw.screens().is_empty());
}

// ── Main loop ─────────────────────────────────────────────────

#[test]
fn run_consumes_until_quit_then_cleans_up() {
    use ovenprobe::events::EventQueue;

    let (mut svc, mut hw, mut log) = boot(20.0);
    let q = EventQueue::new();
    q.post(Event::SampleTick);
    q.post(Event::DisplayTick);
    q.post(Event::Quit);
    q.post(Event::SampleTick);

    svc.run(&q, &mut hw, &mut log, || 0).unwrap();

    assert_eq!(log.lines.len(), 2);
    assert!(log.closed);
    assert!(hw.released());
    assert_eq!(hw.led(), Some(false));
    assert_eq!(q.len(), 1, "events after quit stay queued");
}

#[test]
fn log_failure_is_fatal_and_still_cleans_up() {
    use ovenprobe::events::EventQueue;

    let (mut svc, mut hw, mut log) = boot(20.0);
    log.fail_after = Some(1);
    let q = EventQueue::new();
    q.post(Event::SampleTick);

    let res = svc.run(&q, &mut hw, &mut log, || 0);

    assert!(matches!(res, Err(Error::Log(_))));
    assert!(log.closed);
    assert!(hw.released());
    assert_eq!(hw.led(), Some(false));
}
