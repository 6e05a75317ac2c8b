//! Integration tests for menu navigation through buttons and keyboard.

use std::time::Duration;

use ovenprobe::app::service::Flow;
use ovenprobe::config::SystemConfig;
use ovenprobe::display::DisplayMode;
use ovenprobe::events::{Button, Event};
use ovenprobe::fsm::{Mode, StateId};

use crate::{boot, boot_with, keys, send, send_at};

#[test]
fn menu_key_opens_main_menu_on_first_line() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    keys(&mut svc, &mut hw, &mut log, "m");

    assert_eq!(svc.state(), StateId::MainMenu);
    assert_eq!(svc.mode(), Mode::Menu);
    let screen = hw.last_screen().unwrap();
    assert_eq!(screen.lines[0].text, "Menu");
    assert_eq!(screen.highlighted_text(), Some("Adjust Temperature"));
}

#[test]
fn buttons_and_keys_drive_the_same_menu() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    send(&mut svc, &mut hw, &mut log, Event::ButtonPress(Button::Four));
    send(&mut svc, &mut hw, &mut log, Event::ButtonPress(Button::Three));
    assert_eq!(svc.highlighted(), 2);
    keys(&mut svc, &mut hw, &mut log, "d");
    assert_eq!(svc.highlighted(), 3);
    assert_eq!(hw.last_screen().unwrap().highlighted_text(), Some("Return"));
}

#[test]
fn normal_mode_keys_are_ignored_in_menu() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    keys(&mut svc, &mut hw, &mut log, "m");
    hw.clear();
    keys(&mut svc, &mut hw, &mut log, "hrmq");
    assert!(hw.calls.is_empty());
    assert_eq!(svc.highlighted(), 1);
}

#[test]
fn highlight_wraps_over_four_lines() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    keys(&mut svc, &mut hw, &mut log, "mu");
    assert_eq!(svc.highlighted(), 4);
    keys(&mut svc, &mut hw, &mut log, "d");
    assert_eq!(svc.highlighted(), 1);
}

#[test]
fn committed_offset_applies_to_later_samples() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    keys(&mut svc, &mut hw, &mut log, "ms");
    assert_eq!(svc.state(), StateId::TempAdjust);

    keys(&mut svc, &mut hw, &mut log, "uuuuu");
    assert_eq!(hw.last_screen().unwrap().highlighted_text(), Some("0.5"));
    keys(&mut svc, &mut hw, &mut log, "s");
    assert_eq!(svc.state(), StateId::MainMenu);
    assert_eq!(svc.highlighted(), 1);
    assert_eq!(svc.committed().calibration_offset_c, 0.5);

    send(&mut svc, &mut hw, &mut log, Event::SampleTick);
    assert_eq!(log.tail(1), ["6,20.50,68.90"]);
}

#[test]
fn staged_offset_never_reaches_recording() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    keys(&mut svc, &mut hw, &mut log, "msdd");
    assert_eq!(svc.staged_offset_c(), -0.2);

    send(&mut svc, &mut hw, &mut log, Event::SampleTick);
    assert_eq!(log.tail(1), ["6,20.00,68.00"]);
    assert_eq!(svc.committed().calibration_offset_c, 0.0);
    assert_eq!(
        hw.last_screen().unwrap().highlighted_text(),
        Some("-0.2"),
        "sampling in a menu leaves the page on screen"
    );
}

#[test]
fn off_grid_offset_from_config_steps_by_one_tenth() {
    let config = SystemConfig {
        calibration_offset_c: -3.25,
        ..SystemConfig::default()
    };
    let (mut svc, mut hw, mut log) = boot_with(config, 20.0);
    assert_eq!(log.tail(1), ["0,16.75,62.15"]);

    keys(&mut svc, &mut hw, &mut log, "msu");
    assert_eq!(svc.staged_offset_c(), -3.15);
    keys(&mut svc, &mut hw, &mut log, "s");
    assert_eq!(svc.committed().calibration_offset_c, -3.15);

    send(&mut svc, &mut hw, &mut log, Event::SampleTick);
    assert_eq!(log.tail(1), ["6,16.85,62.33"]);
}

#[test]
fn offset_walks_back_to_exact_zero() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    keys(&mut svc, &mut hw, &mut log, "msuuuddd");
    assert_eq!(svc.staged_offset_c(), 0.0);
    assert_eq!(hw.last_screen().unwrap().highlighted_text(), Some("0.0"));
}

#[test]
fn interval_commit_rearms_ticker_and_stretches_samples() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    keys(&mut svc, &mut hw, &mut log, "mds");
    assert_eq!(svc.state(), StateId::TimeAdjust);

    keys(&mut svc, &mut hw, &mut log, "uu");
    assert_eq!(svc.staged_interval_secs(), 60);
    assert_eq!(hw.last_screen().unwrap().highlighted_text(), Some("60"));
    assert!(hw.rearms().is_empty());

    keys(&mut svc, &mut hw, &mut log, "s");
    assert_eq!(hw.rearms(), [Duration::from_secs(60)]);
    assert_eq!(svc.highlighted(), 2);

    send(&mut svc, &mut hw, &mut log, Event::SampleTick);
    assert_eq!(svc.recorder().elapsed_secs(), 60);
}

#[test]
fn interval_clamps_at_both_ends() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    keys(&mut svc, &mut hw, &mut log, "mdsd");
    assert_eq!(svc.staged_interval_secs(), 6);
    keys(&mut svc, &mut hw, &mut log, "uuuuuuuuuu");
    assert_eq!(svc.staged_interval_secs(), 3600);
}

#[test]
fn return_restores_the_previous_view() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    send_at(&mut svc, &mut hw, &mut log, Event::PointerDown, 2000);
    assert_eq!(svc.display_mode(), DisplayMode::Graph);

    keys(&mut svc, &mut hw, &mut log, "mdd");
    hw.clear();
    keys(&mut svc, &mut hw, &mut log, "s");

    assert_eq!(svc.mode(), Mode::Normal);
    assert_eq!(hw.graphs().len(), 1, "graph regenerated");
    assert_eq!(hw.images(), 1);
}

#[test]
fn return_to_temperature_view_redraws_it() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    keys(&mut svc, &mut hw, &mut log, "mdds");
    assert_eq!(svc.mode(), Mode::Normal);
    assert_eq!(hw.last_text()[0], "Current Temperature");
}

#[test]
fn touch_is_ignored_in_menu() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    keys(&mut svc, &mut hw, &mut log, "m");
    send_at(&mut svc, &mut hw, &mut log, Event::PointerDown, 5000);
    assert_eq!(svc.display_mode(), DisplayMode::Temperature);
    assert!(hw.graphs().is_empty());
}

#[test]
fn display_tick_in_menu_only_blinks() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    keys(&mut svc, &mut hw, &mut log, "m");
    hw.clear();
    send(&mut svc, &mut hw, &mut log, Event::DisplayTick);
    assert_eq!(hw.calls.len(), 1);
    assert_eq!(hw.led(), Some(false));
    assert_eq!(svc.display_secs(), 1);
}

#[test]
fn exit_line_quits() {
    let (mut svc, mut hw, mut log) = boot(20.0);
    keys(&mut svc, &mut hw, &mut log, "mu");
    let flow = send(&mut svc, &mut hw, &mut log, Event::KeyPress('s'));
    assert_eq!(flow, Flow::Quit);
}
