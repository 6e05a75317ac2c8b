//! Shared mutable context threaded through every menu handler.
//!
//! `MenuContext` is the blackboard the state handlers read from and write
//! to: the highlighted main-menu line, the staged values of the two adjust
//! pages, the committed configuration, and the actions the service must
//! apply through its ports once the handler returns.

use std::time::Duration;

use log::warn;

use crate::config::{CommittedConfig, OFFSET_MAX_C, OFFSET_MIN_C, SAMPLE_INTERVALS_SECS};

/// Selectable lines on the main menu.
pub const MAIN_MENU_LINES: u8 = 4;

/// Calibration offset step on the Temp Adjust page (°C).
pub const OFFSET_STEP_C: f32 = 0.1;

/// Most actions a single button press can queue.
pub const MAX_ACTIONS: usize = 4;

// ---------------------------------------------------------------------------
// Actions (written by handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Side effects requested by a handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    /// Snapshot the live reading into the held reading.
    CaptureHold,
    /// Restart recording from a fresh sample.
    Restart,
    /// Redraw the page of the current state.
    RedrawMenu,
    /// Back in Normal mode: re-render the active display view.
    ResumeNormalView,
    /// Restart the sampling ticker with a new period.
    RearmSampling(Duration),
    /// Run the shutdown sequence.
    Shutdown,
}

// ---------------------------------------------------------------------------
// MenuContext
// ---------------------------------------------------------------------------

pub struct MenuContext {
    /// Highlighted main-menu line, 1..=[`MAIN_MENU_LINES`].
    pub highlighted: u8,
    /// Temp Adjust value shown to the operator, not yet in effect.
    pub staged_offset_c: f32,
    /// Time Adjust index shown to the operator, not yet in effect.
    pub staged_interval: usize,
    /// Configuration in effect for recording.
    pub config: CommittedConfig,
    actions: heapless::Vec<MenuAction, MAX_ACTIONS>,
}

impl MenuContext {
    pub fn new(config: CommittedConfig) -> Self {
        Self {
            highlighted: 1,
            staged_offset_c: config.calibration_offset_c,
            staged_interval: config.interval_index,
            config,
            actions: heapless::Vec::new(),
        }
    }

    /// Queue an action for the service.
    pub fn push(&mut self, action: MenuAction) {
        if self.actions.push(action).is_err() {
            warn!("menu action list full, dropping {:?}", action);
        }
    }

    /// Hand the queued actions to the caller, leaving the list empty.
    pub fn take_actions(&mut self) -> heapless::Vec<MenuAction, MAX_ACTIONS> {
        core::mem::take(&mut self.actions)
    }

    pub fn pending_actions(&self) -> &[MenuAction] {
        &self.actions
    }

    /// Move the main-menu highlight by one line, wrapping at both ends.
    pub fn move_highlight(&mut self, down: bool) {
        self.highlighted = if down {
            if self.highlighted >= MAIN_MENU_LINES {
                1
            } else {
                self.highlighted + 1
            }
        } else if self.highlighted <= 1 {
            MAIN_MENU_LINES
        } else {
            self.highlighted - 1
        };
    }

    /// Raise the staged offset by one step unless it is at the top.
    pub fn raise_offset(&mut self) {
        if self.staged_offset_c < OFFSET_MAX_C {
            self.staged_offset_c = step_offset(self.staged_offset_c, OFFSET_STEP_C);
        }
    }

    /// Lower the staged offset by one step unless it is at the bottom.
    pub fn lower_offset(&mut self) {
        if self.staged_offset_c > OFFSET_MIN_C {
            self.staged_offset_c = step_offset(self.staged_offset_c, -OFFSET_STEP_C);
        }
    }

    pub fn next_interval(&mut self) {
        self.staged_interval = (self.staged_interval + 1).min(SAMPLE_INTERVALS_SECS.len() - 1);
    }

    pub fn prev_interval(&mut self) {
        self.staged_interval = self.staged_interval.saturating_sub(1);
    }

    /// Staged interval in seconds.
    pub fn staged_interval_secs(&self) -> u32 {
        SAMPLE_INTERVALS_SECS[self.staged_interval.min(SAMPLE_INTERVALS_SECS.len() - 1)]
    }
}

/// Add exactly `delta` to `value` and clamp to the offset range.  The sum
/// is rounded to thousandths so repeated steps do not drift, and anything
/// within 0.001 of zero becomes exactly zero.
pub fn step_offset(value: f32, delta: f32) -> f32 {
    let stepped = ((value + delta) * 1000.0).round() / 1000.0;
    let clamped = stepped.clamp(OFFSET_MIN_C, OFFSET_MAX_C);
    if clamped.abs() < 0.001 { 0.0 } else { clamped }
}
