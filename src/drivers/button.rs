//! Debounced side-button watcher.
//!
//! ## Hardware
//!
//! Active-low momentary switches on the PiTFT, pulled up, falling-edge
//! interrupts.  Each edge arrives with its GPIO channel and a monotonic
//! timestamp; the watcher maps the channel to a [`Button`], applies a
//! per-button debounce window, and hands back the event to post.
//!
//! | GPIO | Button  |
//! |------|---------|
//! | 22   | `Two`   |
//! | 23   | `Three` |
//! | 27   | `Four`  |
//!
//! Any other channel is ignored.

use log::debug;

use crate::events::{Button, Event};
use crate::pins::{BUTTON_2_GPIO, BUTTON_3_GPIO, BUTTON_4_GPIO};

/// Default minimum gap between accepted presses of one button.
pub const BUTTON_DEBOUNCE_MS: u64 = 300;

/// Accepts an input at most once per window.  The window is measured from
/// the last *accepted* input, so chatter inside it never extends it.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    window_ms: u64,
    last_accepted: Option<u64>,
}

impl Debouncer {
    /// A debouncer that accepts its first input.
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_accepted: None,
        }
    }

    /// A debouncer whose window is already running from `now_ms`.
    pub fn armed(window_ms: u64, now_ms: u64) -> Self {
        Self {
            window_ms,
            last_accepted: Some(now_ms),
        }
    }

    /// Returns `true` if an input at `now_ms` should be accepted.
    pub fn accept(&mut self, now_ms: u64) -> bool {
        match self.last_accepted {
            Some(last) if now_ms.saturating_sub(last) < self.window_ms => false,
            _ => {
                self.last_accepted = Some(now_ms);
                true
            }
        }
    }
}

/// GPIO channel to button.
pub fn button_for_gpio(gpio: i32) -> Option<Button> {
    match gpio {
        BUTTON_2_GPIO => Some(Button::Two),
        BUTTON_3_GPIO => Some(Button::Three),
        BUTTON_4_GPIO => Some(Button::Four),
        _ => None,
    }
}

pub struct ButtonWatcher {
    debounce: [Debouncer; 3],
}

impl ButtonWatcher {
    pub fn new(window_ms: u64) -> Self {
        Self {
            debounce: [Debouncer::new(window_ms); 3],
        }
    }

    /// Classify a falling edge.  Returns the event to post, if any.
    pub fn on_edge(&mut self, gpio: i32, now_ms: u64) -> Option<Event> {
        let Some(button) = button_for_gpio(gpio) else {
            debug!("edge on unmapped GPIO {} ignored", gpio);
            return None;
        };
        let slot = match button {
            Button::Two => 0,
            Button::Three => 1,
            Button::Four => 2,
        };
        if !self.debounce[slot].accept(now_ms) {
            debug!("{:?} bounce at {} ms suppressed", button, now_ms);
            return None;
        }
        Some(Event::ButtonPress(button))
    }
}

impl Default for ButtonWatcher {
    fn default() -> Self {
        Self::new(BUTTON_DEBOUNCE_MS)
    }
}
