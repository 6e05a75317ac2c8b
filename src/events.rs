//! Event queue shared by every input source.
//!
//! Events are produced by:
//! - the button watcher (debounced GPIO edges)
//! - the ticker thread (sampling and display timers)
//! - the console reader (keyboard, touch, end of input)
//!
//! Events are consumed by the main loop, which blocks on the queue and
//! handles exactly one event per iteration.  That single consumer is the
//! only code that touches appliance state, so nothing behind the queue
//! needs a lock.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Buttons     │────▶│              │     │              │
//! │ Tickers     │────▶│  EventQueue  │────▶│  Main Loop   │
//! │ Console     │────▶│  (bounded)   │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

/// Maximum number of pending events.
pub const EVENT_QUEUE_CAP: usize = 32;

/// PiTFT side buttons.  Button 1 is reserved for the OS shutdown overlay.
///
/// | Button | Normal mode | Menu mode |
/// |--------|-------------|-----------|
/// | `Two`  | Hold        | Up        |
/// | `Three`| Restart     | Down      |
/// | `Four` | Menu        | Select    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Button {
    Two = 2,
    Three = 3,
    Four = 4,
}

/// Everything the main loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Window closed / end of input: shut down.
    Quit,
    /// Sampling timer fired.
    SampleTick,
    /// Display refresh timer fired.
    DisplayTick,
    /// Debounced side-button press.
    ButtonPress(Button),
    /// Primary touch / click on the screen.
    PointerDown,
    /// Keyboard input, mirrored onto the buttons for bench testing.
    KeyPress(char),
}

/// Bounded multi-producer queue with a single blocking consumer.
pub struct EventQueue {
    channel: Channel<CriticalSectionRawMutex, Event, EVENT_QUEUE_CAP>,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Post an event without blocking.
    /// Returns `false` if the queue is full (event dropped).
    pub fn post(&self, event: Event) -> bool {
        if self.channel.try_send(event).is_err() {
            warn!("event queue full, dropping {:?}", event);
            return false;
        }
        true
    }

    /// Block the calling thread until an event is available.
    pub fn wait(&self) -> Event {
        futures_lite::future::block_on(self.channel.receive())
    }

    /// Pop the next event, if any.
    pub fn try_next(&self) -> Option<Event> {
        self.channel.try_receive().ok()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide queue every producer posts into.
pub static EVENTS: EventQueue = EventQueue::new();
