//! Console adapters for running on a development machine.
//!
//! - [`TextDisplay`] draws each [`ScreenSpec`] as a text frame.
//! - [`spawn_input_reader`] turns stdin lines into events, standing in for
//!   the touch panel, the GPIO edge interrupts and the keyboard.
//!
//! Input lines:
//!
//! | Line       | Event                                   |
//! |------------|-----------------------------------------|
//! | `touch`    | `PointerDown`                           |
//! | `gpio <n>` | falling edge on BCM `n` (debounced)     |
//! | `temp <c>` | none; simulated probe now reads `c` °C   |
//! | `unplug`   | none; simulated probe stops answering   |
//! | other      | one `KeyPress` per character            |
//! | EOF        | `Quit`                                  |

use std::io::{BufRead, Write};
use std::path::Path;
use std::thread::JoinHandle;

use log::{debug, info, warn};

use super::time::MonotonicClock;
use crate::app::ports::DisplayPort;
use crate::app::screens::ScreenSpec;
use crate::drivers::button::ButtonWatcher;
use crate::events::{EVENTS, Event, EventQueue};
use crate::sensors::thermocouple;

// ── Display ──────────────────────────────────────────────────

pub struct TextDisplay<W: Write> {
    out: W,
    frames: u64,
}

impl<W: Write> TextDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, screen: &ScreenSpec) -> std::io::Result<()> {
        writeln!(self.out, "{:-<40}", "")?;
        let overlay = screen.overlay.map(|o| o.lines());
        for (i, line) in screen.lines.iter().enumerate() {
            let mark = if screen.highlighted == Some(i) { '>' } else { ' ' };
            let indent = (line.indent / 10) as usize;
            writeln!(self.out, "{} {:indent$}{}", mark, "", line.text, indent = indent)?;
        }
        if let Some(labels) = overlay {
            let joined: Vec<&str> = labels.iter().map(|l| l.text.trim_start()).collect();
            writeln!(self.out, "  [{}]", joined.join(" | "))?;
        }
        self.out.flush()
    }
}

impl<W: Write> DisplayPort for TextDisplay<W> {
    fn render_screen(&mut self, screen: &ScreenSpec) {
        self.frames += 1;
        if let Err(e) = self.draw(screen) {
            warn!("display: frame dropped: {}", e);
        }
    }

    fn render_image(&mut self, path: &Path) {
        self.frames += 1;
        let res = writeln!(self.out, "{:-<40}\n  [graph: {}]", "", path.display())
            .and_then(|_| self.out.flush());
        if let Err(e) = res {
            warn!("display: image dropped: {}", e);
        }
    }

    fn release(&mut self) {
        let _ = self.out.flush();
        info!("display: released after {} frames", self.frames);
    }
}

// ── Input ────────────────────────────────────────────────────

/// Translate one input line into events on `queue`.
pub fn dispatch_line(line: &str, queue: &EventQueue, watcher: &mut ButtonWatcher, now_ms: u64) {
    let line = line.trim();
    if line == "touch" {
        queue.post(Event::PointerDown);
        return;
    }
    if let Some(arg) = line.strip_prefix("gpio ") {
        match arg.trim().parse::<i32>() {
            Ok(gpio) => {
                if let Some(ev) = watcher.on_edge(gpio, now_ms) {
                    queue.post(ev);
                }
            }
            Err(_) => debug!("console: bad gpio line {:?}", line),
        }
        return;
    }
    if let Some(arg) = line.strip_prefix("temp ") {
        match arg.trim().parse::<f32>() {
            Ok(celsius) => {
                thermocouple::sim_set_temp_c(celsius);
                info!("console: probe set to {:.2} C", celsius);
            }
            Err(_) => debug!("console: bad temp line {:?}", line),
        }
        return;
    }
    if line == "unplug" {
        thermocouple::sim_unplug();
        info!("console: probe unplugged");
        return;
    }
    for c in line.chars() {
        queue.post(Event::KeyPress(c));
    }
}

/// Read lines until EOF, then post `Quit`.
pub fn pump_input<R: BufRead>(
    input: R,
    queue: &EventQueue,
    mut watcher: ButtonWatcher,
    clock: MonotonicClock,
) {
    for line in input.lines() {
        match line {
            Ok(line) => dispatch_line(&line, queue, &mut watcher, clock.now_ms()),
            Err(e) => {
                warn!("console: read failed: {}", e);
                break;
            }
        }
    }
    info!("console: end of input");
    queue.post(Event::Quit);
}

/// Read stdin on a dedicated thread, posting into the process-wide queue.
pub fn spawn_input_reader(
    watcher: ButtonWatcher,
    clock: MonotonicClock,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("console".into())
        .spawn(move || pump_input(std::io::stdin().lock(), &EVENTS, watcher, clock))
}
