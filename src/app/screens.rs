//! Screen layouts handed to the [`DisplayPort`](super::ports::DisplayPort).
//!
//! A layout is a list of positioned text lines.  `row` is measured in
//! multiples of the line's text size, so the pixel top of a line is
//! `row * size`.  The side-button overlay is drawn first so menu text can
//! overlap its leading blanks.

use crate::recording::{HeldReading, c_to_f};

/// Monospaced font used for the button overlay (right alignment by padding).
pub const OVERLAY_FONT: &str = "DejaVuSansMono";

/// One positioned line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub row: f32,
    pub size: u16,
    pub indent: u16,
    pub font: Option<&'static str>,
    pub text: String,
}

impl TextLine {
    pub fn new(row: f32, size: u16, indent: u16, text: impl Into<String>) -> Self {
        Self {
            row,
            size,
            indent,
            font: None,
            text: text.into(),
        }
    }
}

/// Labels beside the side buttons, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonOverlay {
    Normal,
    Menu,
}

impl ButtonOverlay {
    pub fn lines(self) -> [TextLine; 4] {
        let (indent, labels) = match self {
            Self::Normal => (
                240,
                [" Shutdown->", "Save/Hold->", "  Restart->", "     Menu->"],
            ),
            Self::Menu => (
                245,
                ["Shutdown->", "      Up->", "    Down->", "  Select->"],
            ),
        };
        let rows = [3.0, 8.0, 13.0, 18.0];
        core::array::from_fn(|i| TextLine {
            font: Some(OVERLAY_FONT),
            ..TextLine::new(rows[i], 12, indent, labels[i])
        })
    }
}

/// A full-screen text layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSpec {
    pub lines: Vec<TextLine>,
    /// Index into `lines` drawn in reverse video.
    pub highlighted: Option<usize>,
    pub overlay: Option<ButtonOverlay>,
}

impl ScreenSpec {
    /// Text of the highlighted line, if any.
    pub fn highlighted_text(&self) -> Option<&str> {
        self.highlighted
            .and_then(|i| self.lines.get(i))
            .map(|l| l.text.as_str())
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn clock_line(elapsed_secs: u32) -> String {
    format!("Time (min:sec) = {}:{:02}", elapsed_secs / 60, elapsed_secs % 60)
}

pub fn splash() -> ScreenSpec {
    ScreenSpec {
        lines: vec![TextLine::new(3.0, 30, 120, "Starting ...")],
        highlighted: None,
        overlay: None,
    }
}

/// Live reading on top, held reading below.
pub fn temperature(live_c: f32, display_secs: u32, held: &HeldReading) -> ScreenSpec {
    let lines = vec![
        TextLine::new(0.0, 28, 0, "Current Temperature"),
        TextLine::new(1.0, 28, 0, format!("{:.1} C", live_c)),
        TextLine::new(2.0, 28, 0, format!("{:.1} F", c_to_f(live_c))),
        TextLine::new(3.0, 28, 0, clock_line(display_secs)),
        TextLine::new(4.6, 28, 0, "Save/Hold Temperature"),
        TextLine::new(5.6, 28, 0, format!("{:.1} C", held.temp_c)),
        TextLine::new(6.6, 28, 0, format!("{:.1} F", held.temp_f)),
        TextLine::new(
            7.6,
            28,
            0,
            format!("Time (min:sec) = {}:{:02}", held.minutes, held.seconds),
        ),
    ];
    ScreenSpec {
        lines,
        highlighted: None,
        overlay: Some(ButtonOverlay::Normal),
    }
}

/// Main menu; `highlighted` is the selectable line, 1..=4.
pub fn main_menu(highlighted: u8) -> ScreenSpec {
    ScreenSpec {
        lines: vec![
            TextLine::new(0.0, 28, 110, "Menu"),
            TextLine::new(2.0, 28, 0, "Adjust Temperature"),
            TextLine::new(3.0, 28, 0, "Adjust Time Interval"),
            TextLine::new(4.0, 28, 0, "Return"),
            TextLine::new(5.0, 28, 0, "Exit"),
        ],
        highlighted: Some(highlighted as usize),
        overlay: Some(ButtonOverlay::Menu),
    }
}

fn adjust_page(title: &str, label: &str, value: String) -> ScreenSpec {
    ScreenSpec {
        lines: vec![
            TextLine::new(0.0, 28, 40, title),
            TextLine::new(2.0, 28, 0, label),
            TextLine::new(4.0, 28, 0, value),
            TextLine::new(14.0, 16, 0, "* Only Affects Ongoing Readings"),
        ],
        highlighted: Some(2),
        overlay: Some(ButtonOverlay::Menu),
    }
}

pub fn temp_adjust(staged_offset_c: f32) -> ScreenSpec {
    adjust_page(
        "Temperature Adjustment*",
        "Adjustment Value (C)",
        format!("{:.1}", staged_offset_c),
    )
}

pub fn time_adjust(staged_interval_secs: u32) -> ScreenSpec {
    adjust_page(
        "Time Interval Selection*",
        "Time Interval (sec)",
        staged_interval_secs.to_string(),
    )
}
