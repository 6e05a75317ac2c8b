//! Which Normal-mode view is on screen, and the display clock.

/// The two Normal-mode views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Temperature,
    Graph,
}

/// View selection plus the seconds counter shown on the temperature screen.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    mode: DisplayMode,
    display_secs: u32,
    /// Last successful live reading (°C, calibrated).
    live_c: f32,
}

impl DisplayState {
    pub fn new(live_c: f32) -> Self {
        Self {
            live_c,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Flip the view and return the new one.
    pub fn toggle(&mut self) -> DisplayMode {
        self.mode = match self.mode {
            DisplayMode::Temperature => DisplayMode::Graph,
            DisplayMode::Graph => DisplayMode::Temperature,
        };
        self.mode
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    /// Advance the display clock by one refresh period.
    pub fn advance(&mut self, refresh_secs: u32) {
        self.display_secs = self.display_secs.saturating_add(refresh_secs);
    }

    pub fn display_secs(&self) -> u32 {
        self.display_secs
    }

    pub fn reset_clock(&mut self) {
        self.display_secs = 0;
    }

    pub fn live_c(&self) -> f32 {
        self.live_c
    }

    pub fn set_live(&mut self, temp_c: f32) {
        self.live_c = temp_c;
    }
}
