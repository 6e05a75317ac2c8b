//! GPIO pin assignments (BCM numbering) for the PiTFT 2.8" hat build.
//!
//! Single source of truth: the button watcher and the LED driver reference
//! this module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// PiTFT side buttons (active-low, pulled up, falling-edge interrupts)
// ---------------------------------------------------------------------------

// Button 1 (GPIO 17) is claimed by the gpio-shutdown overlay in config.txt.

/// Button 2: Hold / Up.
pub const BUTTON_2_GPIO: i32 = 22;
/// Button 3: Restart / Down.
pub const BUTTON_3_GPIO: i32 = 23;
/// Button 4: Menu / Select.
pub const BUTTON_4_GPIO: i32 = 27;

// ---------------------------------------------------------------------------
// Activity LED
// ---------------------------------------------------------------------------

/// Free pin on the hat header, toggled on every display tick.
pub const ACTIVITY_LED_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// MAX31855 thermocouple amplifier (software SPI, clear of the PiTFT)
// ---------------------------------------------------------------------------

pub const PROBE_CLK_GPIO: i32 = 5;
pub const PROBE_CS_GPIO: i32 = 6;
pub const PROBE_DO_GPIO: i32 = 16;
