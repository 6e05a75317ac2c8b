//! Peripheral drivers and event producers.

pub mod button;
pub mod status_led;
pub mod ticker;
