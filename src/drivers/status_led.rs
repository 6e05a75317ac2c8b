//! Activity LED driver.
//!
//! One LED on a free header pin, blinked on every display tick so the
//! operator can see the appliance is alive.  Generic over an
//! `embedded-hal` output pin; host builds use [`SimPin`](crate::adapters::hardware::SimPin).

use embedded_hal::digital::OutputPin;
use log::warn;

pub struct ActivityLed<P: OutputPin> {
    pin: P,
}

impl<P: OutputPin> ActivityLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn set(&mut self, on: bool) {
        let res = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(e) = res {
            warn!("activity LED: pin write failed: {:?}", e);
        }
    }
}
