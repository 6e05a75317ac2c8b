//! Sensor drivers.

pub mod thermocouple;
