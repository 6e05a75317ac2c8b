//! Application core: domain logic behind port traits.
//!
//! This module contains the rules of the appliance: event dispatch, menu
//! actions, recording and the display views.  All interaction with the
//! peripherals happens through the **port traits** defined in [`ports`],
//! keeping this layer fully testable without real hardware.

pub mod ports;
pub mod screens;
pub mod service;
