//! ovenprobe appliance library.
//!
//! Exposes the domain and adapter modules for the binary and for
//! integration testing.  Everything runs on the host; the peripherals the
//! appliance drives are reached only through [`app::ports`].

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod fsm;
pub mod pins;
pub mod recording;

pub mod adapters;
pub mod drivers;
pub mod sensors;
