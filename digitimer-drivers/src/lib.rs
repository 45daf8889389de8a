//! Device driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in digitimer-core, built on the register-level seams of digitimer-hal:
//!
//! - Two-wire bus driver and a bit-banged controller
//! - Expander-backed character LCD
//! - Multiplexed 7-segment array
//! - EEPROM digit store with first-boot detection
//! - Status LED, buzzer/relay switches, front-panel buttons

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod display;
pub mod io;
pub mod store;

pub use bus::{BitBangController, BusDriver, BusError};
pub use display::{ExpanderLcd, MultiplexedSegments};
pub use io::{ActiveLowButtons, GpioSwitch, RgbLed};
pub use store::EepromStore;
