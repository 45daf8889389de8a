//! Digitimer Hardware Abstraction Layer
//!
//! This crate defines the register-level seams between the timer logic and
//! a concrete microcontroller. Everything here is blocking: an operation
//! either completes or spins on a hardware flag, optionally bounded by a
//! [`RetryPolicy`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  digitimer-firmware                     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ digitimer-    │       │ digitimer-    │
//! │ core/drivers  │       │ hal-rp2040    │
//! └───────────────┘       └───────────────┘
//!         │                       │
//!         └───────────┬───────────┘
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  digitimer-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::OutputPort`] - Digital I/O
//! - [`i2c::TwoWireController`] - Two-wire bus master peripheral
//! - [`eeprom::EepromController`] - Byte-addressable non-volatile memory
//! - [`eeprom::CellMap`] - Key-value cells behind [`eeprom::EmulatedEeprom`]
//! - [`interrupt::InterruptMask`] - Global interrupt masking

#![no_std]
#![deny(unsafe_code)]

pub mod eeprom;
pub mod gpio;
pub mod i2c;
pub mod interrupt;
pub mod retry;

// Re-export key traits at crate root for convenience
pub use eeprom::{CellError, CellMap, EepromController, EmulatedEeprom};
pub use gpio::{InputPin, IoPin, OutputPin, OutputPort};
pub use i2c::{Ack, BusOp, I2cConfig, TwoWireController};
pub use interrupt::InterruptMask;
pub use retry::{RetryPolicy, Timeout};
