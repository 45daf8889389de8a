//! RP2040 HAL implementation for Digitimer
//!
//! Implements the `digitimer-hal` traits on top of `embassy-rp`.
//!
//! - [`gpio`] - Output/input newtypes, open-drain bus lines, segment port
//! - [`flash`] - Byte EEPROM emulated in the last 64KB of flash
//! - [`interrupt`] - Interrupt masking through `cortex-m`
//! - [`pins`] - Board pin map

#![no_std]

pub mod flash;
pub mod gpio;
pub mod interrupt;
pub mod pins;

pub use flash::{rp2040_eeprom, FlashCells, Rp2040Eeprom};
pub use gpio::{GpioInput, GpioOutput, OpenDrain, SegmentPort};
pub use interrupt::CortexMask;
pub use pins::BoardPins;
