//! Board-agnostic core logic for the countdown timer firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - HH:MM digit arithmetic with borrow propagation
//! - Device traits bundled behind [`traits::Board`]
//! - Countdown engine with multiplexed refresh and cancellation
//! - Normal/edit mode state machine and the controller that runs it
//! - Timing and layout configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod countdown;
pub mod state;
pub mod tick;
pub mod time;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use controller::{Controller, Fault, Report};
pub use time::{Field, TimeValue};
