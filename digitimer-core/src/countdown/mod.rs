//! Countdown engine
//!
//! Runs a stored HH:MM value down to 00:00 while multiplexing the
//! 7-segment array, and reports how the run ended.

pub mod engine;
pub mod signal;

pub use engine::{Countdown, Outcome};
