//! Configuration types
//!
//! The timer has no configuration file; these are the compile-time
//! tunables, grouped by concern, with defaults calibrated for the
//! reference hardware.

pub mod types;

pub use types::{LcdConfig, StoreLayout, TimerConfig, TimingConfig};
