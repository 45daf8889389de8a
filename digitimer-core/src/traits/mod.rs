//! Hardware abstraction traits
//!
//! These traits define the interface between the timer logic and the
//! concrete device drivers.

pub mod board;
pub mod display;
pub mod input;
pub mod output;
pub mod store;

pub use board::Board;
pub use display::{CharacterDisplay, DisplayError, SegmentDisplay};
pub use input::{Button, ButtonInput, ButtonSample};
pub use output::{Actuator, Color, StatusLed};
pub use store::{BootState, DigitStore, StoreError};
