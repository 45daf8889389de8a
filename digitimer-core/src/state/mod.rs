//! Front-panel mode state machine
//!
//! Maps one button sample per loop iteration onto an [`Action`] for the
//! controller. The machine never touches hardware itself.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{Action, Mode, UiState};
