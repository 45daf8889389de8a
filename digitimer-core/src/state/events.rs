//! Events that drive the mode state machine

use crate::traits::{Button, ButtonSample};

/// One loop iteration's worth of input
///
/// Buttons are mutually exclusive by priority: mode, then shift/start,
/// then update/stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Mode toggle button held
    ModePressed,
    /// Shift/start button held
    ShiftStartPressed,
    /// Update/stop button held
    UpdateStopPressed,
    /// Nothing held
    Idle,
}

impl Event {
    /// Reduce a sample to the highest-priority event
    pub fn from_sample(sample: &ButtonSample) -> Self {
        match sample.pressed() {
            Some(Button::Mode) => Event::ModePressed,
            Some(Button::ShiftStart) => Event::ShiftStartPressed,
            Some(Button::UpdateStop) => Event::UpdateStopPressed,
            None => Event::Idle,
        }
    }

    /// Whether a button is behind this event (key click)
    pub fn is_press(&self) -> bool {
        !matches!(self, Event::Idle)
    }
}
