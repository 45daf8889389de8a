//! Front-panel buttons

/// The three front-panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Toggles normal/edit mode
    Mode,
    /// Starts the countdown (normal) or moves the edit cursor (edit)
    ShiftStart,
    /// Increments the edited digit (edit), stops (normal), cancels a countdown
    UpdateStop,
}

/// One sample of all buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSample {
    pub mode: bool,
    pub shift_start: bool,
    pub update_stop: bool,
}

impl ButtonSample {
    /// Highest priority button held in this sample
    pub fn pressed(&self) -> Option<Button> {
        if self.mode {
            Some(Button::Mode)
        } else if self.shift_start {
            Some(Button::ShiftStart)
        } else if self.update_stop {
            Some(Button::UpdateStop)
        } else {
            None
        }
    }
}

/// Button sampling
///
/// Levels are read as-is, without debounce.
pub trait ButtonInput {
    /// Whether `button` is held right now
    fn is_pressed(&mut self, button: Button) -> bool;

    /// Read all three buttons
    fn sample(&mut self) -> ButtonSample {
        ButtonSample {
            mode: self.is_pressed(Button::Mode),
            shift_start: self.is_pressed(Button::ShiftStart),
            update_stop: self.is_pressed(Button::UpdateStop),
        }
    }
}
