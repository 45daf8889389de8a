//! State machine definition
//!
//! The panel has two modes. The cursor position, the pending update and
//! the latched stop live in [`UiState`] and change only through
//! [`UiState::handle`].

use super::events::Event;
use crate::time::Field;

/// Top-level panel mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Stored time shown, shift starts the countdown
    #[default]
    Normal,
    /// One digit blinks, update increments it
    Edit,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Normal => Mode::Edit,
            Mode::Edit => Mode::Normal,
        }
    }
}

/// What the controller should do for this loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Mode flipped; nothing to draw this iteration
    ModeToggled(Mode),
    /// Run the countdown engine
    StartCountdown,
    /// Edit cursor moved; redraw with this field blanked
    SelectField(Field),
    /// Redraw, then advance and persist this field's digit
    IncrementField(Field),
    /// Show the stop indication in response to a press
    Stop,
    /// Idle in normal mode with no stop latched
    ShowStored,
    /// Idle in normal mode with the stop indication latched
    ShowStopped,
    /// Idle in edit mode
    ShowEditing(Field),
}

impl Action {
    /// Whether this action belongs to the idle path
    pub fn is_idle(&self) -> bool {
        matches!(
            self,
            Action::ShowStored | Action::ShowStopped | Action::ShowEditing(_)
        )
    }
}

/// Panel state owned by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiState {
    mode: Mode,
    /// Field under the edit cursor
    field: Field,
    /// Set by an update press, cleared by shift and by idle
    update: bool,
    /// Latched by a stop press in normal mode, cleared by mode and shift
    stop_pending: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub const fn new() -> Self {
        Self {
            mode: Mode::Normal,
            field: Field::HourTens,
            update: false,
            stop_pending: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn update_pending(&self) -> bool {
        self.update
    }

    pub fn stop_pending(&self) -> bool {
        self.stop_pending
    }

    /// Apply one event and return the action to perform
    pub fn handle(&mut self, event: Event) -> Action {
        use Event::*;
        use Mode::*;

        match (self.mode, event) {
            (_, ModePressed) => {
                self.mode = self.mode.toggled();
                self.stop_pending = false;
                Action::ModeToggled(self.mode)
            }

            (Normal, ShiftStartPressed) => {
                self.update = false;
                self.stop_pending = false;
                self.field = Field::HourTens;
                Action::StartCountdown
            }
            (Edit, ShiftStartPressed) => {
                self.update = false;
                self.stop_pending = false;
                self.field = self.field.next();
                Action::SelectField(self.field)
            }

            (Normal, UpdateStopPressed) => {
                self.stop_pending = true;
                Action::Stop
            }
            (Edit, UpdateStopPressed) => {
                self.update = true;
                Action::IncrementField(self.field)
            }

            (Normal, Idle) => {
                if self.stop_pending {
                    Action::ShowStopped
                } else {
                    Action::ShowStored
                }
            }
            (Edit, Idle) => {
                self.update = false;
                Action::ShowEditing(self.field)
            }
        }
    }
}
