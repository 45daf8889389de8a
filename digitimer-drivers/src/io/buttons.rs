//! Front-panel buttons wired to ground with pull-ups

use digitimer_core::traits::{Button, ButtonInput};
use digitimer_hal::InputPin;

/// Three buttons that read low while pressed
pub struct ActiveLowButtons<P> {
    mode: P,
    shift_start: P,
    update_stop: P,
}

impl<P: InputPin> ActiveLowButtons<P> {
    pub fn new(mode: P, shift_start: P, update_stop: P) -> Self {
        Self {
            mode,
            shift_start,
            update_stop,
        }
    }
}

impl<P: InputPin> ButtonInput for ActiveLowButtons<P> {
    fn is_pressed(&mut self, button: Button) -> bool {
        match button {
            Button::Mode => self.mode.is_low(),
            Button::ShiftStart => self.shift_start.is_low(),
            Button::UpdateStop => self.update_stop.is_low(),
        }
    }
}
