//! GPIO on/off output
//!
//! Buzzer and load relay, driven directly or through a transistor/SSR.

use digitimer_core::traits::Actuator;
use digitimer_hal::OutputPin;

/// On/off output on one GPIO pin
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioSwitch<P> {
    pin: P,
    /// If true, active = pin LOW
    inverted: bool,
    /// Current logical state
    active: bool,
}

impl<P: OutputPin> GpioSwitch<P> {
    /// Create a switch; it starts inactive
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the output is active when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut switch = Self {
            pin,
            inverted,
            active: false,
        };
        switch.set_active(false);
        switch
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin> Actuator for GpioSwitch<P> {
    fn set_active(&mut self, active: bool) {
        self.active = active;
        self.pin.set_state(active != self.inverted);
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
