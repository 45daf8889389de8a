//! Simple output devices: status LED, buzzer, load relay

/// Status LED colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Idle in normal mode, stopped, time up
    Red,
    /// Countdown running
    Green,
    /// Edit mode
    Blue,
}

/// Tri-colour status indicator
pub trait StatusLed {
    /// Light exactly one colour
    fn show(&mut self, color: Color);

    /// Turn every colour off
    fn off(&mut self);

    /// Colour currently lit, if any
    fn color(&self) -> Option<Color>;
}

/// An on/off output (buzzer, load relay)
pub trait Actuator {
    /// Set the logical state (true = active)
    fn set_active(&mut self, active: bool);

    /// Get current logical state
    fn is_active(&self) -> bool;
}
