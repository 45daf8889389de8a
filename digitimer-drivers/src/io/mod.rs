//! Front-panel I/O: status LED, on/off outputs, buttons

pub mod buttons;
pub mod led;
pub mod switch;

pub use buttons::ActiveLowButtons;
pub use led::RgbLed;
pub use switch::GpioSwitch;
