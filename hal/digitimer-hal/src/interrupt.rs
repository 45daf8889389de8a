//! Global interrupt masking

/// Runs a closure with global interrupts disabled
///
/// The firmware does not use interrupts for timing, but the EEPROM unlock
/// sequence must not be split by one.
pub trait InterruptMask {
    fn free<R>(&mut self, f: impl FnOnce() -> R) -> R;
}
