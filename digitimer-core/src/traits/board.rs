//! Device bundle
//!
//! The engine and the controller take the whole front panel by `&mut`,
//! so exactly one routine owns the bus, the store and the outputs at any
//! time.

use embedded_hal::delay::DelayNs;

use super::{Actuator, ButtonInput, CharacterDisplay, DigitStore, SegmentDisplay, StatusLed};

/// Every device the timer drives
pub trait Board {
    type Lcd: CharacterDisplay;
    type Segments: SegmentDisplay;
    type Led: StatusLed;
    type Buzzer: Actuator;
    type Load: Actuator;
    type Store: DigitStore;
    type Buttons: ButtonInput;
    type Delay: DelayNs;

    fn lcd(&mut self) -> &mut Self::Lcd;
    fn segments(&mut self) -> &mut Self::Segments;
    fn status_led(&mut self) -> &mut Self::Led;
    fn buzzer(&mut self) -> &mut Self::Buzzer;
    fn load(&mut self) -> &mut Self::Load;
    fn store(&mut self) -> &mut Self::Store;
    fn buttons(&mut self) -> &mut Self::Buttons;
    fn delay(&mut self) -> &mut Self::Delay;
}
