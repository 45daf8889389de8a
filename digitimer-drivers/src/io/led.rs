//! Tri-colour status LED, common anode
//!
//! Each cathode is a GPIO: low lights the colour, high turns it off.

use digitimer_core::traits::{Color, StatusLed};
use digitimer_hal::OutputPin;

pub struct RgbLed<P> {
    red: P,
    green: P,
    blue: P,
    lit: Option<Color>,
}

impl<P: OutputPin> RgbLed<P> {
    /// Create the LED with every colour off
    pub fn new(red: P, green: P, blue: P) -> Self {
        let mut led = Self {
            red,
            green,
            blue,
            lit: None,
        };
        led.off();
        led
    }
}

impl<P: OutputPin> StatusLed for RgbLed<P> {
    fn show(&mut self, color: Color) {
        self.red.set_state(color != Color::Red);
        self.green.set_state(color != Color::Green);
        self.blue.set_state(color != Color::Blue);
        self.lit = Some(color);
    }

    fn off(&mut self) {
        self.red.set_high();
        self.green.set_high();
        self.blue.set_high();
        self.lit = None;
    }

    fn color(&self) -> Option<Color> {
        self.lit
    }
}
