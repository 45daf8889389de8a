//! GPIO implementations on `embassy-rp`

use digitimer_hal::{InputPin, OutputPin, OutputPort};
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};

/// Push-pull output
pub struct GpioOutput<'d>(Output<'d>);

impl<'d> GpioOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }
}

impl OutputPin for GpioOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Plain input
pub struct GpioInput<'d>(Input<'d>);

impl<'d> GpioInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }
}

impl InputPin for GpioInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Open-drain line emulated on a bidirectional pin
///
/// The output latch stays low. Released means the pin is an input and the
/// pull-up (internal plus any external resistor) takes the line high.
pub struct OpenDrain<'d> {
    pin: Flex<'d>,
    released: bool,
}

impl<'d> OpenDrain<'d> {
    /// Take the pin and release the line
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::Up);
        pin.set_low();
        pin.set_as_input();
        Self {
            pin,
            released: true,
        }
    }
}

impl OutputPin for OpenDrain<'_> {
    fn set_high(&mut self) {
        self.pin.set_as_input();
        self.released = true;
    }

    fn set_low(&mut self) {
        self.pin.set_as_output();
        self.released = false;
    }

    fn is_set_high(&self) -> bool {
        self.released
    }
}

impl InputPin for OpenDrain<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// Eight outputs written as one byte, bit 0 on the first pin
pub struct SegmentPort<'d> {
    lines: [Output<'d>; 8],
    value: u8,
}

impl<'d> SegmentPort<'d> {
    pub fn new(lines: [Output<'d>; 8]) -> Self {
        let mut port = Self { lines, value: 0 };
        port.write(0);
        port
    }
}

impl OutputPort for SegmentPort<'_> {
    fn write(&mut self, value: u8) {
        for (bit, line) in self.lines.iter_mut().enumerate() {
            let level = if value & (1 << bit) != 0 {
                Level::High
            } else {
                Level::Low
            };
            line.set_level(level);
        }
        self.value = value;
    }

    fn value(&self) -> u8 {
        self.value
    }
}
