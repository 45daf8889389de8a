//! Multiplexed 4-digit 7-segment array
//!
//! All four digits share one 8-bit segment port. A refresh lights the
//! positions one after another, each for `digit_hold_ms`.

use digitimer_core::time::{Field, TimeValue};
use digitimer_core::traits::SegmentDisplay;
use digitimer_hal::{OutputPin, OutputPort};
use embedded_hal::delay::DelayNs;

/// Segment patterns for 0-9, bit 0 = segment a
pub const SEGMENTS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Decimal point segment
pub const DOT: u8 = 0x80;

/// Pattern for one digit; anything above 9 renders blank
pub fn pattern(digit: u8, dot: bool) -> u8 {
    let base = SEGMENTS.get(digit as usize).copied().unwrap_or(0);
    if dot {
        base | DOT
    } else {
        base
    }
}

/// Segment port plus one enable line per digit
pub struct MultiplexedSegments<P, E, D> {
    port: P,
    enables: [E; 4],
    delay: D,
    hold_ms: u32,
}

impl<P: OutputPort, E: OutputPin, D: DelayNs> MultiplexedSegments<P, E, D> {
    /// `enables` are ordered most significant digit first
    pub fn new(port: P, enables: [E; 4], delay: D, hold_ms: u32) -> Self {
        let mut segments = Self {
            port,
            enables,
            delay,
            hold_ms,
        };
        segments.blank();
        segments
    }

    fn show(&mut self, position: usize, pattern: u8) {
        self.enables[position].set_high();
        self.port.write(pattern);
        self.delay.delay_ms(self.hold_ms);
        self.enables[position].set_low();
    }
}

impl<P: OutputPort, E: OutputPin, D: DelayNs> SegmentDisplay for MultiplexedSegments<P, E, D> {
    fn refresh(&mut self, value: &TimeValue, dot: Option<Field>) {
        for field in Field::ALL {
            let bits = pattern(value.get(field), dot == Some(field));
            self.show(field.position(), bits);
        }
    }

    fn strobe(&mut self, field: Field, pattern: u8) {
        self.show(field.position(), pattern);
    }

    fn blank(&mut self) {
        for enable in self.enables.iter_mut() {
            enable.set_low();
        }
        self.port.write(0);
    }
}
