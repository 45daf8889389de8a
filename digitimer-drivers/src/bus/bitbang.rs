//! Bit-banged two-wire controller
//!
//! Drives SDA and SCL as open-drain lines: `set_high` releases a line,
//! `set_low` pulls it down. Each requested operation runs to completion
//! inside the call and then raises the completion flag, so the bus driver
//! sees the same request/poll/clear contract as with a hardware port.
//!
//! A target may hold SCL low to stretch the clock. The stretch wait is
//! bounded by its own [`RetryPolicy`]; when it runs out the operation is
//! abandoned and the completion flag stays down.

use digitimer_hal::{Ack, BusOp, I2cConfig, IoPin, RetryPolicy, TwoWireController};
use embedded_hal::delay::DelayNs;

/// Two-wire master on a pair of GPIO lines
pub struct BitBangController<SDA, SCL, D> {
    sda: SDA,
    scl: SCL,
    delay: D,
    half_period_ns: u32,
    stretch: RetryPolicy,
    complete: bool,
    ack: Ack,
    rx: u8,
}

impl<SDA: IoPin, SCL: IoPin, D: DelayNs> BitBangController<SDA, SCL, D> {
    /// Create a controller with both lines released
    pub fn new(mut sda: SDA, mut scl: SCL, delay: D, stretch: RetryPolicy) -> Self {
        sda.set_high();
        scl.set_high();
        Self {
            sda,
            scl,
            delay,
            half_period_ns: I2cConfig::STANDARD.half_period_ns(),
            stretch,
            complete: false,
            ack: Ack::NotAcknowledged,
            rx: 0,
        }
    }

    /// Give the pins back
    pub fn release(self) -> (SDA, SCL, D) {
        (self.sda, self.scl, self.delay)
    }

    fn half(&mut self) {
        self.delay.delay_ns(self.half_period_ns);
    }

    /// Release SCL and wait for it to actually read high
    fn scl_high(&mut self) -> bool {
        self.scl.set_high();
        let scl = &self.scl;
        self.stretch.spin_until(|| scl.is_high()).is_ok()
    }

    /// One clock pulse with SDA already set up; returns SDA sampled while
    /// SCL was high
    fn clock(&mut self) -> Option<bool> {
        self.half();
        if !self.scl_high() {
            return None;
        }
        let level = self.sda.is_high();
        self.half();
        self.scl.set_low();
        Some(level)
    }

    fn start(&mut self) -> bool {
        self.sda.set_high();
        if !self.scl_high() {
            return false;
        }
        self.half();
        self.sda.set_low();
        self.half();
        self.scl.set_low();
        true
    }

    fn restart(&mut self) -> bool {
        self.sda.set_high();
        self.half();
        self.start()
    }

    fn stop(&mut self) -> bool {
        self.sda.set_low();
        self.half();
        if !self.scl_high() {
            return false;
        }
        self.half();
        self.sda.set_high();
        self.half();
        true
    }

    fn transmit(&mut self, byte: u8) -> bool {
        for bit in (0..8).rev() {
            self.sda.set_state(byte & (1 << bit) != 0);
            if self.clock().is_none() {
                return false;
            }
        }

        self.sda.set_high();
        match self.clock() {
            Some(level) => {
                self.ack = Ack::from_sda_level(level);
                true
            }
            None => false,
        }
    }

    fn receive(&mut self) -> bool {
        self.sda.set_high();
        let mut byte = 0u8;
        for _ in 0..8 {
            match self.clock() {
                Some(level) => byte = (byte << 1) | level as u8,
                None => return false,
            }
        }
        self.rx = byte;
        true
    }

    fn acknowledge(&mut self, nack: bool) -> bool {
        self.sda.set_state(nack);
        let done = self.clock().is_some();
        self.sda.set_high();
        done
    }
}

impl<SDA: IoPin, SCL: IoPin, D: DelayNs> TwoWireController for BitBangController<SDA, SCL, D> {
    fn configure(&mut self, config: &I2cConfig) {
        self.half_period_ns = config.half_period_ns();
        self.sda.set_high();
        self.scl.set_high();
        self.complete = false;
    }

    fn issue(&mut self, op: BusOp) {
        self.complete = match op {
            BusOp::Start => self.start(),
            BusOp::Restart => self.restart(),
            BusOp::Stop => self.stop(),
            BusOp::Receive => self.receive(),
            BusOp::SendAck => self.acknowledge(false),
            BusOp::SendNack => self.acknowledge(true),
        };
    }

    fn load(&mut self, byte: u8) {
        self.complete = self.transmit(byte);
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn clear_complete(&mut self) {
        self.complete = false;
    }

    fn ack_status(&self) -> Ack {
        self.ack
    }

    fn received(&self) -> u8 {
        self.rx
    }
}
