//! Two-wire bus abstractions
//!
//! Models a master-mode serial port at the register level: the caller
//! requests a bus operation, then polls a completion flag and clears it.
//! The byte-level protocol built on top lives in `digitimer-drivers`.

/// Acknowledgment bit sampled after a byte transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ack {
    /// The addressed device pulled SDA low
    Acknowledged,
    /// SDA stayed high (device absent, busy or done)
    NotAcknowledged,
}

impl Ack {
    /// Build from the sampled SDA level during the ninth clock
    pub fn from_sda_level(high: bool) -> Self {
        if high {
            Ack::NotAcknowledged
        } else {
            Ack::Acknowledged
        }
    }

    pub fn is_ack(self) -> bool {
        self == Ack::Acknowledged
    }
}

/// Bus operations a master controller can be asked to perform
///
/// Byte transmission is requested through [`TwoWireController::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusOp {
    /// Start condition (SDA falls while SCL high)
    Start,
    /// Repeated start without an intervening stop
    Restart,
    /// Stop condition (SDA rises while SCL high)
    Stop,
    /// Clock in one byte from the addressed device
    Receive,
    /// Acknowledge the byte just received
    SendAck,
    /// Refuse the byte just received (ends a read)
    SendNack,
}

/// Two-wire master peripheral, register level
///
/// All operations only *request* work. Completion is reported through
/// [`is_complete`](Self::is_complete) and must be cleared by the caller
/// before the next request, mirroring the interrupt flag of an MSSP-style
/// peripheral.
pub trait TwoWireController {
    /// Put the peripheral in master mode at the configured clock
    fn configure(&mut self, config: &I2cConfig);

    /// Request a bus condition or acknowledgment sequence
    fn issue(&mut self, op: BusOp);

    /// Load a byte into the transmit buffer, starting its transfer
    fn load(&mut self, byte: u8);

    /// Completion flag for the last requested operation
    fn is_complete(&self) -> bool;

    /// Clear the completion flag
    fn clear_complete(&mut self);

    /// Acknowledgment sampled during the last byte transmission
    fn ack_status(&self) -> Ack;

    /// Byte captured by the last receive
    fn received(&self) -> u8;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Peripheral input clock in Hz (used to derive the baud reload value)
    pub input_clock: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz) from a 64 MHz input clock
    pub const STANDARD: Self = Self {
        frequency: 100_000,
        input_clock: 64_000_000,
    };

    /// Fast mode (400 kHz) from a 64 MHz input clock
    pub const FAST: Self = Self {
        frequency: 400_000,
        input_clock: 64_000_000,
    };

    /// Baud reload value for a master clock of `input / (4 * (n + 1))`
    ///
    /// Saturates to the 8-bit register range.
    pub fn baud_divider(&self) -> u8 {
        let per_bit = 4 * self.frequency.max(1);
        let divider = (self.input_clock / per_bit).saturating_sub(1);
        divider.min(u8::MAX as u32) as u8
    }

    /// Half of one SCL period in nanoseconds, for bit-banged timing
    ///
    /// Taken from the clock the baud divider actually produces, so a
    /// saturated divider slows the bit-banged bus the same way.
    pub fn half_period_ns(&self) -> u32 {
        let ticks = 2 * (self.baud_divider() as u64 + 1);
        let ns = ticks * 1_000_000_000 / self.input_clock.max(1) as u64;
        ns.min(u32::MAX as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_divider_at_64mhz() {
        assert_eq!(I2cConfig::STANDARD.baud_divider(), 159);
    }

    #[test]
    fn test_fast_divider_at_64mhz() {
        assert_eq!(I2cConfig::FAST.baud_divider(), 39);
    }

    #[test]
    fn test_divider_saturates() {
        let config = I2cConfig {
            frequency: 1_000,
            input_clock: 64_000_000,
        };
        assert_eq!(config.baud_divider(), 255);
    }

    #[test]
    fn test_half_period() {
        assert_eq!(I2cConfig::STANDARD.half_period_ns(), 5_000);
        assert_eq!(I2cConfig::FAST.half_period_ns(), 1_250);
    }

    #[test]
    fn test_half_period_follows_saturated_divider() {
        // 1 kHz needs a divider of 15999; the register caps it at 255
        let config = I2cConfig {
            frequency: 1_000,
            input_clock: 64_000_000,
        };
        assert_eq!(config.half_period_ns(), 8_000);
    }

    #[test]
    fn test_ack_from_level() {
        assert_eq!(Ack::from_sda_level(false), Ack::Acknowledged);
        assert_eq!(Ack::from_sda_level(true), Ack::NotAcknowledged);
        assert!(Ack::Acknowledged.is_ack());
    }
}
