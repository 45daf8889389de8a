//! Character LCD behind an I2C GPIO-expander backpack
//!
//! The controller runs in 4-bit mode. Every nibble goes out as one
//! expander byte, twice: once with the enable line high, once with it low
//! to latch.
//!
//! # Expander byte
//!
//! | Bit | Line |
//! |-----|------|
//! | 0 | Register select (0 = command, 1 = data) |
//! | 1 | Read/write (held low) |
//! | 2 | Enable |
//! | 3 | Backlight |
//! | 4-7 | Data nibble |

use digitimer_core::config::LcdConfig;
use digitimer_core::traits::{CharacterDisplay, DisplayError};
use digitimer_hal::TwoWireController;
use embedded_hal::delay::DelayNs;

use crate::bus::{BusDriver, BusError};

pub const REGISTER_SELECT: u8 = 0x01;
pub const ENABLE: u8 = 0x04;
pub const BACKLIGHT: u8 = 0x08;

/// HD44780 commands
pub mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    /// Wake-up nibble sent three times during bring-up
    pub const WAKE: u8 = 0x03;
    pub const ENTRY_MODE: u8 = 0x06;
    pub const DISPLAY_ON: u8 = 0x0C;
    pub const SHIFT_LEFT: u8 = 0x18;
    pub const SHIFT_RIGHT: u8 = 0x1C;
    /// 4-bit interface, two lines, 5x8 font
    pub const FUNCTION_SET: u8 = 0x28;
}

/// DDRAM base address of rows 1..=4
const ROW_BASE: [u8; 4] = [0x80, 0xC0, 0x94, 0xD4];

/// Settle after each latched nibble
const NIBBLE_SETTLE_US: u32 = 50;
/// Settle after clear and shift commands
const COMMAND_SETTLE_US: u32 = 40;

impl From<BusError> for DisplayError {
    fn from(_: BusError) -> Self {
        DisplayError::Bus
    }
}

/// Cursor command for a 1-based position
///
/// Rows outside 1..=4 address row 1.
pub fn cursor_command(row: u8, col: u8) -> u8 {
    let base = match row {
        2 => ROW_BASE[1],
        3 => ROW_BASE[2],
        4 => ROW_BASE[3],
        _ => ROW_BASE[0],
    };
    base.wrapping_add(col).wrapping_sub(1)
}

/// Expander-backed HD44780 LCD
pub struct ExpanderLcd<C, D> {
    bus: BusDriver<C>,
    delay: D,
    address: u8,
    backlight: bool,
}

impl<C: TwoWireController, D: DelayNs> ExpanderLcd<C, D> {
    pub fn new(bus: BusDriver<C>, delay: D, config: &LcdConfig) -> Self {
        Self {
            bus,
            delay,
            address: config.address,
            backlight: config.backlight,
        }
    }

    pub fn bus(&self) -> &BusDriver<C> {
        &self.bus
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// One expander byte with the backlight bit applied
    fn expander_write(&mut self, data: u8) -> Result<(), DisplayError> {
        let light = if self.backlight { BACKLIGHT } else { 0 };
        self.bus.write(self.address, &[data | light])?;
        Ok(())
    }

    /// Latch one nibble (upper four bits of `nibble`)
    fn write_nibble(&mut self, nibble: u8) -> Result<(), DisplayError> {
        self.expander_write(nibble | ENABLE)?;
        self.expander_write(nibble & !ENABLE)?;
        self.delay.delay_us(NIBBLE_SETTLE_US);
        Ok(())
    }

    fn send(&mut self, byte: u8, rs: u8) -> Result<(), DisplayError> {
        self.write_nibble((byte & 0xF0) | rs)?;
        self.write_nibble(((byte << 4) & 0xF0) | rs)
    }

    pub fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.send(command, 0)
    }

    fn settled_command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.command(command)?;
        self.delay.delay_us(COMMAND_SETTLE_US);
        Ok(())
    }

    pub fn shift_left(&mut self) -> Result<(), DisplayError> {
        self.settled_command(cmd::SHIFT_LEFT)
    }

    pub fn shift_right(&mut self) -> Result<(), DisplayError> {
        self.settled_command(cmd::SHIFT_RIGHT)
    }
}

impl<C: TwoWireController, D: DelayNs> CharacterDisplay for ExpanderLcd<C, D> {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.expander_write(0x00)?;
        self.delay.delay_ms(30);

        for _ in 0..3 {
            self.command(cmd::WAKE)?;
            self.delay.delay_ms(5);
        }
        self.command(cmd::RETURN_HOME)?;
        self.delay.delay_ms(5);

        for command in [cmd::FUNCTION_SET, cmd::DISPLAY_ON, cmd::CLEAR, cmd::ENTRY_MODE] {
            self.command(command)?;
            self.delay.delay_ms(50);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.settled_command(cmd::CLEAR)
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        self.command(cursor_command(row, col))
    }

    fn write_char(&mut self, ch: u8) -> Result<(), DisplayError> {
        self.send(ch, REGISTER_SELECT)
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        self.expander_write(0x00)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digitimer_hal::{Ack, BusOp, I2cConfig, RetryPolicy};

    /// Controller that completes instantly and groups loaded bytes by
    /// transaction
    #[derive(Default)]
    struct RecordingController {
        transactions: Vec<Vec<u8>>,
        complete: bool,
        stuck: bool,
    }

    impl TwoWireController for RecordingController {
        fn configure(&mut self, _config: &I2cConfig) {}

        fn issue(&mut self, op: BusOp) {
            if op == BusOp::Start {
                self.transactions.push(Vec::new());
            }
            self.complete = !self.stuck;
        }

        fn load(&mut self, byte: u8) {
            if let Some(t) = self.transactions.last_mut() {
                t.push(byte);
            }
            self.complete = !self.stuck;
        }

        fn is_complete(&self) -> bool {
            self.complete
        }

        fn clear_complete(&mut self) {
            self.complete = false;
        }

        fn ack_status(&self) -> Ack {
            Ack::Acknowledged
        }

        fn received(&self) -> u8 {
            0
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    fn lcd() -> ExpanderLcd<RecordingController, CountingDelay> {
        lcd_with(RetryPolicy::Forever)
    }

    fn lcd_with(retry: RetryPolicy) -> ExpanderLcd<RecordingController, CountingDelay> {
        let bus = BusDriver::new(RecordingController::default(), &I2cConfig::STANDARD, retry);
        ExpanderLcd::new(bus, CountingDelay::default(), &LcdConfig::default())
    }

    /// Payload byte of every transaction (after the address byte)
    fn payloads(lcd: &ExpanderLcd<RecordingController, CountingDelay>) -> Vec<u8> {
        lcd.bus()
            .controller()
            .transactions
            .iter()
            .map(|t| {
                assert_eq!(t.len(), 2);
                assert_eq!(t[0], 0x38 << 1);
                t[1]
            })
            .collect()
    }

    #[test]
    fn test_char_framing() {
        let mut lcd = lcd();
        lcd.write_char(b'A').unwrap();

        // 'A' = 0x41: high nibble 0x40, low nibble 0x10, RS and backlight set
        assert_eq!(payloads(&lcd), vec![0x4D, 0x49, 0x1D, 0x19]);
        assert_eq!(lcd.delay.total_ns, 2 * 50_000);
    }

    #[test]
    fn test_command_framing_without_backlight() {
        let mut lcd = lcd();
        lcd.set_backlight(false).unwrap();
        lcd.command(cmd::DISPLAY_ON).unwrap();

        assert_eq!(payloads(&lcd), vec![0x00, 0x04, 0x00, 0xC4, 0xC0]);
        assert!(!lcd.backlight());
    }

    #[test]
    fn test_backlight_on_pushes_bare_write() {
        let mut lcd = lcd();
        lcd.set_backlight(true).unwrap();
        assert_eq!(payloads(&lcd), vec![BACKLIGHT]);
    }

    #[test]
    fn test_cursor_rows() {
        assert_eq!(cursor_command(1, 1), 0x80);
        assert_eq!(cursor_command(1, 6), 0x85);
        assert_eq!(cursor_command(2, 1), 0xC0);
        assert_eq!(cursor_command(3, 1), 0x94);
        assert_eq!(cursor_command(4, 20), 0xE7);
    }

    #[test]
    fn test_out_of_range_row_aliases_row_one() {
        assert_eq!(cursor_command(0, 7), cursor_command(1, 7));
        assert_eq!(cursor_command(5, 7), cursor_command(1, 7));
        assert_eq!(cursor_command(200, 1), 0x80);
    }

    #[test]
    fn test_set_cursor_sends_command() {
        let mut lcd = lcd();
        lcd.set_cursor(2, 3).unwrap();
        // 0xC2: nibbles 0xC0 then 0x20, RS clear
        assert_eq!(payloads(&lcd), vec![0xCC, 0xC8, 0x2C, 0x28]);
    }

    #[test]
    fn test_init_sequence() {
        let mut lcd = lcd();
        lcd.init().unwrap();

        let p = payloads(&lcd);
        // One bare write then 8 commands of 4 bytes each
        assert_eq!(p.len(), 1 + 8 * 4);
        assert_eq!(p[0], BACKLIGHT);

        let commands: Vec<u8> = p[1..]
            .chunks(4)
            .map(|c| (c[0] & 0xF0) | (c[2] >> 4))
            .collect();
        assert_eq!(commands, vec![0x03, 0x03, 0x03, 0x02, 0x28, 0x0C, 0x01, 0x06]);

        // 30 + 3*5 + 5 + 4*50 ms plus 16 nibble settles
        assert_eq!(lcd.delay.total_ns, 250_000_000 + 16 * 50_000);
    }

    #[test]
    fn test_clear_and_shift_settle() {
        let mut lcd = lcd();
        lcd.clear().unwrap();
        lcd.shift_left().unwrap();
        lcd.shift_right().unwrap();

        let p = payloads(&lcd);
        let commands: Vec<u8> = p.chunks(4).map(|c| (c[0] & 0xF0) | (c[2] >> 4)).collect();
        assert_eq!(commands, vec![0x01, 0x18, 0x1C]);
        assert_eq!(lcd.delay.total_ns, 3 * (2 * 50_000 + 40_000));
    }

    #[test]
    fn test_write_str() {
        let mut lcd = lcd();
        lcd.write_str("OVER").unwrap();
        assert_eq!(payloads(&lcd).len(), 16);
    }

    #[test]
    fn test_bus_timeout_maps_to_display_error() {
        let mut lcd = lcd_with(RetryPolicy::Attempts(3));
        lcd.bus.controller_mut().stuck = true;

        assert_eq!(lcd.write_char(b'x'), Err(DisplayError::Bus));
    }
}
