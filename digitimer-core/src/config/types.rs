//! Configuration type definitions

use digitimer_hal::{I2cConfig, RetryPolicy};

use crate::time::Field;

/// Calibrated timing constants
///
/// Every "wait" in the firmware is a blocking delay, so these values are
/// the time base. The refresh counts are platform-specific and should be
/// re-measured when the clock or display wiring changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Time each 7-segment digit stays enabled during a multiplex pass (ms)
    pub digit_hold_ms: u32,
    /// Multiplex frames that make up one logical second
    pub refreshes_per_second: u16,
    /// Logical seconds between two countdown decrements
    pub seconds_per_step: u16,
    /// Frames between two flashes of the second marker
    pub marker_period: u16,
    /// How long the stop indication (00.00) is shown (ms)
    pub stop_hold_ms: u32,
    /// How long the time-up message stays on the LCD (ms)
    pub time_up_hold_ms: u32,
    /// Redraws between two reveals of the field being edited
    pub blink_period: u16,
    /// Blank and reveal hold of the field being edited (ms)
    pub blink_hold_ms: u32,
    /// Pause after a shift press in edit mode (ms)
    pub shift_press_ms: u32,
    /// Settle time after persisting an edited digit (ms)
    pub update_settle_ms: u32,
    /// The redraw counter resets once it passes this value
    pub tick_ceiling: u16,
    /// Buzzer on/off half period of the power-on self test (ms)
    pub self_test_beep_ms: u32,
    /// Pause between the self test and storage initialization (ms)
    pub post_self_test_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            digit_hold_ms: 3,
            // 83 frames * 60 s ~ 4990 frames per minute on the reference board
            refreshes_per_second: 83,
            seconds_per_step: 60,
            marker_period: 79,
            stop_hold_ms: 100,
            time_up_hold_ms: 500,
            blink_period: 6,
            blink_hold_ms: 200,
            shift_press_ms: 100,
            update_settle_ms: 50,
            tick_ceiling: 1000,
            self_test_beep_ms: 500,
            post_self_test_ms: 1000,
        }
    }
}

impl TimingConfig {
    /// Duration of one full multiplex pass over four digits (ms)
    pub fn frame_ms(&self) -> u32 {
        self.digit_hold_ms * 4
    }

    /// Multiplex frames per logical second, at least one
    pub fn second_frames(&self) -> u16 {
        self.refreshes_per_second.max(1)
    }

    /// Logical seconds per countdown decrement, at least one
    pub fn step_seconds(&self) -> u16 {
        self.seconds_per_step.max(1)
    }

    /// Multiplex frames between two countdown decrements
    pub fn frames_per_step(&self) -> u32 {
        self.second_frames() as u32 * self.step_seconds() as u32
    }
}

/// Addresses of the persistent record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoreLayout {
    pub hour_tens: u8,
    pub hour_ones: u8,
    pub minute_tens: u8,
    pub minute_ones: u8,
    /// Address of the "record initialized" marker
    pub sentinel: u8,
    /// Marker value once initialized
    pub sentinel_set: u8,
    /// Settle before the first read at boot (ms)
    pub boot_settle_ms: u32,
    /// Delay between two reads while the cells still read all-zero (ms)
    pub boot_retry_ms: u32,
    /// Settle after every write during initialization (ms)
    pub init_write_settle_ms: u32,
    /// Bound on the all-zero boot polling and on write completion
    pub retry: RetryPolicy,
}

impl Default for StoreLayout {
    fn default() -> Self {
        Self {
            hour_tens: 0x0A,
            hour_ones: 0x0B,
            minute_tens: 0x0C,
            minute_ones: 0x0D,
            sentinel: 0x0F,
            sentinel_set: 0x01,
            boot_settle_ms: 1000,
            boot_retry_ms: 500,
            init_write_settle_ms: 20,
            retry: RetryPolicy::Forever,
        }
    }
}

impl StoreLayout {
    /// Address of one digit field
    pub fn address(&self, field: Field) -> u8 {
        match field {
            Field::HourTens => self.hour_tens,
            Field::HourOnes => self.hour_ones,
            Field::MinuteTens => self.minute_tens,
            Field::MinuteOnes => self.minute_ones,
        }
    }
}

/// Character LCD placement and addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdConfig {
    /// 7-bit address of the GPIO expander backpack
    pub address: u8,
    /// Backlight state after bring-up
    pub backlight: bool,
    /// Row the HH:MM digits are drawn on
    pub time_row: u8,
    /// Columns of the four digits, most significant first
    pub digit_columns: [u8; 4],
    /// Column of the ':' separator
    pub colon_column: u8,
    /// Column of the time-up message
    pub message_column: u8,
    /// Bound on every bus wait
    pub retry: RetryPolicy,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            address: 0x38,
            backlight: true,
            time_row: 1,
            digit_columns: [6, 8, 10, 12],
            colon_column: 9,
            message_column: 7,
            retry: RetryPolicy::Forever,
        }
    }
}

impl LcdConfig {
    pub fn column(&self, field: Field) -> u8 {
        self.digit_columns[field.position()]
    }
}

/// Complete timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    pub timing: TimingConfig,
    pub layout: StoreLayout,
    pub lcd: LcdConfig,
    pub bus: I2cConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_step_matches_reference_calibration() {
        let timing = TimingConfig::default();
        // Reference firmware ran ~4990 frames per minute
        assert_eq!(timing.frames_per_step(), 4980);
        assert_eq!(timing.frame_ms(), 12);
    }

    #[test]
    fn test_zero_counts_clamp_to_one() {
        let timing = TimingConfig {
            refreshes_per_second: 0,
            seconds_per_step: 0,
            ..TimingConfig::default()
        };
        assert_eq!(timing.second_frames(), 1);
        assert_eq!(timing.step_seconds(), 1);
        assert_eq!(timing.frames_per_step(), 1);
    }

    #[test]
    fn test_layout_addresses() {
        let layout = StoreLayout::default();
        assert_eq!(layout.address(Field::HourTens), 0x0A);
        assert_eq!(layout.address(Field::HourOnes), 0x0B);
        assert_eq!(layout.address(Field::MinuteTens), 0x0C);
        assert_eq!(layout.address(Field::MinuteOnes), 0x0D);
        assert_eq!(layout.sentinel, 0x0F);
    }

    #[test]
    fn test_lcd_columns() {
        let lcd = LcdConfig::default();
        assert_eq!(lcd.column(Field::HourTens), 6);
        assert_eq!(lcd.column(Field::MinuteOnes), 12);
        assert_eq!(lcd.address, 0x38);
    }
}
