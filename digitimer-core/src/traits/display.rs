//! Display traits for the character LCD and the 7-segment array

use crate::time::{Field, TimeValue};

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The bus never reported completion within the retry budget
    Bus,
}

/// Character LCD (HD44780-style controller)
///
/// Rows and columns are 1-based, as printed on the module.
pub trait CharacterDisplay {
    /// Run the controller bring-up sequence
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Clear the screen and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError>;

    /// Write one character code at the cursor
    fn write_char(&mut self, ch: u8) -> Result<(), DisplayError>;

    /// Switch the backlight
    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Write a string, one character at a time
    fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        for byte in text.bytes() {
            self.write_char(byte)?;
        }
        Ok(())
    }

    /// Place a single character
    fn print_at(&mut self, row: u8, col: u8, ch: u8) -> Result<(), DisplayError> {
        self.set_cursor(row, col)?;
        self.write_char(ch)
    }
}

/// Multiplexed 4-digit 7-segment array
pub trait SegmentDisplay {
    /// One multiplex pass over all four positions
    ///
    /// `dot` lights the decimal point after that field's digit.
    fn refresh(&mut self, value: &TimeValue, dot: Option<Field>);

    /// Light one position with a raw segment pattern for one hold interval
    fn strobe(&mut self, field: Field, pattern: u8);

    /// Disable every position
    fn blank(&mut self);
}
