//! HH:MM time value
//!
//! The timer never holds a binary minute count. It keeps the four digits
//! that are physically shown on the display and does all arithmetic digit
//! by digit.

/// One digit position of the HH:MM display
///
/// Discriminants are the 1-based field indices used by the edit cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Field {
    HourTens = 1,
    HourOnes = 2,
    MinuteTens = 3,
    MinuteOnes = 4,
}

impl Field {
    /// All fields, most significant first
    pub const ALL: [Field; 4] = [
        Field::HourTens,
        Field::HourOnes,
        Field::MinuteTens,
        Field::MinuteOnes,
    ];

    /// 1-based field index
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Create a field from its 1-based index
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Field::HourTens),
            2 => Some(Field::HourOnes),
            3 => Some(Field::MinuteTens),
            4 => Some(Field::MinuteOnes),
            _ => None,
        }
    }

    /// Position in the digit array (0 = most significant)
    pub fn position(self) -> usize {
        self as usize - 1
    }

    /// Largest digit this field may hold
    pub fn ceiling(self) -> u8 {
        match self {
            Field::MinuteTens => 5,
            _ => 9,
        }
    }

    /// Next field for the edit cursor, wrapping 4 -> 1
    pub fn next(self) -> Self {
        match self {
            Field::HourTens => Field::HourOnes,
            Field::HourOnes => Field::MinuteTens,
            Field::MinuteTens => Field::MinuteOnes,
            Field::MinuteOnes => Field::HourTens,
        }
    }

    /// Increment a digit of this field, wrapping past the ceiling to 0
    pub fn wrapping_increment(self, digit: u8) -> u8 {
        if digit >= self.ceiling() {
            0
        } else {
            digit + 1
        }
    }

    /// Minutes represented by one unit of this field
    pub fn weight_minutes(self) -> u32 {
        match self {
            Field::HourTens => 600,
            Field::HourOnes => 60,
            Field::MinuteTens => 10,
            Field::MinuteOnes => 1,
        }
    }
}

/// Result of one countdown decrement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// One minute was removed
    Counted,
    /// The value was already 00:00 and was left untouched
    Completed,
}

/// A digit outside its field's range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidDigit {
    pub field: Field,
    pub value: u8,
}

/// Four-digit HH:MM value
///
/// Invariant: every digit is within `0..=field.ceiling()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeValue([u8; 4]);

impl TimeValue {
    /// 00:00
    pub const ZERO: Self = Self([0; 4]);

    /// Build from digits, most significant first
    pub fn from_digits(digits: [u8; 4]) -> Result<Self, InvalidDigit> {
        for field in Field::ALL {
            let value = digits[field.position()];
            if value > field.ceiling() {
                return Err(InvalidDigit { field, value });
            }
        }
        Ok(Self(digits))
    }

    /// Build from raw bytes read back from storage
    ///
    /// Bytes outside a field's range (erased or corrupt cells) read as 0.
    pub fn from_stored(raw: [u8; 4]) -> Self {
        let mut digits = [0; 4];
        for field in Field::ALL {
            let value = raw[field.position()];
            if value <= field.ceiling() {
                digits[field.position()] = value;
            }
        }
        Self(digits)
    }

    /// Digits, most significant first
    pub fn digits(&self) -> [u8; 4] {
        self.0
    }

    /// Digit of one field
    pub fn get(&self, field: Field) -> u8 {
        self.0[field.position()]
    }

    /// Replace one field's digit
    pub fn set(&mut self, field: Field, value: u8) -> Result<(), InvalidDigit> {
        if value > field.ceiling() {
            return Err(InvalidDigit { field, value });
        }
        self.0[field.position()] = value;
        Ok(())
    }

    /// Advance one field by one, wrapping to 0 past its ceiling
    pub fn increment_field(&mut self, field: Field) -> u8 {
        let next = field.wrapping_increment(self.get(field));
        self.0[field.position()] = next;
        next
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 4]
    }

    /// Whether every digit satisfies its field's range
    pub fn is_valid(&self) -> bool {
        Field::ALL
            .iter()
            .all(|&field| self.get(field) <= field.ceiling())
    }

    /// Total minutes represented (hour-tens counts 600)
    pub fn total_minutes(&self) -> u32 {
        Field::ALL
            .iter()
            .map(|&field| self.get(field) as u32 * field.weight_minutes())
            .sum()
    }

    /// Remove one minute with digit-wise borrow
    ///
    /// The least significant digit is decremented; a digit that would go
    /// below 0 is reset to its ceiling and the borrow moves one position up.
    /// A value that is already 00:00 is not touched and reports
    /// [`Tick::Completed`].
    pub fn decrement(&mut self) -> Tick {
        if self.is_zero() {
            return Tick::Completed;
        }

        for field in Field::ALL.iter().rev() {
            let digit = &mut self.0[field.position()];
            if *digit > 0 {
                *digit -= 1;
                return Tick::Counted;
            }
            *digit = field.ceiling();
        }

        // Unreachable for a non-zero value: some digit absorbed the borrow
        Tick::Counted
    }
}
