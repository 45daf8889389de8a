//! Persistent digit storage

use crate::time::{Field, TimeValue};

/// Errors from persistent storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// A write never reported completion within the retry budget
    Timeout,
}

/// What the boot-time check found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootState {
    /// Record was missing; digits were zeroed and the sentinel set
    FirstBoot,
    /// Record was present and left as found
    Restored(TimeValue),
}

/// Four persistent HH:MM digits plus an initialization sentinel
pub trait DigitStore {
    /// Raw byte of one field
    fn read(&mut self, field: Field) -> u8;

    /// Persist one field, blocking until the write completes
    fn write(&mut self, field: Field, value: u8) -> Result<(), StoreError>;

    /// Detect first boot and initialize the record if needed
    fn initialize(&mut self) -> Result<BootState, StoreError>;

    /// Read all four fields as a time value
    fn load(&mut self) -> TimeValue {
        let mut raw = [0u8; 4];
        for field in Field::ALL {
            raw[field.position()] = self.read(field);
        }
        TimeValue::from_stored(raw)
    }

    /// Advance one stored digit by one with wraparound and persist it
    fn increment(&mut self, field: Field) -> Result<u8, StoreError> {
        let mut value = self.load();
        let next = value.increment_field(field);
        self.store(&value, field)?;
        Ok(next)
    }

    /// Persist one field of `value`
    fn store(&mut self, value: &TimeValue, field: Field) -> Result<(), StoreError> {
        self.write(field, value.get(field))
    }
}
