//! Byte-addressable non-volatile memory
//!
//! The model is a data EEPROM with a synchronous controller: reads are
//! immediate, writes are armed, unlocked, then reported through a
//! completion flag.

/// Value of a cell that has never been written
pub const ERASED: u8 = 0xFF;

/// Data EEPROM controller
///
/// A write is a four step protocol driven by the caller:
///
/// 1. [`load`](Self::load) latches address and data
/// 2. [`unlock_and_start`](Self::unlock_and_start) runs the unlock sequence
///    and kicks off programming. Callers must mask interrupts around this
///    call (see [`InterruptMask`](crate::InterruptMask)).
/// 3. [`write_complete`](Self::write_complete) is polled until true
/// 4. [`clear_write_complete`](Self::clear_write_complete)
pub trait EepromController {
    /// Read the byte at `address`
    fn read(&mut self, address: u8) -> u8;

    /// Latch address and data for the next write
    fn load(&mut self, address: u8, data: u8);

    /// Unlock the array and start programming the latched byte
    fn unlock_and_start(&mut self);

    /// Write-complete status flag
    fn write_complete(&mut self) -> bool;

    /// Clear the write-complete flag for the next write
    fn clear_write_complete(&mut self);
}

/// Storage failure reported by a [`CellMap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CellError {
    /// Underlying medium failed the read or program
    Storage,
    /// Stored records could not be decoded
    Corrupted,
}

/// Key-value backing store for byte cells
///
/// Used by [`EmulatedEeprom`] on parts without a data EEPROM. `Ok(None)`
/// means the cell was never written.
pub trait CellMap {
    fn fetch(&mut self, address: u8) -> Result<Option<u8>, CellError>;

    fn store(&mut self, address: u8, data: u8) -> Result<(), CellError>;

    /// Erase every cell
    fn wipe(&mut self) -> Result<(), CellError>;
}

/// [`EepromController`] over a [`CellMap`]
///
/// `unlock_and_start` only arms the latched byte and the first
/// `write_complete` poll programs it, so the backing store is never touched
/// with interrupts masked.
///
/// Failures get one retry. A read that fails twice wipes the map and reads
/// [`ERASED`], which sends the next boot through first-boot initialisation.
/// A program that fails twice wipes the map and programs again; if that also
/// fails the byte is dropped and completion is still raised.
pub struct EmulatedEeprom<M> {
    map: M,
    latched: Option<(u8, u8)>,
    armed: Option<(u8, u8)>,
    complete: bool,
}

impl<M: CellMap> EmulatedEeprom<M> {
    pub fn new(map: M) -> Self {
        Self {
            map,
            latched: None,
            armed: None,
            complete: false,
        }
    }

    fn program(&mut self, address: u8, data: u8) {
        if self.map.store(address, data).is_ok() || self.map.store(address, data).is_ok() {
            return;
        }
        self.map.wipe().ok();
        self.map.store(address, data).ok();
    }
}

impl<M: CellMap> EepromController for EmulatedEeprom<M> {
    fn read(&mut self, address: u8) -> u8 {
        match self.map.fetch(address).or_else(|_| self.map.fetch(address)) {
            Ok(cell) => cell.unwrap_or(ERASED),
            Err(_) => {
                self.map.wipe().ok();
                ERASED
            }
        }
    }

    fn load(&mut self, address: u8, data: u8) {
        self.latched = Some((address, data));
    }

    fn unlock_and_start(&mut self) {
        self.armed = self.latched.take();
    }

    fn write_complete(&mut self) -> bool {
        if let Some((address, data)) = self.armed.take() {
            self.program(address, data);
            self.complete = true;
        }
        self.complete
    }

    fn clear_write_complete(&mut self) {
        self.complete = false;
    }
}
