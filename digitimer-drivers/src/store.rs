//! EEPROM-backed digit store
//!
//! Four digit cells plus a sentinel cell. The sentinel tells a record that
//! was written by this firmware apart from whatever the part shipped with.
//!
//! # Boot check
//!
//! Right after power-up the data EEPROM has been seen to read back all
//! zeros for a while. The boot check therefore re-reads the record until
//! it is not entirely zero before it trusts the sentinel. Erased cells read
//! `0xFF`, so a blank part passes this check at once.

use digitimer_core::config::StoreLayout;
use digitimer_core::time::Field;
use digitimer_core::traits::{BootState, DigitStore, StoreError};
use digitimer_hal::{EepromController, InterruptMask};
use embedded_hal::delay::DelayNs;

/// Digit store on a byte-addressable EEPROM
pub struct EepromStore<C, M, D> {
    eeprom: C,
    mask: M,
    delay: D,
    layout: StoreLayout,
}

impl<C: EepromController, M: InterruptMask, D: DelayNs> EepromStore<C, M, D> {
    pub fn new(eeprom: C, mask: M, delay: D, layout: StoreLayout) -> Self {
        Self {
            eeprom,
            mask,
            delay,
            layout,
        }
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// Read a raw cell
    pub fn read_byte(&mut self, address: u8) -> u8 {
        self.eeprom.read(address)
    }

    /// Program one cell and wait for the controller to finish
    ///
    /// The unlock sequence runs with interrupts masked.
    pub fn write_byte(&mut self, address: u8, data: u8) -> Result<(), StoreError> {
        self.eeprom.load(address, data);

        let eeprom = &mut self.eeprom;
        self.mask.free(|| eeprom.unlock_and_start());

        self.layout
            .retry
            .spin_until(|| eeprom.write_complete())
            .map_err(|_| StoreError::Timeout)?;
        eeprom.clear_write_complete();
        Ok(())
    }

    /// Whether the four digits and the sentinel all read zero
    fn record_reads_zero(&mut self) -> bool {
        let mut raw = [0u8; 5];
        for field in Field::ALL {
            raw[field.position()] = self.eeprom.read(self.layout.address(field));
        }
        raw[4] = self.eeprom.read(self.layout.sentinel);
        raw.iter().all(|&b| b == 0)
    }

    fn settled_write(&mut self, address: u8, data: u8) -> Result<(), StoreError> {
        self.write_byte(address, data)?;
        self.delay.delay_ms(self.layout.init_write_settle_ms);
        Ok(())
    }
}

impl<C: EepromController, M: InterruptMask, D: DelayNs> DigitStore for EepromStore<C, M, D> {
    fn read(&mut self, field: Field) -> u8 {
        self.read_byte(self.layout.address(field))
    }

    fn write(&mut self, field: Field, value: u8) -> Result<(), StoreError> {
        self.write_byte(self.layout.address(field), value)
    }

    fn initialize(&mut self) -> Result<BootState, StoreError> {
        self.delay.delay_ms(self.layout.boot_settle_ms);

        let mut attempts = 0;
        while self.record_reads_zero() {
            attempts += 1;
            if self.layout.retry.exhausted(attempts) {
                break;
            }
            self.delay.delay_ms(self.layout.boot_retry_ms);
        }

        let state = if self.read_byte(self.layout.sentinel) != self.layout.sentinel_set {
            for field in Field::ALL {
                self.settled_write(self.layout.address(field), 0)?;
            }
            self.settled_write(self.layout.sentinel, self.layout.sentinel_set)?;
            BootState::FirstBoot
        } else {
            BootState::Restored(self.load())
        };

        self.delay.delay_ms(self.layout.boot_settle_ms);
        Ok(state)
    }
}
