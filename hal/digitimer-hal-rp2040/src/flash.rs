//! Data EEPROM emulated in flash
//!
//! The RP2040 has no data EEPROM, so the digit record lives in a
//! `sequential-storage` map in the last 64KB of flash. The cell address is
//! the map key and the cell content its value. [`EmulatedEeprom`] supplies
//! the write protocol and the recovery policy on top of [`FlashCells`].

use digitimer_hal::eeprom::{CellError, CellMap, EmulatedEeprom};
use embassy_futures::block_on;
use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

/// 2MB flash on the Pico
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;
pub const EEPROM_PARTITION_SIZE: usize = 64 * 1024;
pub const EEPROM_PARTITION_START: usize = FLASH_SIZE - EEPROM_PARTITION_SIZE;

/// Flash range holding the emulated EEPROM
pub const EEPROM_RANGE: core::ops::Range<u32> =
    (EEPROM_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Scratch space for one map entry (key, value, item header)
const ITEM_BUFFER: usize = 32;

/// Byte cells stored as a map on any async NOR flash
pub struct FlashCells<S> {
    flash: S,
    range: core::ops::Range<u32>,
}

/// The emulated EEPROM on the RP2040's own flash
pub type Rp2040Eeprom<'d> = EmulatedEeprom<FlashCells<Flash<'d, FLASH, Async, FLASH_SIZE>>>;

/// Emulated EEPROM over the EEPROM partition of the on-board flash
pub fn rp2040_eeprom<'d>(
    flash: Peri<'d, FLASH>,
    dma: Peri<'d, impl Channel>,
) -> Rp2040Eeprom<'d> {
    EmulatedEeprom::new(FlashCells::new(Flash::new(flash, dma), EEPROM_RANGE))
}

impl<S: NorFlash> FlashCells<S> {
    pub fn new(flash: S, range: core::ops::Range<u32>) -> Self {
        Self { flash, range }
    }
}

fn cell_error<E>(error: sequential_storage::Error<E>) -> CellError {
    match error {
        sequential_storage::Error::Corrupted { .. } => CellError::Corrupted,
        _ => CellError::Storage,
    }
}

impl<S: NorFlash> CellMap for FlashCells<S> {
    fn fetch(&mut self, address: u8) -> Result<Option<u8>, CellError> {
        let mut buffer = [0u8; ITEM_BUFFER];
        block_on(map::fetch_item::<u8, u8, _>(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut buffer,
            &address,
        ))
        .map_err(cell_error)
    }

    fn store(&mut self, address: u8, data: u8) -> Result<(), CellError> {
        let mut buffer = [0u8; ITEM_BUFFER];
        block_on(map::store_item(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut buffer,
            &address,
            &data,
        ))
        .map_err(cell_error)
    }

    fn wipe(&mut self) -> Result<(), CellError> {
        block_on(self.flash.erase(self.range.start, self.range.end))
            .map_err(|_| CellError::Storage)
    }
}
