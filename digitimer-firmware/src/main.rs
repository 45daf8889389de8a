//! Digitimer - Countdown Timer Firmware
//!
//! Main firmware binary for the RP2040 timer board. The executor is only
//! the entry point: the main task boots the front panel and then polls the
//! controller forever without yielding. Every wait is a blocking delay.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use digitimer_core::config::TimerConfig;
use digitimer_core::countdown::Outcome;
use digitimer_core::traits::BootState;
use digitimer_core::{Controller, Report};
use digitimer_hal_rp2040::flash::{rp2040_eeprom, EEPROM_RANGE};
use digitimer_hal_rp2040::{board_pins, pins};

mod board;

use board::TimerBoard;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Digitimer firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = TimerConfig::default();

    let eeprom = rp2040_eeprom(p.FLASH, p.DMA_CH0);
    info!(
        "Digit store at flash 0x{:08x}..0x{:08x}",
        EEPROM_RANGE.start, EEPROM_RANGE.end
    );

    let pins = board_pins!(p);
    info!(
        "Segments on GPIO{}, digit enables on GPIO{}, LCD bus SDA GPIO{} SCL GPIO{}",
        pins::SEGMENT_BASE,
        pins::DIGIT_ENABLE_BASE,
        pins::SDA,
        pins::SCL
    );
    let mut board = TimerBoard::new(pins, eeprom, &config);

    let mut controller = Controller::new(config);
    match controller.boot(&mut board) {
        Ok(BootState::FirstBoot) => info!("First boot, digit record initialized"),
        Ok(BootState::Restored(value)) => info!("Restored stored time {}", value),
        Err(fault) => warn!("Boot fault: {}", fault),
    }

    info!("Entering main loop");
    loop {
        match controller.poll(&mut board) {
            Ok(Report::Idle) => trace!("idle"),
            Ok(Report::Countdown(Outcome::Completed { elapsed_seconds })) => {
                info!("Countdown complete after {}s", elapsed_seconds)
            }
            Ok(Report::Countdown(Outcome::Cancelled {
                remaining,
                elapsed_seconds,
            })) => info!(
                "Countdown cancelled at {} after {}s",
                remaining, elapsed_seconds
            ),
            Ok(report) => info!("{}", report),
            Err(fault) => warn!("Fault: {}", fault),
        }
    }
}
