//! Board pin map
//!
//! | Function | GPIO |
//! |----------|------|
//! | Segment port a..dp | 0-7 |
//! | Digit enables, most significant first | 8-11 |
//! | Status LED red / green / blue | 12 / 13 / 14 |
//! | Buzzer | 15 |
//! | Load relay | 16 |
//! | Buttons mode / shift-start / update-stop | 17 / 18 / 19 |
//! | Bus SDA / SCL | 20 / 21 |

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;

pub const SEGMENT_BASE: u8 = 0;
pub const DIGIT_ENABLE_BASE: u8 = 8;
pub const LED_BASE: u8 = 12;
pub const BUZZER: u8 = 15;
pub const RELAY: u8 = 16;
pub const BUTTON_BASE: u8 = 17;
pub const SDA: u8 = 20;
pub const SCL: u8 = 21;

/// Every pin the timer uses, type-erased
pub struct BoardPins {
    pub segments: [Peri<'static, AnyPin>; 8],
    pub digit_enables: [Peri<'static, AnyPin>; 4],
    /// Red, green, blue
    pub led: [Peri<'static, AnyPin>; 3],
    pub buzzer: Peri<'static, AnyPin>,
    pub relay: Peri<'static, AnyPin>,
    /// Mode, shift-start, update-stop
    pub buttons: [Peri<'static, AnyPin>; 3],
    pub sda: Peri<'static, AnyPin>,
    pub scl: Peri<'static, AnyPin>,
}

/// Move the board's pins out of `embassy_rp::Peripherals`
///
/// Usage:
/// ```ignore
/// let p = embassy_rp::init(Default::default());
/// let pins = board_pins!(p);
/// ```
#[macro_export]
macro_rules! board_pins {
    ($p:expr) => {
        $crate::pins::BoardPins {
            segments: [
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_0),
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_1),
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_2),
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_3),
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_4),
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_5),
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_6),
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_7),
            ],
            digit_enables: [
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_8),
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_9),
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_10),
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_11),
            ],
            led: [
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_12),
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_13),
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_14),
            ],
            buzzer: embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_15),
            relay: embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_16),
            buttons: [
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_17),
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_18),
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_19),
            ],
            sda: embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_20),
            scl: embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_21),
        }
    };
}
