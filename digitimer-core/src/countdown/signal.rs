//! End-of-run indications shared by the engine and the controller

use embedded_hal::delay::DelayNs;

use crate::config::{TimerConfig, TimingConfig};
use crate::time::{Field, TimeValue};
use crate::traits::{Actuator, Board, CharacterDisplay, Color, SegmentDisplay, StatusLed};

/// Segment pattern of the blinking second marker (decimal point only)
pub const MARKER_PATTERN: u8 = 0x80;

/// LCD text shown when the countdown reaches zero
pub const TIME_UP_MESSAGE: &str = "OVER";

/// Keep the 7-segment array multiplexing one value for `duration_ms`
pub fn hold_segments<B: Board>(
    board: &mut B,
    value: &TimeValue,
    dot: Option<Field>,
    duration_ms: u32,
    timing: &TimingConfig,
) {
    let frame_ms = timing.frame_ms().max(1);
    let mut elapsed = 0;
    while elapsed < duration_ms {
        board.segments().refresh(value, dot);
        elapsed += frame_ms;
    }
    board.segments().blank();
}

/// Stop indication: red LED, load off, "00.00" for a moment, buzzer off
pub fn show_stopped<B: Board>(board: &mut B, timing: &TimingConfig) {
    board.status_led().show(Color::Red);
    board.load().set_active(false);
    hold_segments(
        board,
        &TimeValue::ZERO,
        Some(Field::HourOnes),
        timing.stop_hold_ms,
        timing,
    );
    board.buzzer().set_active(false);
}

/// Time-up message on the LCD, then buzzer off
///
/// The LCD is brought up again before the message. Display failures are
/// ignored: the message is best-effort and the LED already tells the user
/// the run is over.
pub fn announce_time_up<B: Board>(board: &mut B, config: &TimerConfig) {
    board.status_led().show(Color::Red);

    let lcd = board.lcd();
    lcd.init().ok();
    lcd.set_cursor(config.lcd.time_row, config.lcd.message_column)
        .and_then(|_| lcd.write_str(TIME_UP_MESSAGE))
        .ok();

    board.delay().delay_ms(config.timing.time_up_hold_ms);
    board.lcd().clear().ok();
    board.buzzer().set_active(false);
}
