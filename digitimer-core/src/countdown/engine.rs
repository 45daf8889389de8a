//! Countdown run loop
//!
//! One countdown step removes one minute. Between steps the engine spends
//! `seconds_per_step * refreshes_per_second` multiplex frames redrawing the
//! digits, and samples the cancel button on every frame, so a cancel is
//! noticed within one frame rather than one step. Zero counts act as one.

use super::signal::{self, MARKER_PATTERN};
use crate::config::TimerConfig;
use crate::time::{Field, TimeValue};
use crate::traits::{
    Actuator, Board, Button, ButtonInput, Color, DigitStore, SegmentDisplay, StatusLed,
};

/// How a countdown run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// All digits reached zero
    Completed {
        /// Logical seconds spent counting
        elapsed_seconds: u32,
    },
    /// The stop button was pressed mid-run
    Cancelled {
        /// Value shown when the cancel was seen
        remaining: TimeValue,
        /// Logical seconds spent counting before the cancel
        elapsed_seconds: u32,
    },
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed { .. })
    }

    pub fn elapsed_seconds(&self) -> u32 {
        match *self {
            Outcome::Completed { elapsed_seconds } => elapsed_seconds,
            Outcome::Cancelled {
                elapsed_seconds, ..
            } => elapsed_seconds,
        }
    }
}

/// Result of one multiplex frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Continue,
    Cancelled,
}

/// Countdown engine
#[derive(Debug, Clone)]
pub struct Countdown {
    config: TimerConfig,
}

impl Countdown {
    pub fn new(config: TimerConfig) -> Self {
        Self { config }
    }

    /// Count the stored time down to zero or until cancelled
    ///
    /// Blocks for the whole run. The load output is active while counting
    /// and is always switched off before this returns.
    pub fn run<B: Board>(&self, board: &mut B) -> Outcome {
        let start = board.store().load();
        board.segments().blank();

        let outcome = self.count_down(board, start);

        board.load().set_active(false);
        board.buzzer().set_active(true);
        match outcome {
            Outcome::Completed { .. } => signal::announce_time_up(board, &self.config),
            Outcome::Cancelled { .. } => signal::show_stopped(board, &self.config.timing),
        }

        outcome
    }

    fn count_down<B: Board>(&self, board: &mut B, start: TimeValue) -> Outcome {
        let timing = &self.config.timing;
        let mut remaining = start;
        let mut elapsed_seconds = 0u32;

        loop {
            if remaining.is_zero() {
                return Outcome::Completed { elapsed_seconds };
            }

            let mut step_frame = 0u32;
            for _ in 0..timing.step_seconds() {
                for _ in 0..timing.second_frames() {
                    if self.frame(board, &remaining, step_frame) == Frame::Cancelled {
                        return Outcome::Cancelled {
                            remaining,
                            elapsed_seconds,
                        };
                    }
                    step_frame += 1;
                }
                elapsed_seconds += 1;
            }

            remaining.decrement();
        }
    }

    /// One multiplex pass plus a cancel check
    fn frame<B: Board>(&self, board: &mut B, remaining: &TimeValue, step_frame: u32) -> Frame {
        let marker_period = self.config.timing.marker_period as u32;

        board.status_led().show(Color::Green);
        board.load().set_active(true);
        board.segments().refresh(remaining, None);
        board.buzzer().set_active(false);

        if marker_period != 0 && step_frame % marker_period == 0 {
            board.segments().strobe(Field::HourOnes, MARKER_PATTERN);
        }

        if board.buttons().is_pressed(Button::UpdateStop) {
            Frame::Cancelled
        } else {
            Frame::Continue
        }
    }
}
