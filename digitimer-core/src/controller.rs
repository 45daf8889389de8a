//! Front-panel controller
//!
//! Owns the mode state, the redraw counter and the countdown engine, and
//! turns one button sample per call into device activity on a [`Board`].

use embedded_hal::delay::DelayNs;

use crate::config::TimerConfig;
use crate::countdown::{signal, Countdown, Outcome};
use crate::state::{Action, Event, Mode, UiState};
use crate::tick::RefreshTicks;
use crate::time::Field;
use crate::traits::{
    Actuator, BootState, Board, ButtonInput, CharacterDisplay, Color, DigitStore, DisplayError,
    StatusLed, StoreError,
};

/// Something a poll did worth reporting upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    /// Idle redraw, nothing changed
    Idle,
    ModeChanged(Mode),
    FieldSelected(Field),
    DigitUpdated { field: Field, value: u8 },
    /// Stop indication shown in response to a press
    Stopped,
    Countdown(Outcome),
}

/// Device failure surfaced by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    Display(DisplayError),
    Store(StoreError),
}

impl From<DisplayError> for Fault {
    fn from(e: DisplayError) -> Self {
        Fault::Display(e)
    }
}

impl From<StoreError> for Fault {
    fn from(e: StoreError) -> Self {
        Fault::Store(e)
    }
}

/// Timer controller
pub struct Controller {
    config: TimerConfig,
    ui: UiState,
    ticks: RefreshTicks,
    countdown: Countdown,
}

impl Controller {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            ui: UiState::new(),
            ticks: RefreshTicks::new(config.timing.tick_ceiling),
            countdown: Countdown::new(config),
            config,
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Power-on sequence
    ///
    /// Outputs off, LCD bring-up, self test, storage initialization. The
    /// store is initialized even when the LCD failed to come up; the
    /// display error is reported afterwards.
    pub fn boot<B: Board>(&mut self, board: &mut B) -> Result<BootState, Fault> {
        board.status_led().off();
        board.load().set_active(false);
        board.buzzer().set_active(false);

        let lcd = board.lcd().init();
        if lcd.is_ok() {
            self.self_test(board);
        }
        board.buzzer().set_active(false);
        board.delay().delay_ms(self.config.timing.post_self_test_ms);

        let state = board.store().initialize()?;
        lcd?;
        Ok(state)
    }

    /// Two rounds of "n." on every digit position with a beep, then the
    /// time-up message
    fn self_test<B: Board>(&self, board: &mut B) {
        let timing = &self.config.timing;
        let row = self.config.lcd.time_row;

        for digit in 0..2u8 {
            board.buzzer().set_active(true);
            for field in Field::ALL {
                let col = self.config.lcd.column(field);
                board
                    .lcd()
                    .print_at(row, col, b'0' + digit)
                    .and_then(|_| board.lcd().write_char(b'.'))
                    .ok();
            }
            board.delay().delay_ms(timing.self_test_beep_ms);
            board.buzzer().set_active(false);
            board.delay().delay_ms(timing.self_test_beep_ms);
        }

        board.lcd().clear().ok();
        signal::announce_time_up(board, &self.config);
    }

    /// One iteration of the main loop
    pub fn poll<B: Board>(&mut self, board: &mut B) -> Result<Report, Fault> {
        let event = Event::from_sample(&board.buttons().sample());
        if event.is_press() {
            board.buzzer().set_active(true);
        }

        let action = self.ui.handle(event);
        let result = self.perform(board, action);

        if action.is_idle() {
            board.buzzer().set_active(false);
        }
        result
    }

    fn perform<B: Board>(&mut self, board: &mut B, action: Action) -> Result<Report, Fault> {
        match action {
            Action::ModeToggled(mode) => {
                board.buzzer().set_active(false);
                Ok(Report::ModeChanged(mode))
            }
            Action::StartCountdown => Ok(Report::Countdown(self.countdown.run(board))),
            Action::SelectField(field) => {
                board.delay().delay_ms(self.config.timing.shift_press_ms);
                self.redraw(board, Some(field))?;
                Ok(Report::FieldSelected(field))
            }
            Action::IncrementField(field) => {
                self.redraw(board, Some(field))?;
                let value = board.store().increment(field)?;
                board.delay().delay_ms(self.config.timing.update_settle_ms);
                Ok(Report::DigitUpdated { field, value })
            }
            Action::Stop => {
                signal::show_stopped(board, &self.config.timing);
                Ok(Report::Stopped)
            }
            Action::ShowStored => {
                board.status_led().show(Color::Red);
                self.redraw(board, None)?;
                Ok(Report::Idle)
            }
            Action::ShowStopped => {
                board.status_led().show(Color::Red);
                signal::show_stopped(board, &self.config.timing);
                Ok(Report::Idle)
            }
            Action::ShowEditing(field) => {
                board.status_led().show(Color::Blue);
                self.redraw(board, Some(field))?;
                Ok(Report::Idle)
            }
        }
    }

    /// Draw the stored time on the LCD
    ///
    /// `active` is blanked for the blink hold and re-shown on every
    /// `blink_period`-th redraw. The ':' separator is blanked and re-shown
    /// together with hour-ones.
    fn redraw<B: Board>(&mut self, board: &mut B, active: Option<Field>) -> Result<(), Fault> {
        self.ticks.advance();

        let lcd_config = self.config.lcd;
        let timing = self.config.timing;
        let value = board.store().load();
        let row = lcd_config.time_row;

        for field in Field::ALL {
            let shown = active != Some(field);
            let glyph = if shown { b'0' + value.get(field) } else { b' ' };
            board.lcd().print_at(row, lcd_config.column(field), glyph)?;
            if field == Field::HourOnes {
                let colon = if shown { b':' } else { b' ' };
                board.lcd().print_at(row, lcd_config.colon_column, colon)?;
            }
            if !shown {
                board.delay().delay_ms(timing.blink_hold_ms);
            }
        }

        board.buzzer().set_active(false);

        if let Some(field) = active {
            if self.ticks.every(timing.blink_period) {
                board
                    .lcd()
                    .print_at(row, lcd_config.column(field), b'0' + value.get(field))?;
                if field == Field::HourOnes {
                    board.lcd().print_at(row, lcd_config.colon_column, b':')?;
                }
                board.delay().delay_ms(timing.blink_hold_ms);
            }
        }

        self.ticks.settle();
        Ok(())
    }
}
