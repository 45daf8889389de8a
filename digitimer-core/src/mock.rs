//! Recording mock devices for host tests

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;

use crate::time::{Field, TimeValue};
use crate::traits::{
    Actuator, BootState, Board, Button, ButtonInput, ButtonSample, CharacterDisplay, Color,
    DigitStore, DisplayError, SegmentDisplay, StatusLed, StoreError,
};

pub const LCD_ROWS: usize = 4;
pub const LCD_COLS: usize = 20;

/// 4x20 character grid
pub struct MockLcd {
    pub grid: [[u8; LCD_COLS]; LCD_ROWS],
    row: usize,
    col: usize,
    /// Every character ever written, in order
    pub history: String,
    pub inits: u32,
    pub clears: u32,
    pub backlight: bool,
    /// Fail every call with a bus error
    pub fail: bool,
}

impl MockLcd {
    pub fn new() -> Self {
        Self {
            grid: [[b' '; LCD_COLS]; LCD_ROWS],
            row: 0,
            col: 0,
            history: String::new(),
            inits: 0,
            clears: 0,
            backlight: false,
            fail: false,
        }
    }

    fn check(&self) -> Result<(), DisplayError> {
        if self.fail {
            Err(DisplayError::Bus)
        } else {
            Ok(())
        }
    }

    /// Character at a 1-based position
    pub fn char_at(&self, row: u8, col: u8) -> u8 {
        self.grid[row as usize - 1][col as usize - 1]
    }

    /// Text of a 1-based row
    pub fn row_text(&self, row: u8) -> String {
        self.grid[row as usize - 1]
            .iter()
            .map(|&b| b as char)
            .collect()
    }

    pub fn history_contains(&self, text: &str) -> bool {
        self.history.contains(text)
    }
}

impl CharacterDisplay for MockLcd {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.check()?;
        self.inits += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.check()?;
        self.grid = [[b' '; LCD_COLS]; LCD_ROWS];
        self.row = 0;
        self.col = 0;
        self.clears += 1;
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        self.check()?;
        self.row = match row {
            1..=4 => row as usize - 1,
            _ => 0,
        };
        self.col = (col.max(1) as usize - 1).min(LCD_COLS - 1);
        Ok(())
    }

    fn write_char(&mut self, ch: u8) -> Result<(), DisplayError> {
        self.check()?;
        self.grid[self.row][self.col] = ch;
        if self.col < LCD_COLS - 1 {
            self.col += 1;
        }
        self.history.push(ch as char);
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.check()?;
        self.backlight = on;
        Ok(())
    }
}

/// Records every multiplex frame and strobe
#[derive(Default)]
pub struct MockSegments {
    pub frames: Vec<(TimeValue, Option<Field>)>,
    pub strobes: Vec<(Field, u8)>,
    pub blanks: u32,
}

impl MockSegments {
    /// Frames drawn without a decimal point (countdown frames)
    pub fn counting_frames(&self) -> usize {
        self.frames.iter().filter(|(_, dot)| dot.is_none()).count()
    }
}

impl SegmentDisplay for MockSegments {
    fn refresh(&mut self, value: &TimeValue, dot: Option<Field>) {
        self.frames.push((*value, dot));
    }

    fn strobe(&mut self, field: Field, pattern: u8) {
        self.strobes.push((field, pattern));
    }

    fn blank(&mut self) {
        self.blanks += 1;
    }
}

#[derive(Default)]
pub struct MockLed {
    pub color: Option<Color>,
    pub history: Vec<Color>,
}

impl StatusLed for MockLed {
    fn show(&mut self, color: Color) {
        self.color = Some(color);
        self.history.push(color);
    }

    fn off(&mut self) {
        self.color = None;
    }

    fn color(&self) -> Option<Color> {
        self.color
    }
}

#[derive(Default)]
pub struct MockSwitch {
    pub active: bool,
    /// Number of `set_active(true)` calls
    pub activations: u32,
}

impl Actuator for MockSwitch {
    fn set_active(&mut self, active: bool) {
        if active {
            self.activations += 1;
        }
        self.active = active;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// In-memory digit store
pub struct MockStore {
    pub digits: [u8; 4],
    pub sentinel: u8,
    pub writes: Vec<(Field, u8)>,
    pub initializations: u32,
    /// Fail every write with a timeout
    pub fail_writes: bool,
}

impl MockStore {
    pub fn blank() -> Self {
        Self {
            digits: [0; 4],
            sentinel: 0,
            writes: Vec::new(),
            initializations: 0,
            fail_writes: false,
        }
    }

    pub fn with_digits(digits: [u8; 4]) -> Self {
        Self {
            digits,
            sentinel: 1,
            ..Self::blank()
        }
    }
}

impl DigitStore for MockStore {
    fn read(&mut self, field: Field) -> u8 {
        self.digits[field.position()]
    }

    fn write(&mut self, field: Field, value: u8) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Timeout);
        }
        self.digits[field.position()] = value;
        self.writes.push((field, value));
        Ok(())
    }

    fn initialize(&mut self) -> Result<BootState, StoreError> {
        self.initializations += 1;
        if self.sentinel == 1 {
            return Ok(BootState::Restored(self.load()));
        }
        for field in Field::ALL {
            self.write(field, 0)?;
        }
        self.sentinel = 1;
        Ok(BootState::FirstBoot)
    }
}

/// Scripted buttons
///
/// `sample()` pops the next scripted sample (nothing pressed once the
/// script runs out). `is_pressed(UpdateStop)`, which the countdown polls,
/// reports a press from the `cancel_at`-th poll on.
#[derive(Default)]
pub struct MockButtons {
    pub script: VecDeque<ButtonSample>,
    pub cancel_at: Option<u32>,
    pub cancel_polls: u32,
}

impl MockButtons {
    pub fn push(&mut self, button: Button) {
        let sample = match button {
            Button::Mode => ButtonSample {
                mode: true,
                ..Default::default()
            },
            Button::ShiftStart => ButtonSample {
                shift_start: true,
                ..Default::default()
            },
            Button::UpdateStop => ButtonSample {
                update_stop: true,
                ..Default::default()
            },
        };
        self.script.push_back(sample);
    }

    pub fn push_idle(&mut self) {
        self.script.push_back(ButtonSample::default());
    }
}

impl ButtonInput for MockButtons {
    fn is_pressed(&mut self, button: Button) -> bool {
        if button != Button::UpdateStop {
            return false;
        }
        self.cancel_polls += 1;
        matches!(self.cancel_at, Some(at) if self.cancel_polls >= at)
    }

    fn sample(&mut self) -> ButtonSample {
        self.script.pop_front().unwrap_or_default()
    }
}

/// Accumulates requested delay time
#[derive(Default)]
pub struct MockDelay {
    pub elapsed_ns: u64,
}

impl MockDelay {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
    }
}

pub struct MockBoard {
    pub lcd: MockLcd,
    pub segments: MockSegments,
    pub led: MockLed,
    pub buzzer: MockSwitch,
    pub load: MockSwitch,
    pub store: MockStore,
    pub buttons: MockButtons,
    pub delay: MockDelay,
}

impl MockBoard {
    /// Board with a never-initialized store
    pub fn new() -> Self {
        Self::with_store(MockStore::blank())
    }

    /// Board with an initialized store holding `digits`
    pub fn with_digits(digits: [u8; 4]) -> Self {
        Self::with_store(MockStore::with_digits(digits))
    }

    fn with_store(store: MockStore) -> Self {
        Self {
            lcd: MockLcd::new(),
            segments: MockSegments::default(),
            led: MockLed::default(),
            buzzer: MockSwitch::default(),
            load: MockSwitch::default(),
            store,
            buttons: MockButtons::default(),
            delay: MockDelay::default(),
        }
    }
}

impl Board for MockBoard {
    type Lcd = MockLcd;
    type Segments = MockSegments;
    type Led = MockLed;
    type Buzzer = MockSwitch;
    type Load = MockSwitch;
    type Store = MockStore;
    type Buttons = MockButtons;
    type Delay = MockDelay;

    fn lcd(&mut self) -> &mut MockLcd {
        &mut self.lcd
    }

    fn segments(&mut self) -> &mut MockSegments {
        &mut self.segments
    }

    fn status_led(&mut self) -> &mut MockLed {
        &mut self.led
    }

    fn buzzer(&mut self) -> &mut MockSwitch {
        &mut self.buzzer
    }

    fn load(&mut self) -> &mut MockSwitch {
        &mut self.load
    }

    fn store(&mut self) -> &mut MockStore {
        &mut self.store
    }

    fn buttons(&mut self) -> &mut MockButtons {
        &mut self.buttons
    }

    fn delay(&mut self) -> &mut MockDelay {
        &mut self.delay
    }
}
