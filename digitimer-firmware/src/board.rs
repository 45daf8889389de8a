//! Board assembly
//!
//! Wires the RP2040 pins into the drivers and bundles them behind
//! [`Board`] for the controller.

use digitimer_core::config::TimerConfig;
use digitimer_core::traits::Board;
use digitimer_drivers::{
    ActiveLowButtons, BitBangController, BusDriver, EepromStore, ExpanderLcd, GpioSwitch,
    MultiplexedSegments, RgbLed,
};
use digitimer_hal_rp2040::flash::Rp2040Eeprom;
use digitimer_hal_rp2040::{BoardPins, CortexMask, GpioInput, GpioOutput, OpenDrain, SegmentPort};
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_time::Delay;

type Bus = BitBangController<OpenDrain<'static>, OpenDrain<'static>, Delay>;
type Lcd = ExpanderLcd<Bus, Delay>;
type Segments = MultiplexedSegments<SegmentPort<'static>, GpioOutput<'static>, Delay>;
type Led = RgbLed<GpioOutput<'static>>;
type Switch = GpioSwitch<GpioOutput<'static>>;
type Store = EepromStore<Rp2040Eeprom<'static>, CortexMask, Delay>;
type Buttons = ActiveLowButtons<GpioInput<'static>>;

/// The timer's front panel on the reference board
pub struct TimerBoard {
    lcd: Lcd,
    segments: Segments,
    led: Led,
    buzzer: Switch,
    load: Switch,
    store: Store,
    buttons: Buttons,
    delay: Delay,
}

impl TimerBoard {
    pub fn new(pins: BoardPins, eeprom: Rp2040Eeprom<'static>, config: &TimerConfig) -> Self {
        let BoardPins {
            segments,
            digit_enables,
            led,
            buzzer,
            relay,
            buttons,
            sda,
            scl,
        } = pins;

        let port = SegmentPort::new(segments.map(|pin| Output::new(pin, Level::Low)));
        let enables = digit_enables.map(|pin| GpioOutput::new(Output::new(pin, Level::Low)));
        let [red, green, blue] = led.map(|pin| GpioOutput::new(Output::new(pin, Level::High)));
        let [mode, shift_start, update_stop] =
            buttons.map(|pin| GpioInput::new(Input::new(pin, Pull::Up)));

        let controller = BitBangController::new(
            OpenDrain::new(Flex::new(sda)),
            OpenDrain::new(Flex::new(scl)),
            Delay,
            config.lcd.retry,
        );
        let bus = BusDriver::new(controller, &config.bus, config.lcd.retry);

        Self {
            lcd: ExpanderLcd::new(bus, Delay, &config.lcd),
            segments: MultiplexedSegments::new(port, enables, Delay, config.timing.digit_hold_ms),
            led: RgbLed::new(red, green, blue),
            buzzer: GpioSwitch::new_active_high(GpioOutput::new(Output::new(buzzer, Level::Low))),
            load: GpioSwitch::new_active_high(GpioOutput::new(Output::new(relay, Level::Low))),
            store: EepromStore::new(eeprom, CortexMask, Delay, config.layout),
            buttons: ActiveLowButtons::new(mode, shift_start, update_stop),
            delay: Delay,
        }
    }
}

impl Board for TimerBoard {
    type Lcd = Lcd;
    type Segments = Segments;
    type Led = Led;
    type Buzzer = Switch;
    type Load = Switch;
    type Store = Store;
    type Buttons = Buttons;
    type Delay = Delay;

    fn lcd(&mut self) -> &mut Lcd {
        &mut self.lcd
    }

    fn segments(&mut self) -> &mut Segments {
        &mut self.segments
    }

    fn status_led(&mut self) -> &mut Led {
        &mut self.led
    }

    fn buzzer(&mut self) -> &mut Switch {
        &mut self.buzzer
    }

    fn load(&mut self) -> &mut Switch {
        &mut self.load
    }

    fn store(&mut self) -> &mut Store {
        &mut self.store
    }

    fn buttons(&mut self) -> &mut Buttons {
        &mut self.buttons
    }

    fn delay(&mut self) -> &mut Delay {
        &mut self.delay
    }
}
