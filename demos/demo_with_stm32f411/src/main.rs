//! Drive a 1602 module (ST7066U) with a STM32F411RET6 in 4 Pin Mode

//! Wiring diagram
//!
//! LCD1602 <-> STM32F411RET6
//!     Vss <-> GND
//!     Vdd <-> 5V
//!      V0 <-> potentiometer <-> 5V & GND (to adjust the display contrast)
//!      RS <-> PA0
//!      RW <-> GND (the driver never reads back)
//!      EN <-> PA2 (and optionally connect to a 4.7 kOhm Pulldown resistor, to stable voltage level when STM32 reset)
//!      D4 <-> PA3
//!      D5 <-> PA4
//!      D6 <-> PA5
//!      D7 <-> PA6
//!       A <-> NPN transistor base driven by PA7
//!       K <-> GND

#![no_std]
#![no_main]

use core::{convert::Infallible, fmt::Write};

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4xx_hal::{
    gpio::{ErasedPin, Output, PushPull},
    pac,
    prelude::*,
};

use st7066u::{
    command::State,
    gpio::{GpioController, Pins},
    lcd::{Config, Lcd},
};

/// GPIOA is clocked by `split()`, so there is nothing to open or close
struct Stm32Gpio;

impl GpioController for Stm32Gpio {
    type Pin = ErasedPin<Output<PushPull>>;
    type Error = Infallible;

    fn open(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    // pins are already push-pull outputs, just start them low
    fn set_output(&mut self, pin: &mut Self::Pin) {
        pin.set_low();
    }

    fn close(&mut self) {}
}

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(12.MHz()).freeze();

    // a timer for the LCD timings, SysTick for the demo loop
    let lcd_delayer = dp.TIM2.delay_us(&clocks);
    let mut delayer = cp.SYST.delay(&clocks);

    let gpioa = dp.GPIOA.split();

    let pins = Pins::new_4pin(
        gpioa.pa0.into_push_pull_output().erase(),
        gpioa.pa2.into_push_pull_output().erase(),
        gpioa.pa7.into_push_pull_output().erase(),
        gpioa.pa3.into_push_pull_output().erase(),
        gpioa.pa4.into_push_pull_output().erase(),
        gpioa.pa5.into_push_pull_output().erase(),
        gpioa.pa6.into_push_pull_output().erase(),
    );

    let mut lcd = match Lcd::new(Stm32Gpio, lcd_delayer, pins, Config::default()) {
        Ok(lcd) => lcd,
        Err(err) => panic!("{}", err),
    };

    rprintln!("LCD ready");

    lcd.set_backlight(State::On);
    lcd.write_str_to_cur("hello, world!");

    // out of range on a 16x2, silently dropped
    lcd.set_cursor_pos(2, 0);

    lcd.set_cursor_blink_state(State::On);

    let mut seconds: u32 = 0;
    loop {
        lcd.set_cursor_pos(1, 0);
        write!(lcd, "up {:>5}s {}", seconds, '°').ok();

        // the LCD writes above take about a millisecond, good enough for a demo clock
        delayer.delay_ms(1000);
        seconds = seconds.wrapping_add(1);

        if seconds % 10 == 0 {
            rprintln!("{} seconds", seconds);
            lcd.move_cursor_left(1);
        }
    }
}
