//! The [`Lcd`] driver
//!
//! Create one with [`Lcd::new`], which validates the [`Config`], opens the
//! [`GpioController`] and runs the power-on sequence. Every method afterwards
//! blocks until the controller has had time to execute the instruction.

use embedded_hal::delay::DelayNs;

use crate::{
    charset::{Charset, Rom0A},
    command::{MaskTable, State},
    gpio::GpioController,
    sender::ParallelSender,
};

mod impls;
mod init;

pub use init::Config;

/// A ST7066U display on a 4 or 8 line parallel bus
///
/// `PIN_CNT` is the number of data lines, `Chars` translates text to CGROM codes.
pub struct Lcd<Gpio, Delayer, const PIN_CNT: usize, Chars = Rom0A>
where
    Gpio: GpioController,
    Delayer: DelayNs,
    Chars: Charset,
{
    gpio: Gpio,
    delayer: Delayer,
    sender: ParallelSender<Gpio::Pin, PIN_CNT>,
    backlight_pin: Gpio::Pin,
    config: Config,
    masks: MaskTable,
    charset: Chars,
    backlight: State,
}
