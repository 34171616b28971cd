/*!
# ST7066U Driver

Write-only driver for ST7066U (HD44780 compatible) character LCDs
wired on a 4 or 8 line parallel bus.

Basic Usage:

1. Provide a [`gpio::GpioController`] for your platform <br/>
    It opens/closes the GPIO block and hands out [`embedded_hal::digital::OutputPin`]s.
<br/>
<br/>
2. Bind the pins with [`gpio::Pins::new_4pin()`] or [`gpio::Pins::new_8pin()`]
<br/>
<br/>
3. Use [`lcd::Lcd::new()`] to create a [`lcd::Lcd`] and initialize the hardware
<br/>
<br/>
4. Use any method provided by [`lcd::Lcd`] to control the display,
    and [`lcd::Lcd::close()`] to get the pins back

The R/W line is never driven, connect it to GND. Instead of polling the busy
flag, every instruction is followed by a fixed delay, see [`timing`].
*/

#![no_std]
#![warn(missing_docs)]

pub mod charset;
pub mod command;
pub mod error;
pub mod gpio;
pub mod lcd;
pub mod sender;
pub mod timing;
pub mod utils;

#[cfg(test)]
mod test_utils;
