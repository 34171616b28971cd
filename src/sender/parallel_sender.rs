use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    command::{Command, RegisterSelection},
    timing::{ENABLE_DELAY_US, SETTLE_US},
    utils::{BitOps, BitState},
};

/// Write-only parallel bus with 4 or 8 data lines
///
/// In 4 pin mode every byte is sent as two nibbles, high nibble first.
pub struct ParallelSender<Pin, const PIN_CNT: usize>
where
    Pin: OutputPin,
{
    rs_pin: Pin,
    en_pin: Pin,
    db_pins: [Pin; PIN_CNT],
}

impl<Pin, const PIN_CNT: usize> ParallelSender<Pin, PIN_CNT>
where
    Pin: OutputPin,
{
    /// Panics if `PIN_CNT` is neither 4 nor 8
    pub fn new(rs: Pin, en: Pin, db_pins: [Pin; PIN_CNT]) -> Self {
        assert!(
            PIN_CNT == 4 || PIN_CNT == 8,
            "Pins other than 4 or 8 are not supported"
        );

        Self {
            rs_pin: rs,
            en_pin: en,
            db_pins,
        }
    }

    /// Give the pins back, as `(rs, en, data)`
    pub fn into_parts(self) -> (Pin, Pin, [Pin; PIN_CNT]) {
        (self.rs_pin, self.en_pin, self.db_pins)
    }

    /// Mutable access to every pin, RS and EN first
    pub(crate) fn pins_mut(&mut self) -> impl Iterator<Item = &mut Pin> {
        [&mut self.rs_pin, &mut self.en_pin]
            .into_iter()
            .chain(self.db_pins.iter_mut())
    }

    /// Drive every owned line low
    pub fn release(&mut self) {
        self.pins_mut().for_each(|pin| {
            pin.set_low().ok();
        });
    }

    /// Put one byte on the bus and latch it
    pub fn send(&mut self, command: impl Into<Command>, delayer: &mut impl DelayNs) {
        let command = command.into();
        let raw_bits = command.get_bits();

        match command.get_register_selection() {
            RegisterSelection::Command => {
                self.rs_pin.set_low().ok();
            }
            RegisterSelection::Data => {
                self.rs_pin.set_high().ok();
            }
        }

        match PIN_CNT {
            4 => {
                self.push_bits(raw_bits >> 4);
                self.pulse_enable(delayer);
                self.push_bits(raw_bits & 0b1111);
                self.pulse_enable(delayer);
            }

            8 => {
                self.push_bits(raw_bits);
                self.pulse_enable(delayer);
            }

            _ => unreachable!(),
        }
    }

    // line i <- bit i
    fn push_bits(&mut self, raw_bits: u8) {
        self.db_pins
            .iter_mut()
            .enumerate()
            .for_each(|(index, pin)| match raw_bits.check_bit(index as u8) {
                BitState::Set => {
                    pin.set_high().ok();
                }
                BitState::Clear => {
                    pin.set_low().ok();
                }
            });
    }

    fn pulse_enable(&mut self, delayer: &mut impl DelayNs) {
        delayer.delay_us(ENABLE_DELAY_US);
        self.en_pin.set_high().ok();
        delayer.delay_us(ENABLE_DELAY_US);
        self.en_pin.set_low().ok();
        delayer.delay_us(SETTLE_US);
    }
}
