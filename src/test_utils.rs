//! Recording GPIO and delay fakes for unit tests
//!
//! Every pin level, delay and controller call lands in one shared log, so
//! tests can check ordering across pins. Pin ids used by the helpers:
//! RS = 0, EN = 1, backlight = 2, data lines from 10 upward.

extern crate std;

use core::{cell::RefCell, convert::Infallible};
use std::{rc::Rc, vec::Vec};

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, OutputPin},
};

use crate::gpio::{GpioController, Pins};

pub(crate) const RS: u8 = 0;
pub(crate) const EN: u8 = 1;
pub(crate) const BACKLIGHT: u8 = 2;
pub(crate) const DB0: u8 = 10;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Event {
    Open,
    Close,
    SetOutput(u8),
    High(u8),
    Low(u8),
    Delay(u32),
}

#[derive(Clone, Default)]
pub(crate) struct Recorder {
    log: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn pin(&self, id: u8) -> RecordingPin {
        RecordingPin {
            id,
            log: self.log.clone(),
        }
    }

    pub(crate) fn delay(&self) -> RecordingDelay {
        RecordingDelay {
            log: self.log.clone(),
        }
    }

    pub(crate) fn gpio(&self) -> RecordingGpio {
        RecordingGpio {
            log: self.log.clone(),
            fail_open: false,
        }
    }

    pub(crate) fn failing_gpio(&self) -> RecordingGpio {
        RecordingGpio {
            log: self.log.clone(),
            fail_open: true,
        }
    }

    pub(crate) fn pins<const PIN_CNT: usize>(&self) -> Pins<RecordingPin, PIN_CNT> {
        Pins::new(
            self.pin(RS),
            self.pin(EN),
            self.pin(BACKLIGHT),
            core::array::from_fn(|index| self.pin(DB0 + index as u8)),
        )
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// Last level written to `id`, pins never written count as low
    pub(crate) fn is_high(&self, id: u8) -> bool {
        self.log
            .borrow()
            .iter()
            .rev()
            .find_map(|event| match *event {
                Event::High(pin) if pin == id => Some(true),
                Event::Low(pin) if pin == id => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// `(rs, data lines)` sampled at every EN rising edge
    pub(crate) fn pulses(&self) -> Vec<(bool, u8)> {
        let mut levels = [false; 256];
        let mut pulses = Vec::new();

        for event in self.log.borrow().iter() {
            match *event {
                Event::High(EN) => {
                    let lines = (0..8).fold(0u8, |acc, bit| {
                        acc | ((levels[(DB0 + bit) as usize] as u8) << bit)
                    });
                    pulses.push((levels[RS as usize], lines));
                }
                Event::High(pin) => levels[pin as usize] = true,
                Event::Low(pin) => levels[pin as usize] = false,
                _ => {}
            }
        }

        pulses
    }

    /// Whole bytes as the controller sees them, `(rs, byte)`
    pub(crate) fn writes(&self, pin_cnt: usize) -> Vec<(bool, u8)> {
        let pulses = self.pulses();
        match pin_cnt {
            4 => {
                assert!(pulses.len() % 2 == 0, "dangling nibble");
                pulses
                    .chunks(2)
                    .map(|pair| {
                        assert_eq!(pair[0].0, pair[1].0, "RS changed inside a byte");
                        (pair[0].0, (pair[0].1 << 4) | pair[1].1)
                    })
                    .collect()
            }
            _ => pulses,
        }
    }

    pub(crate) fn delays(&self) -> Vec<u32> {
        self.log
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                Event::Delay(us) => Some(us),
                _ => None,
            })
            .collect()
    }
}

pub(crate) struct RecordingPin {
    id: u8,
    log: Rc<RefCell<Vec<Event>>>,
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Low(self.id));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::High(self.id));
        Ok(())
    }
}

/// Records delays in microseconds
pub(crate) struct RecordingDelay {
    log: Rc<RefCell<Vec<Event>>>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::Delay(ns.div_ceil(1_000)));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Event::Delay(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::Delay(ms * 1_000));
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct OpenFailed;

pub(crate) struct RecordingGpio {
    log: Rc<RefCell<Vec<Event>>>,
    fail_open: bool,
}

impl GpioController for RecordingGpio {
    type Pin = RecordingPin;
    type Error = OpenFailed;

    fn open(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Open);
        match self.fail_open {
            true => Err(OpenFailed),
            false => Ok(()),
        }
    }

    fn set_output(&mut self, pin: &mut Self::Pin) {
        self.log.borrow_mut().push(Event::SetOutput(pin.id));
    }

    fn close(&mut self) {
        self.log.borrow_mut().push(Event::Close);
    }
}
