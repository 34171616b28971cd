//! Pin side of the driver
//!
//! Logic levels go through [`embedded_hal::digital::OutputPin`]. Platforms where
//! the GPIO block has to be opened before use (memory mapped `/dev/gpiomem`,
//! clock gating, ...) also provide a [`GpioController`], which the [`Lcd`](crate::lcd::Lcd)
//! opens once when it is created and closes once when it is torn down.

use embedded_hal::digital::OutputPin;

/// Process wide GPIO subsystem
pub trait GpioController {
    /// Pin handle this controller hands out
    type Pin: OutputPin;
    /// Error returned when the subsystem can't be opened
    type Error;

    /// Acquire the GPIO subsystem
    fn open(&mut self) -> Result<(), Self::Error>;

    /// Put `pin` in output mode
    fn set_output(&mut self, pin: &mut Self::Pin);

    /// Release the GPIO subsystem
    fn close(&mut self);
}

/// Every line the driver owns
///
/// `data` holds D0..D7 in 8 pin mode, and D4..D7 in 4 pin mode,
/// lowest bit first.
pub struct Pins<Pin, const PIN_CNT: usize> {
    #[allow(missing_docs)]
    pub rs: Pin,
    #[allow(missing_docs)]
    pub en: Pin,
    #[allow(missing_docs)]
    pub backlight: Pin,
    #[allow(missing_docs)]
    pub data: [Pin; PIN_CNT],
}

impl<Pin, const PIN_CNT: usize> Pins<Pin, PIN_CNT> {
    /// Bind an arbitrary number of data pins, checked against the configured
    /// [`DataWidth`](crate::command::DataWidth) when the [`Lcd`](crate::lcd::Lcd) is created
    pub fn new(rs: Pin, en: Pin, backlight: Pin, data: [Pin; PIN_CNT]) -> Self {
        Self {
            rs,
            en,
            backlight,
            data,
        }
    }
}

impl<Pin> Pins<Pin, 4> {
    #[allow(missing_docs)]
    pub fn new_4pin(rs: Pin, en: Pin, backlight: Pin, db4: Pin, db5: Pin, db6: Pin, db7: Pin) -> Self {
        Self::new(rs, en, backlight, [db4, db5, db6, db7])
    }
}

impl<Pin> Pins<Pin, 8> {
    #[allow(missing_docs)]
    #[allow(clippy::too_many_arguments)]
    pub fn new_8pin(
        rs: Pin,
        en: Pin,
        backlight: Pin,
        db0: Pin,
        db1: Pin,
        db2: Pin,
        db3: Pin,
        db4: Pin,
        db5: Pin,
        db6: Pin,
        db7: Pin,
    ) -> Self {
        Self::new(
            rs,
            en,
            backlight,
            [db0, db1, db2, db3, db4, db5, db6, db7],
        )
    }
}
