use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    charset::{Charset, Rom0A},
    command::{DataWidth, Font, Instruction, MaskTable, State},
    error::{ConfigError, Error},
    gpio::{GpioController, Pins},
    lcd::Lcd,
    sender::ParallelSender,
    timing::SETTLE_US,
};

/// Display geometry and wiring of a [`Lcd`]
///
/// Defaults to the common 16x2 module, 5x8 dots, on a 4 line bus.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    rows: u8,
    columns: u8,
    font: Font,
    data_width: DataWidth,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 2,
            columns: 16,
            font: Font::Font5x8,
            data_width: DataWidth::Bit4,
        }
    }
}

#[allow(missing_docs)]
impl Config {
    pub fn get_rows(&self) -> u8 {
        self.rows
    }

    pub fn set_rows(mut self, rows: u8) -> Self {
        self.rows = rows;
        self
    }

    pub fn get_columns(&self) -> u8 {
        self.columns
    }

    pub fn set_columns(mut self, columns: u8) -> Self {
        self.columns = columns;
        self
    }

    pub fn get_font(&self) -> Font {
        self.font
    }

    pub fn set_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn get_data_width(&self) -> DataWidth {
        self.data_width
    }

    pub fn set_data_width(mut self, data_width: DataWidth) -> Self {
        self.data_width = data_width;
        self
    }

    /// Check geometry and font, without looking at any pin
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=2).contains(&self.rows) {
            return Err(ConfigError::RowCount(self.rows));
        }

        if !(1..=40).contains(&self.columns) {
            return Err(ConfigError::ColumnCount(self.columns));
        }

        if self.font == Font::Font5x11 && self.rows > 1 {
            return Err(ConfigError::FontNeedsOneRow);
        }

        Ok(())
    }

    /// Check that `pins` data lines fit the configured width
    pub fn validate_pins(&self, pins: usize) -> Result<(), ConfigError> {
        if pins != 4 && pins != 8 {
            return Err(ConfigError::UnsupportedPinCount(pins));
        }

        if pins != self.data_width.pin_count() {
            return Err(ConfigError::PinCountMismatch {
                width: self.data_width,
                pins,
            });
        }

        Ok(())
    }
}

impl<Gpio, Delayer, const PIN_CNT: usize> Lcd<Gpio, Delayer, PIN_CNT, Rom0A>
where
    Gpio: GpioController,
    Delayer: DelayNs,
{
    /// Create a [`Lcd`] with the ST7066U-0A character table, and init LCD hardware
    pub fn new(
        gpio: Gpio,
        delayer: Delayer,
        pins: Pins<Gpio::Pin, PIN_CNT>,
        config: Config,
    ) -> Result<Self, Error<Gpio::Error>> {
        Self::with_charset(gpio, delayer, pins, config, Rom0A)
    }
}

impl<Gpio, Delayer, const PIN_CNT: usize, Chars> Lcd<Gpio, Delayer, PIN_CNT, Chars>
where
    Gpio: GpioController,
    Delayer: DelayNs,
    Chars: Charset,
{
    /// Create a [`Lcd`] with a custom [`Charset`], and init LCD hardware
    ///
    /// Nothing is touched when `config` or the pin count is invalid.
    /// If the GPIO can't be opened its error is returned as is.
    pub fn with_charset(
        mut gpio: Gpio,
        delayer: Delayer,
        pins: Pins<Gpio::Pin, PIN_CNT>,
        config: Config,
        charset: Chars,
    ) -> Result<Self, Error<Gpio::Error>> {
        config.validate()?;
        config.validate_pins(PIN_CNT)?;

        gpio.open().map_err(Error::Gpio)?;

        let Pins {
            mut rs,
            mut en,
            mut backlight,
            mut data,
        } = pins;

        gpio.set_output(&mut rs);
        gpio.set_output(&mut en);
        data.iter_mut().for_each(|pin| gpio.set_output(pin));
        gpio.set_output(&mut backlight);

        let mut lcd = Lcd {
            gpio,
            delayer,
            sender: ParallelSender::new(rs, en, data),
            backlight_pin: backlight,
            masks: MaskTable::new(&config),
            config,
            charset,
            backlight: State::Off,
        };

        lcd.init();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "st7066u ready: {}x{}, {}",
            lcd.config.get_columns(),
            lcd.config.get_rows(),
            lcd.config.get_data_width()
        );

        Ok(lcd)
    }

    // the two setup instructions, then a clear
    fn init(&mut self) {
        self.send(self.masks.command(Instruction::FunctionSet));
        self.delayer.delay_us(SETTLE_US);

        self.send(self.masks.command(Instruction::DisplayControl));
        self.delayer.delay_us(SETTLE_US);

        self.clean_display();
    }

    /// Blank and switch off the display, pull every line low, close the GPIO
    ///
    /// Returns everything the [`Lcd`] was built from, so the pins can be reused.
    pub fn close(mut self) -> (Gpio, Delayer, Pins<Gpio::Pin, PIN_CNT>) {
        self.clean_display();
        self.set_display_state(State::Off);
        self.set_backlight(State::Off);

        self.sender.release();
        self.backlight_pin.set_low().ok();

        self.gpio.close();

        #[cfg(feature = "defmt")]
        defmt::debug!("st7066u closed");

        let Lcd {
            gpio,
            delayer,
            sender,
            backlight_pin,
            ..
        } = self;
        let (rs, en, data) = sender.into_parts();

        (gpio, delayer, Pins::new(rs, en, backlight_pin, data))
    }
}
