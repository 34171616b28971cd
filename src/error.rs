//! Errors returned while bringing up a display

use core::fmt;

use crate::command::DataWidth;

/// A [`Config`](crate::lcd::Config) / [`Pins`](crate::gpio::Pins) combination the controller can't run with
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Only 1 or 2 rows are supported
    RowCount(u8),
    /// Columns must be within 1..=40
    ColumnCount(u8),
    /// 5x11 dots is a single row font
    FontNeedsOneRow,
    /// Data pin count is neither 4 nor 8
    UnsupportedPinCount(usize),
    /// Data pin count doesn't match the configured width
    PinCountMismatch {
        #[allow(missing_docs)]
        width: DataWidth,
        #[allow(missing_docs)]
        pins: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::RowCount(rows) => {
                write!(f, "number of rows must be 1 or 2, got {rows}")
            }
            ConfigError::ColumnCount(columns) => {
                write!(f, "number of columns must be within 1..=40, got {columns}")
            }
            ConfigError::FontNeedsOneRow => {
                write!(f, "5x11 dot characters are not supported on multi-line displays")
            }
            ConfigError::UnsupportedPinCount(pins) => {
                write!(f, "number of data pins must be 4 or 8, got {pins}")
            }
            ConfigError::PinCountMismatch { width, pins } => write!(
                f,
                "{width:?} mode needs {} data pins, got {pins}",
                width.pin_count()
            ),
        }
    }
}

/// Reason an [`Lcd`](crate::lcd::Lcd) couldn't be created
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error<E> {
    /// Rejected before any pin was touched
    Config(ConfigError),
    /// [`GpioController::open`](crate::gpio::GpioController::open) failed
    Gpio(E),
}

impl<E> From<ConfigError> for Error<E> {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(err) => write!(f, "invalid configuration: {err}"),
            Error::Gpio(err) => write!(f, "failed to open GPIO: {err:?}"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::Config(err) => defmt::write!(fmt, "invalid configuration: {}", err),
            Error::Gpio(_e) => defmt::write!(fmt, "failed to open GPIO"),
        }
    }
}

/// [`Lcd::try_set_cursor`](crate::lcd::Lcd::try_set_cursor) target outside the display
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionError {
    #[allow(missing_docs)]
    pub row: u8,
    #[allow(missing_docs)]
    pub col: u8,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cursor position ({}, {}) is outside the display", self.row, self.col)
    }
}
