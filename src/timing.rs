//! Fixed delays around every EN transition.
//!
//! The driver never reads the busy flag back, so each value is the worst case
//! the ST7066U needs before it can latch the next nibble or instruction.

/// Setup time before EN rises, and hold time before EN falls.
pub const ENABLE_DELAY_US: u32 = 1;

/// Wait after every EN falling edge, long enough for any ordinary instruction.
pub const SETTLE_US: u32 = 70;

/// Additional wait after a Clear Display instruction.
pub const CLEAR_SETTLE_US: u32 = SETTLE_US * 100;
