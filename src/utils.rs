//! Bit helpers shared by the mask table and the bus writer

use crate::command::State;

/// The state of a single bit in a byte
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitState {
    /// Bit is 0
    Clear,
    /// Bit is 1
    Set,
}

impl From<State> for BitState {
    fn from(state: State) -> Self {
        match state {
            State::Off => BitState::Clear,
            State::On => BitState::Set,
        }
    }
}

impl From<BitState> for State {
    fn from(bit: BitState) -> Self {
        match bit {
            BitState::Clear => State::Off,
            BitState::Set => State::On,
        }
    }
}

/// Simple bit ops on a register-sized value
pub trait BitOps {
    #[allow(missing_docs)]
    fn set_bit(&mut self, pos: u8) -> Self;
    #[allow(missing_docs)]
    fn clear_bit(&mut self, pos: u8) -> Self;
    #[allow(missing_docs)]
    fn check_bit(&self, pos: u8) -> BitState;

    /// Set or clear the bit at `pos` according to `state`, return the new value
    fn put_bit(&mut self, pos: u8, state: BitState) -> Self;
}

impl BitOps for u8 {
    fn set_bit(&mut self, pos: u8) -> Self {
        assert!(pos <= 7, "bit offset larger than 7");
        *self |= 1u8 << pos;
        *self
    }

    fn clear_bit(&mut self, pos: u8) -> Self {
        assert!(pos <= 7, "bit offset larger than 7");
        *self &= !(1u8 << pos);
        *self
    }

    fn check_bit(&self, pos: u8) -> BitState {
        assert!(pos <= 7, "bit offset larger than 7");

        match (*self >> pos) & 1 == 1 {
            true => BitState::Set,
            false => BitState::Clear,
        }
    }

    fn put_bit(&mut self, pos: u8, state: BitState) -> Self {
        match state {
            BitState::Set => self.set_bit(pos),
            BitState::Clear => self.clear_bit(pos),
        }
    }
}
