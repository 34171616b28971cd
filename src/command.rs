//! Instruction encoding for the ST7066U
//!
//! Single-shot instructions (Clear Display, Return Home, Set DDRAM address,
//! data writes) are built from [`CommandSet`]. The four instructions that carry
//! feature bits live in a [`MaskTable`], which keeps their current value and
//! updates one bit at a time.

use crate::{
    lcd::Config,
    utils::BitOps,
};

/// On/off state of a display feature
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    #[allow(missing_docs)]
    Off,
    #[allow(missing_docs)]
    #[default]
    On,
}

impl From<bool> for State {
    fn from(on: bool) -> Self {
        match on {
            true => State::On,
            false => State::Off,
        }
    }
}

/// Number of data lines wired between the host and the controller
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataWidth {
    /// D4..D7 only, every byte goes out as two nibbles
    #[default]
    Bit4,
    /// D0..D7, one byte per enable pulse
    Bit8,
}

impl DataWidth {
    /// Number of data pins this width needs
    pub const fn pin_count(self) -> usize {
        match self {
            DataWidth::Bit4 => 4,
            DataWidth::Bit8 => 8,
        }
    }
}

/// Character dot format
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    #[allow(missing_docs)]
    #[default]
    Font5x8,
    /// Only available on single row displays
    Font5x11,
}

/// Level of the RS line during a write
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterSelection {
    /// RS low, the byte is an instruction
    Command,
    /// RS high, the byte goes to DDRAM/CGRAM at the address counter
    Data,
}

/// A byte ready to put on the bus
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    rs: RegisterSelection,
    bits: u8,
}

impl Command {
    pub(crate) const fn new(rs: RegisterSelection, bits: u8) -> Self {
        Self { rs, bits }
    }

    /// Register the byte is written to
    pub fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    /// Raw byte
    pub fn get_bits(&self) -> u8 {
        self.bits
    }
}

/// Instructions whose encoding doesn't depend on driver state
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandSet {
    /// Blank DDRAM and put the address counter to 0
    ClearDisplay,
    /// Address counter to 0, undo any display shift
    ReturnHome,
    /// Move the cursor one position left
    CursorShiftLeft,
    /// Point the address counter at a DDRAM address
    SetDDRAM(u8),
    /// Write a glyph code at the address counter
    WriteDataToRAM(u8),
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => Self::new(RegisterSelection::Command, 0b0000_0001),

            CommandSet::ReturnHome => Self::new(RegisterSelection::Command, 0b0000_0010),

            CommandSet::CursorShiftLeft => Self::new(RegisterSelection::Command, 0b0001_0000),

            CommandSet::SetDDRAM(addr) => {
                assert!(addr < 2u8.pow(7), "DDRAM address out of range");

                Self::new(RegisterSelection::Command, 0b1000_0000 | addr)
            }

            CommandSet::WriteDataToRAM(data) => Self::new(RegisterSelection::Data, data),
        }
    }
}

/// Instructions kept in the [`MaskTable`]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Instruction {
    /// Address counter direction and display shift on write
    EntryMode,
    /// Display, cursor and cursor blink
    DisplayControl,
    /// Cursor or display shift
    DisplayShift,
    /// Interface width, line count and font
    FunctionSet,
}

impl Instruction {
    /// The fixed opcode bit of this instruction
    pub const fn opcode(self) -> u8 {
        match self {
            Instruction::EntryMode => 0b0000_0100,
            Instruction::DisplayControl => 0b0000_1000,
            Instruction::DisplayShift => 0b0001_0000,
            Instruction::FunctionSet => 0b0010_0000,
        }
    }

    // feature bits always sit below the opcode bit
    const fn feature_bits(self) -> u8 {
        self.opcode() - 1
    }
}

/// Feature bits of the Display On/Off Control instruction
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayFlag {
    #[allow(missing_docs)]
    Display,
    #[allow(missing_docs)]
    Cursor,
    #[allow(missing_docs)]
    CursorBlink,
}

impl DisplayFlag {
    const fn bit(self) -> u8 {
        match self {
            DisplayFlag::Display => 2,
            DisplayFlag::Cursor => 1,
            DisplayFlag::CursorBlink => 0,
        }
    }
}

/// Current value of every multi-bit instruction
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MaskTable {
    entry_mode: u8,
    display_control: u8,
    display_shift: u8,
    function_set: u8,
}

impl MaskTable {
    /// Power-on masks for a display with this configuration
    pub fn new(config: &Config) -> Self {
        let mut function_set = Instruction::FunctionSet.opcode();

        if config.get_data_width() == DataWidth::Bit8 {
            function_set.set_bit(4);
        }

        if config.get_rows() == 2 {
            function_set.set_bit(3);
        }

        if config.get_font() == Font::Font5x11 {
            function_set.set_bit(2);
        }

        Self {
            // increment, no display shift
            entry_mode: Instruction::EntryMode.opcode(),
            display_control: Instruction::DisplayControl.opcode() | (1 << DisplayFlag::Display.bit()),
            // cursor shift, rightward
            display_shift: Instruction::DisplayShift.opcode() | 0b0100,
            function_set,
        }
    }

    /// Current value of `instruction`
    pub fn get(&self, instruction: Instruction) -> u8 {
        match instruction {
            Instruction::EntryMode => self.entry_mode,
            Instruction::DisplayControl => self.display_control,
            Instruction::DisplayShift => self.display_shift,
            Instruction::FunctionSet => self.function_set,
        }
    }

    /// Set or clear one feature bit of `instruction`, return the updated byte
    ///
    /// Panics if `pos` points at the opcode bit or above.
    pub fn update(&mut self, instruction: Instruction, pos: u8, state: State) -> u8 {
        assert!(
            (1u8 << pos) & instruction.feature_bits() != 0,
            "bit is not a feature bit of this instruction"
        );

        let slot = match instruction {
            Instruction::EntryMode => &mut self.entry_mode,
            Instruction::DisplayControl => &mut self.display_control,
            Instruction::DisplayShift => &mut self.display_shift,
            Instruction::FunctionSet => &mut self.function_set,
        };

        slot.put_bit(pos, state.into())
    }

    /// Switch one of the display control features, return the updated byte
    pub fn set_display_flag(&mut self, flag: DisplayFlag, state: State) -> u8 {
        self.update(Instruction::DisplayControl, flag.bit(), state)
    }

    /// Read one of the display control features
    pub fn get_display_flag(&self, flag: DisplayFlag) -> State {
        self.display_control.check_bit(flag.bit()).into()
    }

    /// Wrap the current value of `instruction` for the bus
    pub fn command(&self, instruction: Instruction) -> Command {
        Command::new(RegisterSelection::Command, self.get(instruction))
    }
}
