use core::fmt;

use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    charset::Charset,
    command::{Command, CommandSet, DisplayFlag, Instruction, State},
    error::PositionError,
    gpio::GpioController,
    timing::CLEAR_SETTLE_US,
};

use super::{Config, Lcd};

impl<Gpio, Delayer, const PIN_CNT: usize, Chars> Lcd<Gpio, Delayer, PIN_CNT, Chars>
where
    Gpio: GpioController,
    Delayer: DelayNs,
    Chars: Charset,
{
    pub(super) fn send(&mut self, command: impl Into<Command>) {
        self.sender.send(command, &mut self.delayer);
    }

    /// Blank the display and put the cursor at (0, 0)
    pub fn clean_display(&mut self) {
        self.send(CommandSet::ClearDisplay);
        self.delayer.delay_us(CLEAR_SETTLE_US);
    }

    /// Put the cursor at (0, 0) and undo any display shift
    pub fn return_home(&mut self) {
        self.send(CommandSet::ReturnHome);
    }

    #[allow(missing_docs)]
    pub fn set_display_state(&mut self, display: State) {
        self.update_display_flag(DisplayFlag::Display, display);
    }

    #[allow(missing_docs)]
    pub fn get_display_state(&self) -> State {
        self.masks.get_display_flag(DisplayFlag::Display)
    }

    #[allow(missing_docs)]
    pub fn set_cursor_state(&mut self, cursor: State) {
        self.update_display_flag(DisplayFlag::Cursor, cursor);
    }

    #[allow(missing_docs)]
    pub fn get_cursor_state(&self) -> State {
        self.masks.get_display_flag(DisplayFlag::Cursor)
    }

    #[allow(missing_docs)]
    pub fn set_cursor_blink_state(&mut self, blink: State) {
        self.update_display_flag(DisplayFlag::CursorBlink, blink);
    }

    #[allow(missing_docs)]
    pub fn get_cursor_blink_state(&self) -> State {
        self.masks.get_display_flag(DisplayFlag::CursorBlink)
    }

    fn update_display_flag(&mut self, flag: DisplayFlag, state: State) {
        self.masks.set_display_flag(flag, state);
        self.send(self.masks.command(Instruction::DisplayControl));
    }

    /// Move the cursor `steps` positions to the left
    pub fn move_cursor_left(&mut self, steps: u8) {
        (0..steps).for_each(|_| self.send(CommandSet::CursorShiftLeft));
    }

    /// Move the cursor `steps` positions to the right
    pub fn move_cursor_right(&mut self, steps: u8) {
        let shift = self.masks.command(Instruction::DisplayShift);
        (0..steps).for_each(|_| self.send(shift));
    }

    /// Move the cursor to `row`, `col`, both counted from 0
    ///
    /// A position outside the configured geometry is silently ignored,
    /// use [`Lcd::try_set_cursor_pos`] to be told about it.
    pub fn set_cursor_pos(&mut self, row: u8, col: u8) {
        if self.try_set_cursor_pos(row, col).is_err() {
            #[cfg(feature = "defmt")]
            defmt::trace!("cursor position ({}, {}) ignored", row, col);
        }
    }

    /// Move the cursor to `row`, `col`, or report that it's off the display
    pub fn try_set_cursor_pos(&mut self, row: u8, col: u8) -> Result<(), PositionError> {
        if row >= self.config.get_rows() || col >= self.config.get_columns() {
            return Err(PositionError { row, col });
        }

        // the second line starts at 0x40 whatever the column count
        self.send(CommandSet::SetDDRAM(0x40 * row + col));
        Ok(())
    }

    /// Write a glyph code at the cursor, no translation
    pub fn write_u8_to_cur(&mut self, byte: u8) {
        self.send(CommandSet::WriteDataToRAM(byte));
    }

    /// Write a byte at the cursor, translated as if it were a Latin-1 character
    pub fn write_byte_to_cur(&mut self, byte: u8) {
        self.write_char_to_cur(byte as char);
    }

    #[allow(missing_docs)]
    pub fn write_char_to_cur(&mut self, char: char) {
        let code = self.charset.encode(char);
        self.write_u8_to_cur(code);
    }

    /// Write text from the cursor on, the controller advances the address itself
    pub fn write_str_to_cur(&mut self, str: &str) {
        str.chars().for_each(|char| self.write_char_to_cur(char));
    }

    #[allow(missing_docs)]
    pub fn write_str_to_pos(&mut self, str: &str, row: u8, col: u8) {
        self.set_cursor_pos(row, col);
        self.write_str_to_cur(str);
    }

    /// Drive the backlight line, nothing is sent to the controller
    pub fn set_backlight(&mut self, backlight: State) {
        match backlight {
            State::On => self.backlight_pin.set_high().ok(),
            State::Off => self.backlight_pin.set_low().ok(),
        };
        self.backlight = backlight;
    }

    /// Last state passed to [`Lcd::set_backlight`], `Off` until then
    pub fn get_backlight(&self) -> State {
        self.backlight
    }

    #[allow(missing_docs)]
    pub fn get_config(&self) -> Config {
        self.config
    }

    /// Current value of one of the multi-bit instructions
    pub fn get_mask(&self, instruction: Instruction) -> u8 {
        self.masks.get(instruction)
    }
}

impl<Gpio, Delayer, const PIN_CNT: usize, Chars> fmt::Write for Lcd<Gpio, Delayer, PIN_CNT, Chars>
where
    Gpio: GpioController,
    Delayer: DelayNs,
    Chars: Charset,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_str_to_cur(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::fmt::Write;
    use std::{vec, vec::Vec};

    use super::*;
    use crate::{
        charset::Rom0A,
        command::DataWidth,
        test_utils::{Event, Recorder, RecordingDelay, RecordingGpio, BACKLIGHT},
        timing::SETTLE_US,
    };

    fn lcd4(recorder: &Recorder) -> Lcd<RecordingGpio, RecordingDelay, 4> {
        let lcd = Lcd::new(recorder.gpio(), recorder.delay(), recorder.pins(), Config::default())
            .unwrap();
        recorder.clear();
        lcd
    }

    fn lcd8(recorder: &Recorder) -> Lcd<RecordingGpio, RecordingDelay, 8> {
        let config = Config::default().set_data_width(DataWidth::Bit8);
        let lcd = Lcd::new(recorder.gpio(), recorder.delay(), recorder.pins(), config).unwrap();
        recorder.clear();
        lcd
    }

    #[test]
    fn display_toggles_round_trip() {
        let recorder = Recorder::new();
        let mut lcd = lcd4(&recorder);
        let initial = lcd.get_mask(Instruction::DisplayControl);

        lcd.set_cursor_state(State::On);
        lcd.set_cursor_state(State::Off);
        assert_eq!(lcd.get_mask(Instruction::DisplayControl), initial);

        lcd.set_cursor_blink_state(State::On);
        lcd.set_cursor_state(State::On);
        lcd.set_cursor_blink_state(State::Off);
        assert_eq!(lcd.get_cursor_state(), State::On);
        assert_eq!(lcd.get_cursor_blink_state(), State::Off);

        lcd.set_display_state(State::Off);
        lcd.set_display_state(State::On);
        lcd.set_cursor_state(State::Off);
        assert_eq!(lcd.get_mask(Instruction::DisplayControl), initial);

        assert_eq!(
            recorder.writes(4),
            vec![
                (false, 0x0E),
                (false, 0x0C),
                (false, 0x0D),
                (false, 0x0F),
                (false, 0x0E),
                (false, 0x0A),
                (false, 0x0E),
                (false, 0x0C),
            ]
        );
    }

    #[test]
    fn clear_waits_longer_than_home() {
        let recorder = Recorder::new();
        let mut lcd = lcd8(&recorder);

        lcd.clean_display();
        assert_eq!(recorder.pulses(), vec![(false, 0x01)]);
        assert_eq!(recorder.delays().last(), Some(&CLEAR_SETTLE_US));

        recorder.clear();
        lcd.return_home();
        assert_eq!(recorder.pulses(), vec![(false, 0x02)]);
        assert_eq!(recorder.delays().last(), Some(&SETTLE_US));
    }

    #[test]
    fn move_left_repeats_shift() {
        let recorder = Recorder::new();
        let mut lcd = lcd4(&recorder);

        lcd.move_cursor_left(3);

        assert_eq!(recorder.writes(4), vec![(false, 0x10); 3]);
        // two nibbles per step
        assert_eq!(
            recorder.delays().iter().filter(|&&us| us == SETTLE_US).count(),
            6
        );

        recorder.clear();
        lcd.move_cursor_left(0);
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn move_right_uses_shift_mask() {
        let recorder = Recorder::new();
        let mut lcd = lcd8(&recorder);

        lcd.move_cursor_right(2);

        assert_eq!(recorder.pulses(), vec![(false, 0x14); 2]);
    }

    #[test]
    fn cursor_position_encodes_row_offset() {
        let recorder = Recorder::new();
        let mut lcd = lcd8(&recorder);

        lcd.set_cursor_pos(0, 0);
        lcd.set_cursor_pos(0, 15);
        lcd.set_cursor_pos(1, 3);

        assert_eq!(
            recorder.pulses(),
            vec![(false, 0x80), (false, 0x8F), (false, 0xC3)]
        );
    }

    #[test]
    fn out_of_range_cursor_is_ignored() {
        let recorder = Recorder::new();
        let mut lcd = lcd4(&recorder);

        lcd.set_cursor_pos(2, 0);
        lcd.set_cursor_pos(0, 16);
        lcd.set_cursor_pos(255, 255);

        assert!(recorder.events().is_empty());
        assert_eq!(
            lcd.try_set_cursor_pos(1, 16),
            Err(PositionError { row: 1, col: 16 })
        );
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn print_sends_data_in_order() {
        let recorder = Recorder::new();
        let mut lcd = lcd4(&recorder);

        lcd.write_str_to_cur("AB");

        assert_eq!(
            recorder.writes(4),
            vec![(true, Rom0A.encode('A')), (true, Rom0A.encode('B'))]
        );
    }

    #[test]
    fn print_at_positions_first() {
        let recorder = Recorder::new();
        let mut lcd = lcd8(&recorder);

        lcd.write_str_to_pos("hi", 1, 0);

        assert_eq!(
            recorder.pulses(),
            vec![(false, 0xC0), (true, b'h'), (true, b'i')]
        );
    }

    #[test]
    fn single_characters_are_translated() {
        let recorder = Recorder::new();
        let mut lcd = lcd8(&recorder);

        lcd.write_char_to_cur('°');
        lcd.write_byte_to_cur(b'~');
        lcd.write_u8_to_cur(0x01);

        assert_eq!(
            recorder.pulses(),
            vec![(true, 0xDF), (true, 0xFF), (true, 0x01)]
        );
    }

    #[test]
    fn custom_charset_is_used() {
        let recorder = Recorder::new();
        let mut lcd = Lcd::with_charset(
            recorder.gpio(),
            recorder.delay(),
            recorder.pins::<8>(),
            Config::default().set_data_width(DataWidth::Bit8),
            |_: char| -> u8 { 0x2A },
        )
        .unwrap();
        recorder.clear();

        lcd.write_str_to_cur("xyz");

        assert_eq!(recorder.pulses(), vec![(true, 0x2A); 3]);
    }

    #[test]
    fn fmt_write_prints() {
        let recorder = Recorder::new();
        let mut lcd = lcd8(&recorder);

        write!(lcd, "{}C", 21).unwrap();

        let bytes: Vec<u8> = recorder.pulses().into_iter().map(|(_, byte)| byte).collect();
        assert_eq!(bytes, b"21C");
    }

    #[test]
    fn backlight_bypasses_the_bus() {
        let recorder = Recorder::new();
        let mut lcd = lcd4(&recorder);
        assert_eq!(lcd.get_backlight(), State::Off);

        lcd.set_backlight(State::On);
        lcd.set_backlight(State::Off);

        assert_eq!(
            recorder.events(),
            vec![Event::High(BACKLIGHT), Event::Low(BACKLIGHT)]
        );
        assert_eq!(lcd.get_backlight(), State::Off);
    }
}
