//! Character to CGROM code translation

/// Maps a [`char`] to the glyph code the controller should display
///
/// Implementations must be total: characters with no glyph map to some
/// fallback code rather than failing.
pub trait Charset {
    #[allow(missing_docs)]
    fn encode(&self, char: char) -> u8;
}

impl<F> Charset for F
where
    F: Fn(char) -> u8,
{
    fn encode(&self, char: char) -> u8 {
        self(char)
    }
}

/// Glyph drawn for characters outside the font, a full 5x8 block
pub const FALLBACK_GLYPH: u8 = 0xFF;

/// ST7066U-0A CGROM (English/Japanese)
///
/// Printable ASCII maps to itself, except `\` and `~`, whose codes hold `¥`
/// and `→` in this ROM. A handful of Greek letters and symbols from the upper
/// half are mapped too.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rom0A;

impl Charset for Rom0A {
    fn encode(&self, char: char) -> u8 {
        match char {
            '\\' | '~' => FALLBACK_GLYPH,
            ' '..='}' => char as u8,
            '¥' => 0x5C,
            '→' => 0x7E,
            '←' => 0x7F,
            '°' => 0xDF,
            'α' => 0xE0,
            'ä' => 0xE1,
            'β' => 0xE2,
            'ε' => 0xE3,
            'μ' | 'µ' => 0xE4,
            'σ' => 0xE5,
            'ρ' => 0xE6,
            '√' => 0xE8,
            'ö' => 0xEF,
            'θ' => 0xF2,
            '∞' => 0xF3,
            'Ω' => 0xF4,
            'ü' => 0xF5,
            'Σ' => 0xF6,
            'π' => 0xF7,
            '÷' => 0xFD,
            '█' => 0xFF,
            _ => FALLBACK_GLYPH,
        }
    }
}
