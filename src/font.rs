//! Built-in 5x7 bitmap font.
//!
//! Each glyph is seven rows, top to bottom. Only the low five bits of a row
//! are used; bit 4 is the leftmost column.

/// Glyph width in font cells.
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph height in font cells.
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance per character, including one blank spacing column.
pub const ADVANCE: u32 = GLYPH_WIDTH + 1;

type Glyph = [u8; GLYPH_HEIGHT as usize];

const BLANK: Glyph = [0; 7];

const LETTERS: [Glyph; 26] = [
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // L
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100], // Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // Z
];

const DIGITS: [Glyph; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // 2
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // 9
];

/// Look up the bitmap for a character.
///
/// Lowercase letters share the uppercase bitmaps. Returns `None` for
/// characters the font cannot draw; a space is drawable (and blank).
pub fn glyph(c: char) -> Option<&'static Glyph> {
    let c = c.to_ascii_uppercase();
    match c {
        'A'..='Z' => Some(&LETTERS[(c as u8 - b'A') as usize]),
        '0'..='9' => Some(&DIGITS[(c as u8 - b'0') as usize]),
        ' ' => Some(&BLANK),
        '.' => Some(&[0, 0, 0, 0, 0, 0b01100, 0b01100]),
        ',' => Some(&[0, 0, 0, 0, 0b01100, 0b00100, 0b01000]),
        '!' => Some(&[0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0, 0b00100]),
        '?' => Some(&[0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0, 0b00100]),
        '-' => Some(&[0, 0, 0, 0b11111, 0, 0, 0]),
        '\'' => Some(&[0b01100, 0b00100, 0b01000, 0, 0, 0, 0]),
        ':' => Some(&[0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0]),
        '&' => Some(&[0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101]),
        _ => None,
    }
}

/// Whether the cell at (`col`, `row`) of a glyph is lit.
#[inline]
pub fn is_lit(glyph: &Glyph, col: u32, row: u32) -> bool {
    col < GLYPH_WIDTH
        && row < GLYPH_HEIGHT
        && glyph[row as usize] & (1 << (GLYPH_WIDTH - 1 - col)) != 0
}
