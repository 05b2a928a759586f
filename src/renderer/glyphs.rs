//! 1-bit bitmap glyphs and fonts for the staff page.
//!
//! Glyph bitmaps are packed MSB-first, one row per line of source, each row
//! padded to whole bytes, so the binary literals read as the artwork.
//! `offset` is the top-left corner relative to the anchor point the glyph
//! is drawn at.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::image::ImageRaw;
use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_9X15};
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::BinaryColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub name: &'static str,
    data: &'static [u8],
    width: u32,
    pub offset: Point,
}

impl Glyph {
    pub fn width(&self) -> i32 {
        self.width as i32
    }

    pub fn height(&self) -> i32 {
        (self.data.len() / self.width.div_ceil(8) as usize) as i32
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height() as u32)
    }

    pub fn image(&self) -> ImageRaw<'static, BinaryColor> {
        ImageRaw::new(self.data, self.width)
    }
}

// Anchored on the notehead centre.
pub const NOTEHEAD: Glyph = Glyph {
    name: "notehead",
    data: &[
        0b0001_1110, 0b0000_0000,
        0b0111_1111, 0b0000_0000,
        0b1111_1111, 0b0000_0000,
        0b1111_1111, 0b1000_0000,
        0b0111_1111, 0b1000_0000,
        0b0111_1111, 0b0000_0000,
        0b0011_1100, 0b0000_0000,
    ],
    width: 9,
    offset: Point::new(-4, -3),
};

// Anchored on the centre of the notehead it modifies.
pub const SHARP: Glyph = Glyph {
    name: "sharp",
    data: &[
        0b0101_0000,
        0b0101_0000,
        0b1111_1000,
        0b0101_0000,
        0b0101_0000,
        0b0101_0000,
        0b1111_1000,
        0b0101_0000,
        0b0101_0000,
    ],
    width: 5,
    offset: Point::new(-11, -4),
};

pub const FLAT: Glyph = Glyph {
    name: "flat",
    data: &[
        0b1000_0000,
        0b1000_0000,
        0b1000_0000,
        0b1000_0000,
        0b1010_0000,
        0b1101_0000,
        0b1001_0000,
        0b1010_0000,
        0b1100_0000,
    ],
    width: 4,
    offset: Point::new(-10, -6),
};

// Anchored on the G line (second line from the bottom).
pub const TREBLE_CLEF: Glyph = Glyph {
    name: "treble-clef",
    data: &[
        0b0000_1100,
        0b0001_0010,
        0b0001_0010,
        0b0001_0100,
        0b0001_1000,
        0b0001_0000,
        0b0011_0000,
        0b0101_0000,
        0b1001_0000,
        0b1001_1110,
        0b1011_0011,
        0b1010_1001,
        0b1001_0001,
        0b0101_0010,
        0b0011_1100,
        0b0001_0000,
        0b0001_0000,
        0b0101_0000,
        0b1001_0000,
        0b1001_0000,
        0b0110_0000,
    ],
    width: 8,
    offset: Point::new(0, -11),
};

// Anchored on the F line (second line from the top).
pub const BASS_CLEF: Glyph = Glyph {
    name: "bass-clef",
    data: &[
        0b0111_1000, 0b0000_0000,
        0b1000_0100, 0b1000_0000,
        0b1100_0010, 0b0000_0000,
        0b1100_0010, 0b1000_0000,
        0b0000_0010, 0b0000_0000,
        0b0000_0100, 0b0000_0000,
        0b0000_1000, 0b0000_0000,
        0b0011_0000, 0b0000_0000,
        0b1100_0000, 0b0000_0000,
    ],
    width: 9,
    offset: Point::new(0, -2),
};

// ── Fonts ───────────────────────────────────────────────────────────

/// Menu and overlay text: 6×8 cells.
pub const SMALL_FONT: MonoFont<'static> = MonoFont { character_spacing: 1, ..FONT_5X8 };

/// Note names: 12×16 cells.
pub const LARGE_FONT: MonoFont<'static> = MonoFont { character_spacing: 3, ..FONT_9X15 };

/// Font for a text size of 1 (small) or 2 and above (large).
pub fn font_for_scale(scale: u8) -> &'static MonoFont<'static> {
    if scale >= 2 {
        &LARGE_FONT
    } else {
        &SMALL_FONT
    }
}

/// Horizontal advance of one character at `scale`.
pub fn char_advance(scale: u8) -> i32 {
    let font = font_for_scale(scale);
    (font.character_size.width + font.character_spacing) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_data_fills_whole_rows() {
        for glyph in [NOTEHEAD, SHARP, FLAT, TREBLE_CLEF, BASS_CLEF] {
            let row_bytes = glyph.width.div_ceil(8) as usize;
            assert!(glyph.width > 0, "{} is empty", glyph.name);
            assert_eq!(glyph.data.len() % row_bytes, 0, "{} has a ragged row", glyph.name);
        }
        assert_eq!(NOTEHEAD.size(), Size::new(9, 7));
        assert_eq!(TREBLE_CLEF.size(), Size::new(8, 21));
        assert_eq!(BASS_CLEF.size(), Size::new(9, 9));
    }

    #[test]
    fn accidentals_sit_left_of_the_notehead() {
        for glyph in [SHARP, FLAT] {
            assert!(glyph.offset.x + glyph.width() <= NOTEHEAD.offset.x, "{}", glyph.name);
        }
    }

    #[test]
    fn fonts_match_the_panel_text_cells() {
        assert_eq!(char_advance(1), 6);
        assert_eq!(SMALL_FONT.character_size.height, 8);
        assert_eq!(char_advance(2), 12);
        assert!(LARGE_FONT.character_size.height <= 16);
    }
}
