//! Notehead and accidental placement.

use super::canvas::Canvas;
use super::constants::*;
use super::dirty::DirtyRegion;
use super::glyphs::{Glyph, FLAT, NOTEHEAD, SHARP};
use crate::model::{Accidental, StavePosition};

/// Panel row of the centre of a note at `position` (half line spacing per step).
pub(super) fn note_screen_y(position: StavePosition) -> i32 {
    screen_y(STAFF_Y_START + (STAFF_LINE_SPACING / 2) * position)
}

fn blit<C: Canvas>(canvas: &mut C, x: i32, y: i32, glyph: &Glyph, area: &mut DirtyRegion) {
    let left = x + glyph.offset.x;
    let top = y + glyph.offset.y;
    canvas.draw_glyph(left, top, glyph, NOTE_COLOUR);
    area.add_rect(left, top, glyph.width(), glyph.height());
}

/// Draw a notehead centred on column `x` at `position`.
pub(super) fn draw_note<C: Canvas>(
    canvas: &mut C,
    x: i32,
    position: StavePosition,
    area: &mut DirtyRegion,
) {
    blit(canvas, x, note_screen_y(position), &NOTEHEAD, area);
}

/// Draw the accidental just left of the notehead at column `x`.
/// Naturals draw nothing and return false.
pub(super) fn draw_accidental<C: Canvas>(
    canvas: &mut C,
    x: i32,
    position: StavePosition,
    accidental: Accidental,
    area: &mut DirtyRegion,
) -> bool {
    let glyph = match accidental {
        Accidental::Sharp => &SHARP,
        Accidental::Flat => &FLAT,
        Accidental::Natural => return false,
    };
    blit(canvas, x, note_screen_y(position), glyph, area);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::canvas::{DrawOp, RecordingCanvas};

    #[test]
    fn notehead_is_centred_on_its_line() {
        let mut canvas = RecordingCanvas::new(PANEL_WIDTH, PANEL_HEIGHT);
        let mut area = DirtyRegion::new(PANEL_WIDTH, PANEL_HEIGHT);
        draw_note(&mut canvas, 47, 0, &mut area);
        assert_eq!(
            canvas.ops(),
            &[DrawOp::Glyph { glyph: "notehead", x: 43, y: 92, width: 9, height: 7, colour: NOTE_COLOUR }]
        );
        assert_eq!((area.x(), area.y(), area.width(), area.height()), (43, 92, 9, 7));
        // centre row of the head is fully inked across the line
        assert_eq!(canvas.pixel(47, line_screen_y(0)), NOTE_COLOUR);
    }

    #[test]
    fn natural_draws_nothing() {
        let mut canvas = RecordingCanvas::new(PANEL_WIDTH, PANEL_HEIGHT);
        let mut area = DirtyRegion::new(PANEL_WIDTH, PANEL_HEIGHT);
        assert!(!draw_accidental(&mut canvas, 47, 3, Accidental::Natural, &mut area));
        assert!(canvas.ops().is_empty());
        assert!(!area.is_valid());
    }

    #[test]
    fn sharp_grows_the_area_to_the_left() {
        let mut canvas = RecordingCanvas::new(PANEL_WIDTH, PANEL_HEIGHT);
        let mut area = DirtyRegion::new(PANEL_WIDTH, PANEL_HEIGHT);
        draw_note(&mut canvas, 47, 2, &mut area);
        assert!(draw_accidental(&mut canvas, 47, 2, Accidental::Sharp, &mut area));
        assert_eq!(area.x(), 47 + SHARP.offset.x);
        assert_eq!(area.width(), NOTEHEAD.offset.x + NOTEHEAD.width() - SHARP.offset.x);
    }
}
