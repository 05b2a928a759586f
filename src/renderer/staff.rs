//! Staff lines, ledger lines and the static staff page.

use super::canvas::Canvas;
use super::constants::*;
use super::dirty::DirtyRegion;
use super::glyphs::{Glyph, BASS_CLEF, TREBLE_CLEF};
use super::layout::LedgerLines;
use crate::model::{Clef, Colour, Side};

// ═══════════════════════════════════════════════════════════════════════
// Staff lines
// ═══════════════════════════════════════════════════════════════════════

/// Draw staff lines `lines` (0 = bottom line) from `x` over `width` pixels,
/// optionally recording them in `area`. Lines whose row is off the panel
/// are skipped and not recorded. Returns the number drawn.
pub(super) fn draw_staff_lines<C: Canvas>(
    canvas: &mut C,
    lines: impl IntoIterator<Item = i32>,
    x: i32,
    width: i32,
    colour: Colour,
    mut area: Option<&mut DirtyRegion>,
) -> usize {
    let (_, panel_height) = canvas.size();
    let mut drawn = 0;
    for line in lines {
        let y = line_screen_y(line);
        if !(0..panel_height).contains(&y) {
            continue;
        }
        canvas.draw_hline(x, y, width, colour);
        if let Some(area) = area.as_deref_mut() {
            area.add_rect(x, y, width, 1);
        }
        drawn += 1;
    }
    drawn
}

/// Restore the part of the five staff lines that an erase of `region`
/// wiped out. Lines outside the region's rows were never touched.
pub(super) fn redraw_staff_under<C: Canvas>(canvas: &mut C, region: &DirtyRegion) -> usize {
    let lines = (0..STAFF_LINE_COUNT).filter(|&line| region.contains_row(line_screen_y(line)));
    draw_staff_lines(canvas, lines, region.x(), region.width(), STAFF_COLOUR, None)
}

pub(super) fn draw_ledger_lines<C: Canvas>(
    canvas: &mut C,
    side: Side,
    ledger: LedgerLines,
    area: &mut DirtyRegion,
) -> usize {
    draw_staff_lines(
        canvas,
        ledger.line_indices(),
        LEDGER_X[side.index()],
        LEDGER_WIDTH,
        LEDGER_COLOUR,
        Some(area),
    )
}

// ═══════════════════════════════════════════════════════════════════════
// Static page
// ═══════════════════════════════════════════════════════════════════════

fn clef_anchor(clef: Clef) -> (Glyph, i32) {
    match clef {
        Clef::Treble => (TREBLE_CLEF, line_screen_y(1)),
        Clef::Bass => (BASS_CLEF, line_screen_y(3)),
    }
}

/// Clear the panel and draw the full-width staff with one clef per side.
pub(super) fn draw_staff_background<C: Canvas>(canvas: &mut C, clefs: [Clef; 2]) {
    let (width, height) = canvas.size();
    canvas.fill_rect(0, 0, width, height, BACKGROUND);
    draw_staff_lines(canvas, 0..STAFF_LINE_COUNT, 0, width, STAFF_COLOUR, None);
    for side in Side::BOTH {
        let (glyph, anchor_y) = clef_anchor(clefs[side.index()]);
        canvas.draw_glyph(
            CLEF_X[side.index()] + glyph.offset.x,
            anchor_y + glyph.offset.y,
            &glyph,
            STAFF_COLOUR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::canvas::{DrawOp, RecordingCanvas};

    #[test]
    fn staff_lines_land_on_expected_rows() {
        assert_eq!(line_screen_y(0), 95);
        assert_eq!(line_screen_y(4), 63);
        assert_eq!(line_screen_y(-1), 103);
    }

    #[test]
    fn redraw_only_touches_lines_inside_the_region() {
        let mut canvas = RecordingCanvas::new(PANEL_WIDTH, PANEL_HEIGHT);
        let mut region = DirtyRegion::new(PANEL_WIDTH, PANEL_HEIGHT);
        region.add_rect(40, 74, 20, 16); // rows 74..=89 hold lines 1 (87) and 2 (79)
        let drawn = redraw_staff_under(&mut canvas, &region);
        assert_eq!(drawn, 2);
        assert_eq!(
            canvas.ops(),
            &[
                DrawOp::HLine { x: 40, y: 87, width: 20, colour: STAFF_COLOUR },
                DrawOp::HLine { x: 40, y: 79, width: 20, colour: STAFF_COLOUR },
            ]
        );
    }

    #[test]
    fn ledger_lines_off_the_panel_are_skipped() {
        let mut canvas = RecordingCanvas::new(PANEL_WIDTH, PANEL_HEIGHT);
        let mut area = DirtyRegion::new(PANEL_WIDTH, PANEL_HEIGHT);
        // lines -4 (127) and 11 (7) are the last on-panel rows
        let ledger = LedgerLines { below: 18, above: 14 };
        let drawn = draw_ledger_lines(&mut canvas, Side::Right, ledger, &mut area);
        assert_eq!(drawn, 4 + 7);
        assert_eq!(canvas.draw_count(), 4 + 7);
        assert!(canvas
            .ops()
            .iter()
            .all(|op| matches!(op, DrawOp::HLine { y, .. } if (0..PANEL_HEIGHT).contains(y))));
        assert_eq!((area.y(), area.y() + area.height()), (7, 128));
    }

    #[test]
    fn background_has_five_full_lines() {
        let mut canvas = RecordingCanvas::new(PANEL_WIDTH, PANEL_HEIGHT);
        draw_staff_background(&mut canvas, [Clef::Bass, Clef::Treble]);
        for line in 0..STAFF_LINE_COUNT {
            let y = line_screen_y(line);
            // the far right column is never covered by a clef
            assert_eq!(canvas.pixel(PANEL_WIDTH - 1, y), STAFF_COLOUR);
        }
        assert_eq!(canvas.draw_count(), 1 + 5 + 2);
    }
}
