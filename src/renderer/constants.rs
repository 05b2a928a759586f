//! Shared constants for the panel renderer (all in device pixels).

use crate::model::Colour;

// ── Panel ───────────────────────────────────────────────────────────
pub const PANEL_WIDTH: i32 = 128;
pub const PANEL_HEIGHT: i32 = 128;

// ── Staff dimensions ────────────────────────────────────────────────
pub(super) const STAFF_LINE_SPACING: i32 = 8; // distance between staff lines
pub(super) const STAFF_Y_START: i32 = 32; // bottom line, measured up from the panel bottom
pub(super) const STAFF_LINE_COUNT: i32 = 5;

// ── Per-side columns (left, right) ──────────────────────────────────
pub(super) const NOTE_X: [i32; 2] = [47, 110];
pub(super) const PUSH_OFFSET: i32 = 6; // second column for clashing noteheads
pub(super) const LEDGER_X: [i32; 2] = [41, 104];
pub(super) const LEDGER_WIDTH: i32 = 12;
pub(super) const CLEF_X: [i32; 2] = [2, 66];

// ── Text ────────────────────────────────────────────────────────────
pub(super) const CHAR_WIDTH: i32 = 6; // 5 plus 1 for the space
pub(super) const CHAR_HEIGHT: i32 = 8;
pub(super) const NAME_TEXT_SCALE: u8 = 2;
pub(super) const PAGE_Y: i32 = 16; // top of page contents, below the title

// ── Colours (4-bit grey) ────────────────────────────────────────────
pub(super) const BACKGROUND: Colour = Colour::new(0x0);
pub(super) const STAFF_COLOUR: Colour = Colour::new(0xf);
pub(super) const LEDGER_COLOUR: Colour = Colour::new(0x8);
pub(super) const NOTE_COLOUR: Colour = Colour::new(0xf);
pub(super) const TEXT_COLOUR: Colour = Colour::new(0xc);

/// Panel row of a staff-relative height (up from the panel bottom).
pub(super) fn screen_y(y_up: i32) -> i32 {
    PANEL_HEIGHT - 1 - y_up
}

/// Panel row of staff line `line` (0 = bottom line, negative = ledger below).
pub(super) fn line_screen_y(line: i32) -> i32 {
    screen_y(STAFF_Y_START + line * STAFF_LINE_SPACING)
}
