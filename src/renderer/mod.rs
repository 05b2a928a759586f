//! Staff renderer: turns each side's sounding notes into panel updates.
//!
//! Display I/O is slow compared with the control loop, so a render pass
//! does as little as it can: nothing at all when the notes did not change,
//! otherwise one erase of the rectangle the previous pass touched, a
//! redraw of the staff lines under it, and then the new glyphs.

mod canvas;
mod change;
mod constants;
mod dirty;
mod framebuffer;
mod glyphs;
mod layout;
mod names;
mod notes;
mod overlay;
mod staff;
mod svg_canvas;

use crate::model::*;
use crate::settings::DisplaySettings;
use crate::speller::PitchSpeller;
use constants::*;
use layout::GreedyPush;
use notes::{draw_accidental, draw_note};
use staff::{draw_ledger_lines, draw_staff_background, redraw_staff_under};

pub use canvas::{Canvas, DrawOp, FlushFn, PanelCanvas, RecordingCanvas};
pub use change::has_changed;
pub use constants::{PANEL_HEIGHT, PANEL_WIDTH};
pub use dirty::DirtyRegion;
pub use framebuffer::Framebuffer;
pub use glyphs::Glyph;
pub use layout::{assign_push_flags, ledger_lines, LedgerLines};
pub use names::NameListRenderer;
pub use overlay::PressureOverlay;
pub use svg_canvas::SvgCanvas;

// ═══════════════════════════════════════════════════════════════════════
// Per-side state
// ═══════════════════════════════════════════════════════════════════════

/// What the previous pass drew for one side. Only that side's render call
/// writes it.
#[derive(Debug, Clone)]
struct SideState {
    previous_notes: Vec<Pitch>,
    previous_area: DirtyRegion,
}

impl SideState {
    fn new(panel_width: i32, panel_height: i32) -> Self {
        Self {
            previous_notes: Vec::new(),
            previous_area: DirtyRegion::new(panel_width, panel_height),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// StaffRenderer
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct StaffRenderer<'a> {
    speller: PitchSpeller<'a>,
    sides: [SideState; 2],
}

impl StaffRenderer<'static> {
    /// Renderer for a panel of the given size using the standard spellings.
    pub fn new(panel_width: i32, panel_height: i32) -> Self {
        Self::with_speller(PitchSpeller::default(), panel_width, panel_height)
    }
}

impl Default for StaffRenderer<'static> {
    fn default() -> Self {
        Self::new(PANEL_WIDTH, PANEL_HEIGHT)
    }
}

impl<'a> StaffRenderer<'a> {
    pub fn with_speller(speller: PitchSpeller<'a>, panel_width: i32, panel_height: i32) -> Self {
        Self {
            speller,
            sides: [
                SideState::new(panel_width, panel_height),
                SideState::new(panel_width, panel_height),
            ],
        }
    }

    pub fn previous_notes(&self, side: Side) -> &[Pitch] {
        &self.sides[side.index()].previous_notes
    }

    pub fn previous_area(&self, side: Side) -> &DirtyRegion {
        &self.sides[side.index()].previous_area
    }

    /// The panel was cleared by someone else (e.g. page navigation): forget
    /// both sides so the next pass draws from scratch without erasing.
    pub fn reset(&mut self) {
        for state in &mut self.sides {
            state.previous_notes.clear();
            state.previous_area.reset();
        }
    }

    /// Clear the panel, draw the empty staff with its clefs and reset.
    pub fn draw_staff_page<C: Canvas>(&mut self, canvas: &mut C, clefs: [Clef; 2]) {
        draw_staff_background(canvas, clefs);
        canvas.present();
        self.reset();
    }

    /// Bring one side's staff up to date with `active_notes` (ascending,
    /// duplicate-free). Returns whether anything was drawn.
    pub fn render_side<C: Canvas>(
        &mut self,
        canvas: &mut C,
        side: Side,
        active_notes: &[Pitch],
        clef: Clef,
        key: KeySignature,
        preference: AccidentalPreference,
    ) -> bool {
        debug_assert!(
            active_notes.windows(2).all(|w| w[0] < w[1]),
            "active notes must be ascending and unique"
        );
        let speller = self.speller;
        let state = &mut self.sides[side.index()];

        if !has_changed(active_notes, &state.previous_notes) {
            return false;
        }

        // Wipe what the previous pass drew, then put back the staff lines
        // the wipe went through.
        let erased = state.previous_area;
        if erased.is_valid() {
            canvas.fill_rect(erased.x(), erased.y(), erased.width(), erased.height(), BACKGROUND);
            redraw_staff_under(canvas, &erased);
        }
        let area = &mut state.previous_area;
        area.reset();

        if let (Some(&lowest), Some(&highest)) = (active_notes.first(), active_notes.last()) {
            let lowest = speller.stave_position(lowest, clef, preference, key);
            let highest = speller.stave_position(highest, clef, preference, key);
            // Ledger lines go underneath the noteheads.
            draw_ledger_lines(canvas, side, ledger_lines(lowest, highest), area);

            let column = NOTE_X[side.index()];
            let mut push = GreedyPush::new(1);
            for &pitch in active_notes {
                let placement = speller.place(pitch, clef, preference, key);
                let position = placement.stave_position;
                let x = if push.decide(position) { column + PUSH_OFFSET } else { column };
                draw_note(canvas, x, position, area);
                draw_accidental(canvas, x, position, placement.spelling.accidental, area);
            }
        }
        canvas.present();

        log::trace!(
            "staff {:?}: {} notes, erased {}, new area {}x{} at ({}, {})",
            side,
            active_notes.len(),
            erased.is_valid(),
            area.width(),
            area.height(),
            area.x(),
            area.y(),
        );

        state.previous_notes.clear();
        state.previous_notes.extend_from_slice(active_notes);
        true
    }

    /// Render both sides with the clefs and spelling from `settings`.
    /// Returns whether either side drew.
    pub fn render_sides<C: Canvas>(
        &mut self,
        canvas: &mut C,
        active_notes: [&[Pitch]; 2],
        settings: &DisplaySettings,
    ) -> bool {
        let mut drew = false;
        for side in Side::BOTH {
            drew |= self.render_side(
                canvas,
                side,
                active_notes[side.index()],
                settings.clef(side),
                settings.accidental_key,
                settings.accidental_preference,
            );
        }
        drew
    }
}
