//! Note-name page: the sounding notes as text rather than on a staff.
//!
//! Two layouts are available. *Stacked* lists names from the bottom row up,
//! which is compact but makes names jump as chords change. *Placed* puts
//! each name at a height proportional to its pitch, pushing clashing names
//! sideways with the same greedy rule the staff uses for seconds.

use super::canvas::Canvas;
use super::change::has_changed;
use super::constants::*;
use super::layout::GreedyPush;
use crate::model::*;
use crate::speller::PitchSpeller;

const NAME_CHARS: i32 = 3;
const CELL_WIDTH: i32 = NAME_CHARS * CHAR_WIDTH * NAME_TEXT_SCALE as i32;
const CELL_HEIGHT: i32 = CHAR_HEIGHT * NAME_TEXT_SCALE as i32;

// Placed layout: pitch range mapped onto heights measured up from the bottom
const PLACED_LOWEST_Y: i32 = CELL_HEIGHT;
const PLACED_HIGHEST_Y: i32 = 85 + CELL_HEIGHT;
const PLACED_RANGE: [(Pitch, Pitch); 2] = [(36, 69), (57, 95)];

// Stacked layout
const STACKED_MARGIN: i32 = 16;
const STACKED_ROWS: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    x: i32,
    y: i32,
}

#[derive(Debug, Default)]
struct NameState {
    previous: Vec<Pitch>,
    cells: Vec<Cell>,
}

#[derive(Debug)]
pub struct NameListRenderer<'a> {
    speller: PitchSpeller<'a>,
    sides: [NameState; 2],
}

impl NameListRenderer<'static> {
    /// Renderer using the standard spellings.
    pub fn new() -> Self {
        Self::with_speller(PitchSpeller::default())
    }
}

impl Default for NameListRenderer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> NameListRenderer<'a> {
    pub fn with_speller(speller: PitchSpeller<'a>) -> Self {
        Self { speller, sides: Default::default() }
    }

    /// Forget what was drawn; call after the page has been cleared.
    pub fn reset(&mut self) {
        for state in &mut self.sides {
            state.previous.clear();
            state.cells.clear();
        }
    }

    /// Redraw one side's names if its notes changed. Returns whether
    /// anything was drawn.
    pub fn render_side<C: Canvas>(
        &mut self,
        canvas: &mut C,
        side: Side,
        active_notes: &[Pitch],
        display: NoteDisplay,
        preference: AccidentalPreference,
        key: KeySignature,
    ) -> bool {
        let speller = self.speller;
        let state = &mut self.sides[side.index()];
        if !has_changed(active_notes, &state.previous) {
            return false;
        }

        for cell in state.cells.drain(..) {
            canvas.fill_rect(cell.x, cell.y, CELL_WIDTH, CELL_HEIGHT, BACKGROUND);
        }

        let cells = match display {
            NoteDisplay::Stacked => stacked_cells(side, active_notes.len()),
            NoteDisplay::Placed => placed_cells(side, active_notes),
        };
        for (&pitch, cell) in active_notes.iter().zip(cells) {
            let (spelling, _) = speller.resolve(pitch as i32, Clef::Treble, preference, key);
            canvas.move_cursor(cell.x, cell.y);
            canvas.print(&format!("{:<3}", spelling.name), NAME_TEXT_SCALE, TEXT_COLOUR);
            state.cells.push(cell);
        }
        canvas.present();

        log::trace!("names {:?}: {:?} as {:?}", side, active_notes, display);
        state.previous.clear();
        state.previous.extend_from_slice(active_notes);
        true
    }
}

/// Bottom-up rows; notes beyond the available rows are not shown.
fn stacked_cells(side: Side, count: usize) -> Vec<Cell> {
    let x = match side {
        Side::Left => STACKED_MARGIN,
        Side::Right => PANEL_WIDTH - 1 - STACKED_MARGIN - CELL_WIDTH,
    };
    (0..count.min(STACKED_ROWS as usize) as i32)
        .map(|i| Cell { x, y: PAGE_Y + (STACKED_ROWS - i) * CELL_HEIGHT })
        .collect()
}

fn placed_cells(side: Side, notes: &[Pitch]) -> Vec<Cell> {
    let (low, high) = PLACED_RANGE[side.index()];
    let (x, push_delta) = match side {
        Side::Left => (0, CELL_WIDTH),
        Side::Right => (PANEL_WIDTH - CELL_WIDTH, -CELL_WIDTH),
    };
    // Names clash when their text rows overlap.
    let mut push = GreedyPush::new(CELL_HEIGHT - 1);
    notes
        .iter()
        .map(|&pitch| {
            let frac = (pitch as f32 - low as f32) / (high - low) as f32;
            let frac = frac.clamp(0.0, 1.0);
            let y_up = PLACED_LOWEST_Y + (frac * (PLACED_HIGHEST_Y - PLACED_LOWEST_Y) as f32) as i32;
            let pushed = push.decide(y_up);
            Cell { x: if pushed { x + push_delta } else { x }, y: screen_y(y_up) }
        })
        .collect()
}
