//! Bellows/pressure indicator drawn over the note pages.

use super::canvas::Canvas;
use super::constants::{PAGE_Y, TEXT_COLOUR};
use crate::model::BellowsState;

const OVERLAY_X: i32 = 75;

#[derive(Debug, Default)]
pub struct PressureOverlay {
    last_text: Option<String>,
}

impl PressureOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the last drawn text; call after the page has been cleared.
    pub fn reset(&mut self) {
        self.last_text = None;
    }

    /// Draw the indicator when the text changed, or when the notes under it
    /// were just redrawn (their erase may have clipped it). Returns whether
    /// anything was drawn.
    pub fn render<C: Canvas>(
        &mut self,
        canvas: &mut C,
        bellows: BellowsState,
        abs_pressure: f32,
        notes_redrawn: bool,
    ) -> bool {
        let text = format!("{} {:4.2}", bellows.indicator(), abs_pressure.clamp(0.0, 1.0));
        if !notes_redrawn && self.last_text.as_deref() == Some(text.as_str()) {
            return false;
        }
        canvas.move_cursor(OVERLAY_X, PAGE_Y);
        canvas.print(&text, 1, TEXT_COLOUR);
        canvas.present();
        self.last_text = Some(text);
        true
    }
}
