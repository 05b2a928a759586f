//! stavelib — pitch spelling and staff rendering for a free-reed MIDI
//! controller's monochrome panel.
//!
//! Each side of the instrument (bass on the left, treble on the right) has
//! its own staff. The sounding notes of a side are spelled according to the
//! configured key and accidental preference, placed on the staff, and drawn
//! with the fewest panel operations that keep the picture correct.
//!
//! # Example
//! ```
//! use stavelib::*;
//!
//! let (spelling, position) = resolve(70, Clef::Treble, AccidentalPreference::FollowKey, KeySignature::F);
//! assert_eq!(spelling.name, "Bb4");
//! assert_eq!(position, 4);
//!
//! let mut canvas = RecordingCanvas::new(PANEL_WIDTH, PANEL_HEIGHT);
//! let mut renderer = StaffRenderer::default();
//! renderer.render_side(
//!     &mut canvas,
//!     Side::Right,
//!     &[60, 64, 67],
//!     Clef::Treble,
//!     KeySignature::C,
//!     AccidentalPreference::FollowKey,
//! );
//! ```

pub mod error;
pub mod model;
pub mod polyphony;
pub mod renderer;
pub mod settings;
pub mod speller;

pub use embedded_graphics;
pub use error::{SettingsError, SpellingError};
pub use model::*;
pub use polyphony::PlayingNotes;
pub use renderer::{
    assign_push_flags, has_changed, ledger_lines, Canvas, DirtyRegion, DrawOp, FlushFn,
    Framebuffer, LedgerLines, NameListRenderer, PanelCanvas, PressureOverlay, RecordingCanvas,
    StaffRenderer, SvgCanvas, PANEL_HEIGHT, PANEL_WIDTH,
};
pub use settings::DisplaySettings;
pub use speller::{resolve, Placement, PitchSpeller, Spelling, SpellingTable};

/// Display name of `pitch`, e.g. "F#4". Out-of-range pitches are clamped.
pub fn note_name(
    pitch: i32,
    clef: Clef,
    preference: AccidentalPreference,
    key: KeySignature,
) -> String {
    resolve(pitch, clef, preference, key).0.name
}

/// Draw the staff page and the given notes for both sides and return the
/// result as SVG.
///
/// `pixel_size` scales each panel pixel; pass 0.0 for 1:1.
pub fn render_notes_to_svg(
    active_notes: [&[Pitch]; 2],
    settings: &DisplaySettings,
    pixel_size: f64,
) -> String {
    let mut canvas = SvgCanvas::new(PANEL_WIDTH, PANEL_HEIGHT, pixel_size);
    let mut renderer = StaffRenderer::default();
    renderer.draw_staff_page(&mut canvas, settings.clefs);
    renderer.render_sides(&mut canvas, active_notes, settings);
    canvas.build()
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI for the firmware's C++ display task
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::CString;
use std::os::raw::c_char;

fn ffi_clef(clef: i32) -> Clef {
    if clef == 0 {
        Clef::Bass
    } else {
        Clef::Treble
    }
}

/// Spell `pitch` and return its name as a C string.
/// The caller must free the returned string with `stavelib_free_string`.
///
/// `clef` is 0 for bass and anything else for treble; `preference` is
/// 0 sharps, 1 flats, 2 follow key; `key` indexes Db (0) through B (10).
/// Out-of-range values are clamped.
#[no_mangle]
pub extern "C" fn stavelib_note_name(
    pitch: i32,
    clef: i32,
    preference: i32,
    key: i32,
) -> *mut c_char {
    let name = note_name(
        pitch,
        ffi_clef(clef),
        AccidentalPreference::from_index(preference),
        KeySignature::from_index(key),
    );
    match CString::new(name) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Staff position of `pitch`: 0 is the bottom line, 8 the top line.
/// Arguments as for `stavelib_note_name`.
#[no_mangle]
pub extern "C" fn stavelib_stave_position(
    pitch: i32,
    clef: i32,
    preference: i32,
    key: i32,
) -> i32 {
    resolve(
        pitch,
        ffi_clef(clef),
        AccidentalPreference::from_index(preference),
        KeySignature::from_index(key),
    )
    .1
}

/// Free a string returned by this library.
///
/// # Safety
/// `ptr` must have been returned by a `stavelib_*` function, or be null.
#[no_mangle]
pub unsafe extern "C" fn stavelib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn ffi_note_name_round_trips_through_c_string() {
        let ptr = stavelib_note_name(61, 1, 1, 5);
        assert!(!ptr.is_null());
        let name = unsafe { CStr::from_ptr(ptr) }.to_str().map(str::to_owned);
        unsafe { stavelib_free_string(ptr) };
        assert_eq!(name.as_deref(), Ok("Db4"));
    }

    #[test]
    fn ffi_clamps_out_of_range_arguments() {
        // key 99 clamps to B, preference -4 clamps to sharps
        assert_eq!(stavelib_stave_position(64, 1, -4, 99), 0);
        assert_eq!(stavelib_stave_position(43, 0, 2, 5), 0);
        assert_eq!(stavelib_stave_position(500, 1, 2, 5), stavelib_stave_position(127, 1, 2, 5));
    }

    #[test]
    fn free_string_accepts_null() {
        unsafe { stavelib_free_string(std::ptr::null_mut()) };
    }

    #[test]
    fn svg_preview_contains_the_staff() {
        let svg = render_notes_to_svg([&[48], &[60, 64, 67]], &DisplaySettings::default(), 4.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.matches("<rect").count() > 10);
    }
}
