//! Data model for note identity and staff placement.
//!
//! These types describe what the speller and the staff renderer exchange:
//! which clef a side uses, which key signature and accidental preference
//! are configured, and the derived spelling of a sounding pitch.

use serde::{Deserialize, Serialize};

/// MIDI-convention semitone number. Valid values are 0..=127.
pub type Pitch = u8;

/// Highest valid MIDI pitch.
pub const MAX_PITCH: i32 = 127;

/// Signed diatonic distance from the clef's bottom staff line.
/// 0 is the bottom line, 8 the top line; odd values are spaces.
pub type StavePosition = i32;

/// Panel colour: a 4-bit grey level on the OLED.
pub type Colour = embedded_graphics::pixelcolor::Gray4;

/// Clamp an arbitrary integer into the valid pitch range.
pub fn clamp_pitch(pitch: i32) -> Pitch {
    let clamped = pitch.clamp(0, MAX_PITCH);
    if clamped != pitch {
        log::debug!("pitch {pitch} clamped to {clamped}");
    }
    clamped as Pitch
}

// ═══════════════════════════════════════════════════════════════════════
// Sides and clefs
// ═══════════════════════════════════════════════════════════════════════

/// One hand of the instrument. Each side has its own staff state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clef {
    Bass,
    Treble,
}

impl Clef {
    /// Pitch sitting on the bottom staff line of this clef (G2 / E4).
    pub fn reference_pitch(self) -> Pitch {
        match self {
            Clef::Bass => 43,
            Clef::Treble => 64,
        }
    }

    /// Default clef for a side: bass on the left hand, treble on the right.
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Left => Clef::Bass,
            Side::Right => Clef::Treble,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Key signature
// ═══════════════════════════════════════════════════════════════════════

/// Number of key signatures the speller knows about.
pub const NUM_KEYS: usize = 11;

const KEY_NAMES: [&str; NUM_KEYS] = ["Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B"];

/// Position on the circle of fifths, stored as an index from Db (0) to B (10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct KeySignature(u8);

impl KeySignature {
    pub const D_FLAT: KeySignature = KeySignature(0);
    pub const A_FLAT: KeySignature = KeySignature(1);
    pub const E_FLAT: KeySignature = KeySignature(2);
    pub const B_FLAT: KeySignature = KeySignature(3);
    pub const F: KeySignature = KeySignature(4);
    pub const C: KeySignature = KeySignature(5);
    pub const G: KeySignature = KeySignature(6);
    pub const D: KeySignature = KeySignature(7);
    pub const A: KeySignature = KeySignature(8);
    pub const E: KeySignature = KeySignature(9);
    pub const B: KeySignature = KeySignature(10);

    /// Spelling row used when the preference forces sharps.
    pub const CANONICAL_SHARP: KeySignature = KeySignature::D;
    /// Spelling row used when the preference forces flats.
    pub const CANONICAL_FLAT: KeySignature = KeySignature::E_FLAT;
    /// Row that fixes the clef reference height.
    pub const CANONICAL: KeySignature = KeySignature::C;

    /// Build from a raw table index, clamping into 0..=10.
    pub fn from_index(index: i32) -> Self {
        let clamped = index.clamp(0, NUM_KEYS as i32 - 1);
        if clamped != index {
            log::debug!("key signature index {index} clamped to {clamped}");
        }
        KeySignature(clamped as u8)
    }

    /// Build from a count of sharps (positive) or flats (negative).
    pub fn from_fifths(fifths: i32) -> Self {
        Self::from_index(fifths + Self::C.0 as i32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Sharps (positive) or flats (negative) in the signature.
    pub fn fifths(self) -> i32 {
        self.0 as i32 - Self::C.0 as i32
    }

    pub fn name(self) -> &'static str {
        KEY_NAMES[self.index()]
    }

    pub fn all() -> impl Iterator<Item = KeySignature> {
        (0..NUM_KEYS as u8).map(KeySignature)
    }
}

impl Default for KeySignature {
    fn default() -> Self {
        KeySignature::C
    }
}

impl From<i32> for KeySignature {
    fn from(index: i32) -> Self {
        KeySignature::from_index(index)
    }
}

impl From<KeySignature> for i32 {
    fn from(key: KeySignature) -> Self {
        key.0 as i32
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Accidentals
// ═══════════════════════════════════════════════════════════════════════

/// How enharmonic spellings are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum AccidentalPreference {
    AlwaysSharp,
    AlwaysFlat,
    #[default]
    FollowKey,
}

impl AccidentalPreference {
    /// Build from the persisted setting value, clamping into 0..=2.
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => AccidentalPreference::AlwaysSharp,
            i32::MIN..=-1 => {
                log::debug!("accidental preference {index} clamped to Sharp");
                AccidentalPreference::AlwaysSharp
            }
            1 => AccidentalPreference::AlwaysFlat,
            2 => AccidentalPreference::FollowKey,
            _ => {
                log::debug!("accidental preference {index} clamped to FollowKey");
                AccidentalPreference::FollowKey
            }
        }
    }

    pub fn index(self) -> i32 {
        match self {
            AccidentalPreference::AlwaysSharp => 0,
            AccidentalPreference::AlwaysFlat => 1,
            AccidentalPreference::FollowKey => 2,
        }
    }

    /// Menu label.
    pub fn name(self) -> &'static str {
        match self {
            AccidentalPreference::AlwaysSharp => "Sharp",
            AccidentalPreference::AlwaysFlat => "Flat",
            AccidentalPreference::FollowKey => "Natural",
        }
    }

    /// Spelling row to use for the configured key.
    pub fn effective_key(self, key: KeySignature) -> KeySignature {
        match self {
            AccidentalPreference::AlwaysSharp => KeySignature::CANONICAL_SHARP,
            AccidentalPreference::AlwaysFlat => KeySignature::CANONICAL_FLAT,
            AccidentalPreference::FollowKey => key,
        }
    }
}

impl From<i32> for AccidentalPreference {
    fn from(index: i32) -> Self {
        AccidentalPreference::from_index(index)
    }
}

impl From<AccidentalPreference> for i32 {
    fn from(pref: AccidentalPreference) -> Self {
        pref.index()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Flat,
    Natural,
    Sharp,
}

impl Accidental {
    /// Semitone alteration: -1, 0 or +1.
    pub fn offset(self) -> i32 {
        match self {
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
        }
    }

    pub fn is_altered(self) -> bool {
        self != Accidental::Natural
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Derived spelling
// ═══════════════════════════════════════════════════════════════════════

const LETTERS: [char; 7] = ['C', 'D', 'E', 'F', 'G', 'A', 'B'];

/// Letter name for a diatonic step (C = 0).
pub fn letter_for_step(step: u8) -> char {
    LETTERS[step as usize % 7]
}

/// Musically correct name of one pitch. Computed on every call, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSpelling {
    /// Diatonic letter step, 0..=6 with C = 0
    pub step: u8,
    pub accidental: Accidental,
    /// Octave of the written letter (middle C is octave 4)
    pub octave: i32,
    /// Display name such as "C#4" or "Bb3"
    pub name: String,
}

impl NoteSpelling {
    pub fn letter(&self) -> char {
        letter_for_step(self.step)
    }
}

/// How the note-name page lays out text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum NoteDisplay {
    /// Names stacked from the bottom row up
    #[default]
    Stacked,
    /// Names placed vertically according to pitch
    Placed,
}

impl From<i32> for NoteDisplay {
    fn from(index: i32) -> Self {
        if index >= 1 {
            NoteDisplay::Placed
        } else {
            NoteDisplay::Stacked
        }
    }
}

impl From<NoteDisplay> for i32 {
    fn from(display: NoteDisplay) -> Self {
        match display {
            NoteDisplay::Stacked => 0,
            NoteDisplay::Placed => 1,
        }
    }
}

/// Direction the bellows are moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BellowsState {
    Closing,
    #[default]
    Stationary,
    Opening,
}

impl BellowsState {
    pub fn indicator(self) -> &'static str {
        match self {
            BellowsState::Closing => ">||<",
            BellowsState::Stationary => "=||=",
            BellowsState::Opening => "<||>",
        }
    }
}
