//! Pitch spelling: MIDI pitch → letter, accidental, octave and stave position.
//!
//! Spellings come from one table keyed by (key signature, semitone class).
//! The table type is a fixed-size array, so a missing entry cannot compile;
//! `SpellingTable::new` additionally checks that every entry actually sounds
//! as its semitone.

use crate::error::SpellingError;
use crate::model::*;

/// Written form of one semitone class in one key.
///
/// `step` is a letter step relative to the pitch's own octave: -1 is the B
/// below (B#) and 7 is the C above (Cb).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spelling {
    pub step: i8,
    pub accidental: Accidental,
}

const fn n(step: i8) -> Spelling {
    Spelling { step, accidental: Accidental::Natural }
}

const fn s(step: i8) -> Spelling {
    Spelling { step, accidental: Accidental::Sharp }
}

const fn f(step: i8) -> Spelling {
    Spelling { step, accidental: Accidental::Flat }
}

/// Semitone of each natural letter, C through B.
const NATURAL_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Going up from the tonic the spellings follow the key's scale, with the
/// chromatic notes borrowing the nearer side of the circle of fifths.
const STANDARD_ROWS: [[Spelling; 12]; NUM_KEYS] = [
    //  C      C#/Db  D      D#/Eb  E      F      F#/Gb  G      G#/Ab  A      A#/Bb  B
    [n(0), f(1), n(1), f(2), f(3), n(3), f(4), n(4), f(5), n(5), f(6), f(7)], // Db
    [n(0), f(1), n(1), f(2), n(2), n(3), f(4), n(4), f(5), n(5), f(6), f(7)], // Ab
    [n(0), f(1), n(1), f(2), n(2), n(3), f(4), n(4), f(5), n(5), f(6), n(6)], // Eb
    [n(0), f(1), n(1), f(2), n(2), n(3), s(3), n(4), f(5), n(5), f(6), n(6)], // Bb
    [n(0), s(0), n(1), f(2), n(2), n(3), s(3), n(4), f(5), n(5), f(6), n(6)], // F
    [n(0), s(0), n(1), f(2), n(2), n(3), s(3), n(4), s(4), n(5), f(6), n(6)], // C
    [n(0), s(0), n(1), s(1), n(2), n(3), s(3), n(4), s(4), n(5), f(6), n(6)], // G
    [n(0), s(0), n(1), s(1), n(2), n(3), s(3), n(4), s(4), n(5), s(5), n(6)], // D
    [n(0), s(0), n(1), s(1), n(2), s(2), s(3), n(4), s(4), n(5), s(5), n(6)], // A
    [s(-1), s(0), n(1), s(1), n(2), s(2), s(3), n(4), s(4), n(5), s(5), n(6)], // E
    [s(-1), s(0), n(1), s(1), n(2), s(2), s(3), n(4), s(4), n(5), s(5), n(6)], // B
];

/// The spelling table shipped with the instrument.
pub static STANDARD_TABLE: SpellingTable = SpellingTable { rows: STANDARD_ROWS };

// ═══════════════════════════════════════════════════════════════════════
// SpellingTable
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellingTable {
    rows: [[Spelling; 12]; NUM_KEYS],
}

impl SpellingTable {
    /// Build a table, rejecting any entry that does not sound as its column.
    pub fn new(rows: [[Spelling; 12]; NUM_KEYS]) -> Result<Self, SpellingError> {
        let table = SpellingTable { rows };
        table.validate()?;
        Ok(table)
    }

    pub fn standard() -> &'static SpellingTable {
        &STANDARD_TABLE
    }

    /// One row of twelve spellings per key, Db first.
    pub fn rows(&self) -> &[[Spelling; 12]; NUM_KEYS] {
        &self.rows
    }

    pub fn validate(&self) -> Result<(), SpellingError> {
        for (key, row) in self.rows.iter().enumerate() {
            for (semitone, spelling) in row.iter().enumerate() {
                if !(-1..=7).contains(&spelling.step) {
                    return Err(SpellingError::StepOutOfRange { key, semitone, step: spelling.step });
                }
                let actual = sounding_semitone(*spelling);
                if actual != semitone as i32 {
                    return Err(SpellingError::WrongPitchClass { key, semitone, actual });
                }
            }
        }
        Ok(())
    }

    pub fn lookup(&self, key: KeySignature, semitone: usize) -> Spelling {
        self.rows[key.index()][semitone % 12]
    }
}

/// Semitone (relative to the pitch's own octave) that a spelling sounds.
fn sounding_semitone(spelling: Spelling) -> i32 {
    let step = spelling.step as i32;
    NATURAL_SEMITONES[step.rem_euclid(7) as usize]
        + 12 * step.div_euclid(7)
        + spelling.accidental.offset()
}

// ═══════════════════════════════════════════════════════════════════════
// PitchSpeller
// ═══════════════════════════════════════════════════════════════════════

/// Vertical placement and table spelling of a pitch, without the name text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub spelling: Spelling,
    pub stave_position: StavePosition,
}

#[derive(Debug, Clone, Copy)]
pub struct PitchSpeller<'a> {
    table: &'a SpellingTable,
}

impl Default for PitchSpeller<'static> {
    fn default() -> Self {
        PitchSpeller { table: &STANDARD_TABLE }
    }
}

impl<'a> PitchSpeller<'a> {
    pub fn new(table: &'a SpellingTable) -> Self {
        PitchSpeller { table }
    }

    /// Spell `pitch` and place it on the staff of `clef`.
    pub fn resolve(
        &self,
        pitch: i32,
        clef: Clef,
        preference: AccidentalPreference,
        key: KeySignature,
    ) -> (NoteSpelling, StavePosition) {
        let pitch = clamp_pitch(pitch);
        let placement = self.place(pitch, clef, preference, key);
        (spell(pitch, placement.spelling), placement.stave_position)
    }

    /// Allocation-free part of `resolve`, used on the render path.
    pub fn place(
        &self,
        pitch: Pitch,
        clef: Clef,
        preference: AccidentalPreference,
        key: KeySignature,
    ) -> Placement {
        let pitch = clamp_pitch(pitch as i32);
        let spelling = self.table.lookup(preference.effective_key(key), pitch as usize);
        let height = diatonic_height(pitch, spelling);

        // The reference never depends on the preference, so switching between
        // sharps and flats only moves altered notes.
        let reference = clef.reference_pitch();
        let reference_spelling = self.table.lookup(KeySignature::CANONICAL, reference as usize);
        let reference_height = diatonic_height(reference, reference_spelling);

        Placement { spelling, stave_position: height - reference_height }
    }

    pub fn stave_position(
        &self,
        pitch: Pitch,
        clef: Clef,
        preference: AccidentalPreference,
        key: KeySignature,
    ) -> StavePosition {
        self.place(pitch, clef, preference, key).stave_position
    }
}

/// Letter step plus seven per octave, counting from MIDI octave 0.
fn diatonic_height(pitch: Pitch, spelling: Spelling) -> i32 {
    spelling.step as i32 + 7 * (pitch as i32 / 12)
}

fn spell(pitch: Pitch, spelling: Spelling) -> NoteSpelling {
    let step = spelling.step as i32;
    // B# belongs to the octave below, Cb to the octave above
    let octave = pitch as i32 / 12 - 1 + step.div_euclid(7);
    let step = step.rem_euclid(7) as u8;
    let name = format!(
        "{}{}{}",
        letter_for_step(step),
        spelling.accidental.symbol(),
        octave
    );
    NoteSpelling { step, accidental: spelling.accidental, octave, name }
}

/// Resolve with the standard table.
pub fn resolve(
    pitch: i32,
    clef: Clef,
    preference: AccidentalPreference,
    key: KeySignature,
) -> (NoteSpelling, StavePosition) {
    PitchSpeller::default().resolve(pitch, clef, preference, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_is_consistent() {
        assert_eq!(STANDARD_TABLE.validate(), Ok(()));
    }

    #[test]
    fn rejects_entry_with_wrong_pitch_class() {
        let mut rows = STANDARD_ROWS;
        rows[5][1] = n(1);
        assert_eq!(
            SpellingTable::new(rows),
            Err(SpellingError::WrongPitchClass { key: 5, semitone: 1, actual: 2 })
        );
    }

    #[test]
    fn rejects_step_out_of_range() {
        let mut rows = STANDARD_ROWS;
        rows[0][0] = n(9);
        assert!(matches!(
            SpellingTable::new(rows),
            Err(SpellingError::StepOutOfRange { key: 0, semitone: 0, step: 9 })
        ));
    }

    #[test]
    fn sharp_and_flat_rows_are_pure() {
        for semitone in 0..12 {
            let sharp = STANDARD_TABLE.lookup(KeySignature::CANONICAL_SHARP, semitone);
            let flat = STANDARD_TABLE.lookup(KeySignature::CANONICAL_FLAT, semitone);
            assert_ne!(sharp.accidental, Accidental::Flat, "semitone {semitone}");
            assert_ne!(flat.accidental, Accidental::Sharp, "semitone {semitone}");
        }
    }

    #[test]
    fn b_sharp_and_c_flat_shift_the_display_octave() {
        let (b_sharp, b_sharp_pos) = resolve(60, Clef::Treble, AccidentalPreference::FollowKey, KeySignature::E);
        assert_eq!(b_sharp.name, "B#3");
        assert_eq!(b_sharp.octave, 3);
        assert_eq!(b_sharp.letter(), 'B');

        let (c, c_pos) = resolve(60, Clef::Treble, AccidentalPreference::FollowKey, KeySignature::C);
        assert_eq!(c.name, "C4");
        assert_eq!(b_sharp_pos, c_pos - 1);

        let (c_flat, _) = resolve(71, Clef::Treble, AccidentalPreference::FollowKey, KeySignature::D_FLAT);
        assert_eq!(c_flat.name, "Cb5");
        assert_eq!(c_flat.octave, 5);
    }

    #[test]
    fn reference_pitches_sit_on_bottom_line() {
        let speller = PitchSpeller::default();
        for pref in [AccidentalPreference::AlwaysSharp, AccidentalPreference::AlwaysFlat] {
            assert_eq!(speller.stave_position(64, Clef::Treble, pref, KeySignature::C), 0);
            assert_eq!(speller.stave_position(43, Clef::Bass, pref, KeySignature::C), 0);
            assert_eq!(speller.stave_position(77, Clef::Treble, pref, KeySignature::C), 8);
        }
    }

    #[test]
    fn out_of_range_pitch_is_clamped() {
        let (high, _) = resolve(300, Clef::Treble, AccidentalPreference::AlwaysSharp, KeySignature::C);
        assert_eq!(high.name, "G9");
        let (low, _) = resolve(-4, Clef::Bass, AccidentalPreference::AlwaysSharp, KeySignature::C);
        assert_eq!(low.name, "C-1");
    }
}
