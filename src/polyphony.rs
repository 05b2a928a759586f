//! Reference-counted tracking of sounding pitches per side.
//!
//! Several buttons can map to the same pitch (e.g. after a layout change or
//! when the bellows direction flips), so each pitch keeps a count rather
//! than a flag. A pitch is sounding while its count is non-zero.

use crate::model::*;

const PITCH_COUNT: usize = MAX_PITCH as usize + 1;

#[derive(Debug, Clone)]
pub struct PlayingNotes {
    counts: [[u8; PITCH_COUNT]; 2],
}

impl Default for PlayingNotes {
    fn default() -> Self {
        Self { counts: [[0; PITCH_COUNT]; 2] }
    }
}

impl PlayingNotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when this press made the pitch start sounding.
    pub fn note_on(&mut self, side: Side, pitch: Pitch) -> bool {
        let count = &mut self.counts[side.index()][clamp_pitch(pitch as i32) as usize];
        *count = count.saturating_add(1);
        *count == 1
    }

    /// Returns true when this release made the pitch fall silent.
    pub fn note_off(&mut self, side: Side, pitch: Pitch) -> bool {
        let count = &mut self.counts[side.index()][clamp_pitch(pitch as i32) as usize];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        *count == 0
    }

    pub fn is_sounding(&self, side: Side, pitch: Pitch) -> bool {
        self.counts[side.index()][clamp_pitch(pitch as i32) as usize] > 0
    }

    pub fn clear(&mut self, side: Side) {
        self.counts[side.index()] = [0; PITCH_COUNT];
    }

    /// Collect the ascending, duplicate-free set of sounding pitches within
    /// `[min, max]` into `out`, reusing its allocation.
    pub fn active_notes_into(&self, side: Side, min: Pitch, max: Pitch, out: &mut Vec<Pitch>) {
        out.clear();
        let max = max.min(MAX_PITCH as Pitch);
        if min > max {
            return;
        }
        let counts = &self.counts[side.index()];
        out.extend((min..=max).filter(|&p| counts[p as usize] > 0));
    }

    pub fn active_notes(&self, side: Side, min: Pitch, max: Pitch) -> Vec<Pitch> {
        let mut out = Vec::new();
        self.active_notes_into(side, min, max, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_triggers_are_counted() {
        let mut notes = PlayingNotes::new();
        assert!(notes.note_on(Side::Right, 60));
        assert!(!notes.note_on(Side::Right, 60));
        assert!(!notes.note_off(Side::Right, 60));
        assert!(notes.is_sounding(Side::Right, 60));
        assert!(notes.note_off(Side::Right, 60));
        assert!(!notes.is_sounding(Side::Right, 60));
        assert!(!notes.note_off(Side::Right, 60));
    }

    #[test]
    fn active_notes_are_ascending_and_per_side() {
        let mut notes = PlayingNotes::new();
        for p in [67, 60, 64, 64] {
            notes.note_on(Side::Right, p);
        }
        notes.note_on(Side::Left, 48);
        assert_eq!(notes.active_notes(Side::Right, 0, 127), vec![60, 64, 67]);
        assert_eq!(notes.active_notes(Side::Left, 0, 127), vec![48]);
        assert_eq!(notes.active_notes(Side::Right, 61, 66), vec![64]);
        assert!(notes.active_notes(Side::Right, 70, 65).is_empty());

        notes.clear(Side::Right);
        assert!(notes.active_notes(Side::Right, 0, 127).is_empty());
    }
}
