//! Spelling and placement properties checked over the full pitch range.

use pretty_assertions::assert_eq;
use stavelib::*;

const PREFERENCES: [AccidentalPreference; 3] = [
    AccidentalPreference::AlwaysSharp,
    AccidentalPreference::AlwaysFlat,
    AccidentalPreference::FollowKey,
];
const CLEFS: [Clef; 2] = [Clef::Bass, Clef::Treble];

#[test]
fn stave_position_never_decreases_with_pitch() {
    for clef in CLEFS {
        for pref in PREFERENCES {
            for key in KeySignature::all() {
                let mut last = i32::MIN;
                for pitch in 0..=127 {
                    let (_, position) = resolve(pitch, clef, pref, key);
                    assert!(
                        position >= last,
                        "{clef:?} {pref:?} {}: pitch {pitch} at {position} below {last}",
                        key.name()
                    );
                    last = position;
                }
            }
        }
    }
}

#[test]
fn forced_preferences_use_only_their_accidental() {
    for key in KeySignature::all() {
        for pitch in 0..=127 {
            let (sharp, _) = resolve(pitch, Clef::Treble, AccidentalPreference::AlwaysSharp, key);
            assert_ne!(sharp.accidental, Accidental::Flat, "{}", sharp.name);
            let (flat, _) = resolve(pitch, Clef::Treble, AccidentalPreference::AlwaysFlat, key);
            assert_ne!(flat.accidental, Accidental::Sharp, "{}", flat.name);
        }
    }
}

#[test]
fn forced_preferences_ignore_the_key() {
    for clef in CLEFS {
        for pref in [AccidentalPreference::AlwaysSharp, AccidentalPreference::AlwaysFlat] {
            for pitch in 0..=127 {
                let expected = resolve(pitch, clef, pref, KeySignature::C);
                for key in KeySignature::all() {
                    assert_eq!(resolve(pitch, clef, pref, key), expected);
                }
            }
        }
    }
}

#[test]
fn every_spelling_sounds_its_pitch() {
    for pref in PREFERENCES {
        for key in KeySignature::all() {
            for pitch in 0..=127 {
                let (spelling, _) = resolve(pitch, Clef::Treble, pref, key);
                let natural = [0, 2, 4, 5, 7, 9, 11][spelling.step as usize];
                let sounding = 12 * (spelling.octave + 1) + natural + spelling.accidental.offset();
                assert_eq!(sounding, pitch, "{} in {}", spelling.name, key.name());
            }
        }
    }
}

#[test]
fn clef_references_sit_on_the_bottom_line() {
    for pref in PREFERENCES {
        assert_eq!(resolve(64, Clef::Treble, pref, KeySignature::C).1, 0);
        // top line F5
        assert_eq!(resolve(77, Clef::Treble, pref, KeySignature::C).1, 8);
        for key in KeySignature::all() {
            assert_eq!(resolve(43, Clef::Bass, pref, key).1, 0);
            assert_eq!(resolve(57, Clef::Bass, pref, key).1, 8);
        }
    }
    // in D flat the same pitch is Fb, a step higher
    let (fb, position) = resolve(64, Clef::Treble, AccidentalPreference::FollowKey, KeySignature::D_FLAT);
    assert_eq!((fb.name.as_str(), position), ("Fb4", 1));
}

#[test]
fn major_triad_in_c_under_sharp_naming() {
    let names: Vec<String> = [60, 64, 67]
        .iter()
        .map(|&p| note_name(p, Clef::Treble, AccidentalPreference::AlwaysSharp, KeySignature::C))
        .collect();
    assert_eq!(names, vec!["C4", "E4", "G4"]);
}

#[test]
fn key_of_e_flat_spells_b_flat_on_the_b_line() {
    let (flat, flat_pos) = resolve(58, Clef::Treble, AccidentalPreference::FollowKey, KeySignature::E_FLAT);
    let (sharp, sharp_pos) = resolve(58, Clef::Treble, AccidentalPreference::AlwaysSharp, KeySignature::E_FLAT);
    assert_eq!(flat.name, "Bb3");
    assert_eq!(flat.accidental, Accidental::Flat);
    assert_eq!(sharp.name, "A#3");
    assert_eq!(flat_pos, sharp_pos + 1);

    // an octave up the B sits on the middle line
    let (_, middle) = resolve(70, Clef::Treble, AccidentalPreference::FollowKey, KeySignature::E_FLAT);
    assert_eq!(middle, 4);
}

#[test]
fn extreme_keys_cross_octave_boundaries() {
    let follow = AccidentalPreference::FollowKey;
    assert_eq!(note_name(60, Clef::Treble, follow, KeySignature::B), "B#3");
    assert_eq!(note_name(71, Clef::Treble, follow, KeySignature::D_FLAT), "Cb5");
    assert_eq!(note_name(64, Clef::Treble, follow, KeySignature::D_FLAT), "Fb4");
    assert_eq!(note_name(65, Clef::Treble, follow, KeySignature::E), "E#4");
    // B major keeps G natural
    assert_eq!(note_name(67, Clef::Treble, follow, KeySignature::B), "G4");
}

#[test]
fn out_of_range_pitches_are_clamped() {
    let pref = AccidentalPreference::AlwaysSharp;
    assert_eq!(note_name(-5, Clef::Bass, pref, KeySignature::C), "C-1");
    assert_eq!(note_name(300, Clef::Bass, pref, KeySignature::C), "G9");
    assert_eq!(
        resolve(300, Clef::Treble, pref, KeySignature::C),
        resolve(127, Clef::Treble, pref, KeySignature::C)
    );
}

#[test]
fn settings_drive_the_speller() {
    let settings = DisplaySettings::from_json(
        r#"{"accidentalPreference": 2, "accidentalKey": 2, "unknownKey": true}"#,
    )
    .unwrap();
    assert_eq!(settings.accidental_key, KeySignature::E_FLAT);
    let (spelling, _) = resolve(
        58,
        settings.clef(Side::Right),
        settings.accidental_preference,
        settings.accidental_key,
    );
    assert_eq!(spelling.name, "Bb3");
}
