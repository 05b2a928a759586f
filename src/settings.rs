//! Display-related settings read from the instrument's JSON settings file.
//!
//! The persisted document carries many more keys (MIDI channels, bellows
//! curve, metronome...). Only the ones the display core consumes are read;
//! everything else is ignored.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SettingsError;
use crate::model::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    /// 0 = sharps, 1 = flats, 2 = follow the key
    pub accidental_preference: AccidentalPreference,
    /// Key index, Db (0) through B (10)
    pub accidental_key: KeySignature,
    /// 0 = stacked names, 1 = placed names
    pub note_display: NoteDisplay,
    /// Lowest pitch scanned for sounding notes
    #[serde(deserialize_with = "clamped_pitch")]
    pub midi_min: Pitch,
    /// Highest pitch scanned for sounding notes
    #[serde(deserialize_with = "clamped_pitch")]
    pub midi_max: Pitch,
    /// Clef per side, left then right
    pub clefs: [Clef; 2],
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            accidental_preference: AccidentalPreference::FollowKey,
            accidental_key: KeySignature::C,
            note_display: NoteDisplay::Stacked,
            midi_min: 0,
            midi_max: 127,
            clefs: [Clef::for_side(Side::Left), Clef::for_side(Side::Right)],
        }
    }
}

/// Any integer is accepted and clamped into 0..=127.
fn clamped_pitch<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pitch, D::Error> {
    let value = i64::deserialize(deserializer)?;
    Ok(clamp_pitch(value.clamp(i32::MIN.into(), i32::MAX.into()) as i32))
}

impl DisplaySettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Like `from_json`, but a broken document falls back to defaults.
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            log::warn!("{e}; using default display settings");
            Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn clef(&self, side: Side) -> Clef {
        self.clefs[side.index()]
    }
}
