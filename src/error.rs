//! Error types for the few fallible edges of the crate.
//!
//! Spelling and rendering never fail: out-of-range inputs are clamped.
//! Only building a custom spelling table and reading a settings document
//! can report an error.

use thiserror::Error;

/// A spelling table entry that does not describe its own semitone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpellingError {
    #[error("key {key}, semitone {semitone}: step {step} is outside -1..=7")]
    StepOutOfRange { key: usize, semitone: usize, step: i8 },

    #[error("key {key}, semitone {semitone}: spelling sounds as semitone {actual}")]
    WrongPitchClass { key: usize, semitone: usize, actual: i32 },
}

/// Settings document could not be read.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}
