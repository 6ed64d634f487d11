// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes, generated notes and note string utilities.
//!
//! Frequencies use twelve-tone equal temperament relative to A4 = 440 Hz.
//! Note strings have the shape `[A-G](#|b)?<digits>`, e.g. "C4" or "F#3".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::catalog::{ENHARMONIC_EQUIVALENTS, FREQUENCY_REFERENCE};
use crate::error::{Result, ScaleKeyError};

/// The 12 chromatic pitch classes (sharp spellings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchClass {
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C#")]
    Cs,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D#")]
    Ds,
    #[serde(rename = "E")]
    E,
    #[serde(rename = "F")]
    F,
    #[serde(rename = "F#")]
    Fs,
    #[serde(rename = "G")]
    G,
    #[serde(rename = "G#")]
    Gs,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A#")]
    As,
    #[serde(rename = "B")]
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Chromatic index (0-11)
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Get pitch class from any index, wrapping modulo 12
    pub fn from_index(index: i32) -> Self {
        PitchClass::ALL[index.rem_euclid(12) as usize]
    }

    /// Name as used in note strings ("C", "C#", ...)
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }

    /// Strict lookup by chromatic name; flat spellings are rejected
    pub fn from_name(name: &str) -> Option<Self> {
        PitchClass::ALL.iter().copied().find(|pc| pc.name() == name)
    }

    /// Lookup accepting either chromatic or flat spellings ("Bb" -> A#)
    pub fn from_spelling(name: &str) -> Option<Self> {
        PitchClass::from_name(name).or_else(|| PitchClass::from_name(enharmonic_equivalent(name)))
    }

    /// Whether this pitch class is spelled with a sharp
    pub fn is_accidental(self) -> bool {
        self.name().contains('#')
    }

    /// Transpose by semitones, wrapping around the octave
    pub fn transpose(self, semitones: i32) -> Self {
        PitchClass::from_index(self.index() as i32 + semitones)
    }

    /// Ascending interval in semitones to another pitch class (0-11)
    pub fn interval_to(self, other: PitchClass) -> u8 {
        (other.index() as i32 - self.index() as i32).rem_euclid(12) as u8
    }

    /// Equal-tempered frequency of this pitch class in the given octave
    ///
    /// Extreme octaves saturate to `0.0` or infinity.
    pub fn frequency(self, octave: i32) -> f64 {
        let reference = PitchClass::from_name(FREQUENCY_REFERENCE.note).unwrap_or(PitchClass::A);
        let semitones = (f64::from(octave) - f64::from(FREQUENCY_REFERENCE.octave)) * 12.0
            + f64::from(self.index() as i32 - reference.index() as i32);
        FREQUENCY_REFERENCE.frequency * 2f64.powf(semitones / 12.0)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = ScaleKeyError;

    fn from_str(s: &str) -> Result<Self> {
        PitchClass::from_name(s).ok_or_else(|| ScaleKeyError::InvalidNote(s.to_string()))
    }
}

/// A concrete note produced by scale generation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Pitch class
    pub note: PitchClass,
    /// Octave number (scientific pitch notation)
    pub octave: i32,
    /// Formatted note string, e.g. "C4"
    pub note_string: String,
    /// Scale degree label, e.g. "b3"
    pub degree: String,
    /// Semitones from the scale root
    pub interval: u8,
    /// Frequency in Hz
    pub frequency: f64,
}

impl Note {
    /// Build a note, deriving its string and frequency
    pub fn new(note: PitchClass, octave: i32, degree: impl Into<String>, interval: u8) -> Self {
        Self {
            note,
            octave,
            note_string: format_note_string(note, octave),
            degree: degree.into(),
            interval,
            frequency: note.frequency(octave),
        }
    }

    /// Same pitch class and degree moved to another octave
    pub fn with_octave(&self, octave: i32) -> Self {
        Note::new(self.note, octave, self.degree.clone(), self.interval)
    }
}

/// Components of a parsed note string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedNote {
    /// Note name as written, may be a flat spelling ("Bb")
    pub note: String,
    /// Octave number
    pub octave: i32,
}

impl ParsedNote {
    /// Resolve the written name to a chromatic pitch class
    pub fn pitch_class(&self) -> Result<PitchClass> {
        self.note.parse()
    }
}

/// Calculate the frequency of a named note in an octave
pub fn calculate_frequency(note: &str, octave: i32) -> Result<f64> {
    let pitch_class: PitchClass = note.parse()?;
    Ok(pitch_class.frequency(octave))
}

/// Parse a note string such as "C4" or "F#3"
pub fn parse_note_string(note_string: &str) -> Result<ParsedNote> {
    let invalid = || ScaleKeyError::InvalidFormat(note_string.to_string());
    let bytes = note_string.as_bytes();

    let name_len = match bytes {
        [b'A'..=b'G', b'#' | b'b', ..] => 2,
        [b'A'..=b'G', ..] => 1,
        _ => return Err(invalid()),
    };

    let digits = &note_string[name_len..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let octave = digits.parse::<i32>().map_err(|_| invalid())?;
    Ok(ParsedNote {
        note: note_string[..name_len].to_string(),
        octave,
    })
}

/// Format a note and octave as a note string
pub fn format_note_string(note: impl fmt::Display, octave: i32) -> String {
    format!("{}{}", note, octave)
}

/// Enharmonic spelling of a note name, or the name itself if it has none
pub fn enharmonic_equivalent(note: &str) -> &str {
    for (sharp, flat) in ENHARMONIC_EQUIVALENTS.iter() {
        if note == *sharp {
            return flat;
        }
        if note == *flat {
            return sharp;
        }
    }
    note
}

/// Upward interval in semitones between two named notes (0-11)
pub fn interval_semitones(from_note: &str, to_note: &str) -> Result<u8> {
    let from: PitchClass = from_note.parse()?;
    let to: PitchClass = to_note.parse()?;
    Ok(from.interval_to(to))
}

/// Transpose a named note by a number of semitones
pub fn transpose_note(note: &str, semitones: i32) -> Result<PitchClass> {
    let pitch_class: PitchClass = note.parse()?;
    Ok(pitch_class.transpose(semitones))
}

/// Whether a string is one of the 12 chromatic note names
pub fn is_valid_note(note: &str) -> bool {
    PitchClass::from_name(note).is_some()
}

/// Whether a string is a well-formed note string
pub fn is_valid_note_string(note_string: &str) -> bool {
    parse_note_string(note_string).is_ok()
}

/// All chromatic notes in order
pub fn all_notes() -> [PitchClass; 12] {
    PitchClass::ALL
}
