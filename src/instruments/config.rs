// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Static per-instrument layout configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::music::{PitchClass, ScaleType};

/// Instruments with a known layout configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Instrument {
    HandPan,
    Fretboard,
    Piano,
    Keyboard,
    ChordDiagram,
}

impl Instrument {
    /// All known instruments
    pub const ALL: [Instrument; 5] = [
        Instrument::HandPan,
        Instrument::Fretboard,
        Instrument::Piano,
        Instrument::Keyboard,
        Instrument::ChordDiagram,
    ];

    /// Identifier used in options and config files
    pub fn name(self) -> &'static str {
        match self {
            Instrument::HandPan => "handPan",
            Instrument::Fretboard => "fretboard",
            Instrument::Piano => "piano",
            Instrument::Keyboard => "keyboard",
            Instrument::ChordDiagram => "chordDiagram",
        }
    }

    /// Built-in configuration for this instrument
    pub fn config(self) -> InstrumentConfig {
        match self {
            Instrument::HandPan => InstrumentConfig {
                instrument: self,
                note_count: NoteCount::Fixed(8),
                default_octave: OctaveSetting::Fixed(4),
                note_layout: NoteLayout::Circular,
                preferred_scales: PreferredScales::Only(&[
                    ScaleType::Minor,
                    ScaleType::NaturalMinor,
                    ScaleType::MajorPentatonic,
                    ScaleType::MinorPentatonic,
                    ScaleType::Dorian,
                ]),
                octave_range: (3, 5),
                note_formatting: NoteFormatting::Scientific,
                layout_description: "Circular layout with central root note",
                details: InstrumentDetails::default(),
            },
            Instrument::Fretboard => InstrumentConfig {
                instrument: self,
                note_count: NoteCount::Variable,
                default_octave: OctaveSetting::Variable,
                note_layout: NoteLayout::Linear,
                preferred_scales: PreferredScales::Only(&[
                    ScaleType::Major,
                    ScaleType::NaturalMinor,
                    ScaleType::Minor,
                    ScaleType::MajorPentatonic,
                    ScaleType::MinorPentatonic,
                    ScaleType::Blues,
                    ScaleType::Dorian,
                    ScaleType::Mixolydian,
                ]),
                octave_range: (2, 6),
                note_formatting: NoteFormatting::Scientific,
                layout_description: "Linear fretboard with multiple strings",
                details: InstrumentDetails {
                    fret_range: Some((0, 24)),
                    // Mandolin counts courses, each with two strings
                    string_counts: &[("guitar", 6), ("ukulele", 4), ("mandolin", 4), ("bass", 4)],
                    key_layout: None,
                },
            },
            Instrument::Piano => InstrumentConfig {
                instrument: self,
                note_count: NoteCount::Fixed(88),
                default_octave: OctaveSetting::Fixed(4),
                note_layout: NoteLayout::Chromatic,
                preferred_scales: PreferredScales::All,
                octave_range: (0, 8),
                note_formatting: NoteFormatting::Scientific,
                layout_description: "Traditional piano keyboard layout",
                details: InstrumentDetails {
                    key_layout: Some("traditional"),
                    ..InstrumentDetails::default()
                },
            },
            Instrument::Keyboard => InstrumentConfig {
                instrument: self,
                note_count: NoteCount::Variable,
                default_octave: OctaveSetting::Fixed(4),
                note_layout: NoteLayout::Chromatic,
                preferred_scales: PreferredScales::All,
                octave_range: (2, 6),
                note_formatting: NoteFormatting::Scientific,
                layout_description: "Digital keyboard interface",
                details: InstrumentDetails {
                    key_layout: Some("digital"),
                    ..InstrumentDetails::default()
                },
            },
            Instrument::ChordDiagram => InstrumentConfig {
                instrument: self,
                note_count: NoteCount::Variable,
                default_octave: OctaveSetting::Variable,
                note_layout: NoteLayout::ChordBased,
                preferred_scales: PreferredScales::Only(&[
                    ScaleType::Major,
                    ScaleType::NaturalMinor,
                    ScaleType::Minor,
                    ScaleType::Dorian,
                    ScaleType::Mixolydian,
                ]),
                octave_range: (2, 6),
                note_formatting: NoteFormatting::Scientific,
                layout_description: "Chord-based note representation",
                details: InstrumentDetails::default(),
            },
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Instrument {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instrument::ALL
            .iter()
            .copied()
            .find(|i| i.name() == s)
            .ok_or_else(|| format!("Unknown instrument: {}", s))
    }
}

/// How many notes an instrument layout holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoteCount {
    Fixed(usize),
    Variable,
}

/// Default octave of an instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OctaveSetting {
    Fixed(i32),
    Variable,
}

/// Layout tag describing how notes are arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteLayout {
    Circular,
    Linear,
    Chromatic,
    ChordBased,
}

impl NoteLayout {
    /// Tag name ("circular", "chord-based", ...)
    pub fn name(self) -> &'static str {
        match self {
            NoteLayout::Circular => "circular",
            NoteLayout::Linear => "linear",
            NoteLayout::Chromatic => "chromatic",
            NoteLayout::ChordBased => "chord-based",
        }
    }
}

impl fmt::Display for NoteLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scale types an instrument favors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferredScales {
    All,
    Only(&'static [ScaleType]),
}

/// Rule for turning a note and octave into a display string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoteFormatting {
    /// Scientific pitch notation, "C4"
    Scientific,
}

impl NoteFormatting {
    pub fn format(self, note: PitchClass, octave: i32) -> String {
        match self {
            NoteFormatting::Scientific => format!("{}{}", note, octave),
        }
    }
}

/// Instrument-specific extras that layouts may consult
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fret_range: Option<(u8, u8)>,
    pub string_counts: &'static [(&'static str, u8)],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_layout: Option<&'static str>,
}

/// Read-only layout configuration for one instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentConfig {
    pub instrument: Instrument,
    pub note_count: NoteCount,
    pub default_octave: OctaveSetting,
    pub note_layout: NoteLayout,
    pub preferred_scales: PreferredScales,
    /// Inclusive `(min, max)` octave range
    pub octave_range: (i32, i32),
    pub note_formatting: NoteFormatting,
    pub layout_description: &'static str,
    pub details: InstrumentDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_pan_config() {
        let config = Instrument::HandPan.config();
        assert_eq!(config.note_count, NoteCount::Fixed(8));
        assert_eq!(config.default_octave, OctaveSetting::Fixed(4));
        assert_eq!(config.note_layout, NoteLayout::Circular);
        assert_eq!(config.octave_range, (3, 5));
    }

    #[test]
    fn test_octave_ranges_are_ordered() {
        for instrument in Instrument::ALL {
            let (min, max) = instrument.config().octave_range;
            assert!(min <= max, "{}", instrument);
        }
    }

    #[test]
    fn test_instrument_names_round_trip() {
        for instrument in Instrument::ALL {
            assert_eq!(instrument.name().parse::<Instrument>(), Ok(instrument));
            assert_eq!(instrument.config().instrument, instrument);
        }
        assert!("banjo".parse::<Instrument>().is_err());
    }

    #[test]
    fn test_fretboard_details() {
        let details = Instrument::Fretboard.config().details;
        assert_eq!(details.fret_range, Some((0, 24)));
        assert!(details.string_counts.contains(&("guitar", 6)));
        assert_eq!(Instrument::Piano.config().details.key_layout, Some("traditional"));
    }

    #[test]
    fn test_scientific_formatting() {
        assert_eq!(NoteFormatting::Scientific.format(PitchClass::Fs, 3), "F#3");
    }
}
