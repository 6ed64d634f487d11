// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale pattern catalog.
//!
//! Static interval patterns for every supported scale type, the enharmonic
//! spelling table and the tuning reference used for frequency calculation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScaleKeyError;

/// Scale types present in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleType {
    // Major scale family
    Major,

    // Minor scale family
    NaturalMinor,
    Minor, // Legacy name, same pattern as NaturalMinor
    HarmonicMinor,
    MelodicMinor,

    // Pentatonic
    MajorPentatonic,
    MinorPentatonic,

    // Blues
    Blues,

    // World/exotic
    PhrygianDominant,

    // Modes
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
}

impl ScaleType {
    /// All scale types in catalog order
    pub const ALL: [ScaleType; 14] = [
        ScaleType::Major,
        ScaleType::NaturalMinor,
        ScaleType::Minor,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
        ScaleType::MajorPentatonic,
        ScaleType::MinorPentatonic,
        ScaleType::Blues,
        ScaleType::PhrygianDominant,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
        ScaleType::Locrian,
    ];

    /// Catalog key for this scale type (e.g. "naturalMinor")
    pub fn key(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::NaturalMinor => "naturalMinor",
            ScaleType::Minor => "minor",
            ScaleType::HarmonicMinor => "harmonicMinor",
            ScaleType::MelodicMinor => "melodicMinor",
            ScaleType::MajorPentatonic => "majorPentatonic",
            ScaleType::MinorPentatonic => "minorPentatonic",
            ScaleType::Blues => "blues",
            ScaleType::PhrygianDominant => "phrygianDominant",
            ScaleType::Dorian => "dorian",
            ScaleType::Phrygian => "phrygian",
            ScaleType::Lydian => "lydian",
            ScaleType::Mixolydian => "mixolydian",
            ScaleType::Locrian => "locrian",
        }
    }

    /// Look up a scale type by its exact catalog key
    pub fn from_key(key: &str) -> Option<Self> {
        ScaleType::ALL.iter().copied().find(|st| st.key() == key)
    }

    /// Catalog entry for this scale type
    pub fn definition(self) -> &'static ScalePatternDefinition {
        match self {
            ScaleType::Major => &MAJOR,
            ScaleType::NaturalMinor => &NATURAL_MINOR,
            ScaleType::Minor => &MINOR,
            ScaleType::HarmonicMinor => &HARMONIC_MINOR,
            ScaleType::MelodicMinor => &MELODIC_MINOR,
            ScaleType::MajorPentatonic => &MAJOR_PENTATONIC,
            ScaleType::MinorPentatonic => &MINOR_PENTATONIC,
            ScaleType::Blues => &BLUES,
            ScaleType::PhrygianDominant => &PHRYGIAN_DOMINANT,
            ScaleType::Dorian => &DORIAN,
            ScaleType::Phrygian => &PHRYGIAN,
            ScaleType::Lydian => &LYDIAN,
            ScaleType::Mixolydian => &MIXOLYDIAN,
            ScaleType::Locrian => &LOCRIAN,
        }
    }

    /// Whether this is one of the two natural minor keys
    pub fn is_natural_minor(self) -> bool {
        matches!(self, ScaleType::Minor | ScaleType::NaturalMinor)
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScaleType {
    type Err = ScaleKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScaleType::from_key(s).ok_or_else(|| ScaleKeyError::InvalidScaleType(s.to_string()))
    }
}

/// Grouping used to browse the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleCategory {
    Diatonic,
    Minor,
    Pentatonic,
    Blues,
    Exotic,
    Modal,
    Uncategorized,
}

impl ScaleCategory {
    /// Tag name as used in scale metadata
    pub fn name(self) -> &'static str {
        match self {
            ScaleCategory::Diatonic => "diatonic",
            ScaleCategory::Minor => "minor",
            ScaleCategory::Pentatonic => "pentatonic",
            ScaleCategory::Blues => "blues",
            ScaleCategory::Exotic => "exotic",
            ScaleCategory::Modal => "modal",
            ScaleCategory::Uncategorized => "uncategorized",
        }
    }
}

impl fmt::Display for ScaleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalePatternDefinition {
    /// Human-readable scale name
    pub name: &'static str,
    /// Semitones from the root, strictly ascending, starting at 0
    pub intervals: &'static [u8],
    /// Scale degree labels, one per interval
    pub degrees: &'static [&'static str],
    /// Catalog grouping
    pub category: ScaleCategory,
    /// Short description
    pub description: &'static str,
    /// Modes derived from this scale (empty when not applicable)
    pub modes: &'static [&'static str],
    /// Key signature follows the relative major
    pub relative_to_major: bool,
}

impl ScalePatternDefinition {
    /// Check the catalog invariants for this entry
    pub fn is_well_formed(&self) -> bool {
        !self.intervals.is_empty()
            && self.intervals.len() == self.degrees.len()
            && self.intervals[0] == 0
            && self.intervals.windows(2).all(|w| w[0] < w[1])
    }
}

const MAJOR: ScalePatternDefinition = ScalePatternDefinition {
    name: "Major Scale",
    intervals: &[0, 2, 4, 5, 7, 9, 11],
    degrees: &["1", "2", "3", "4", "5", "6", "7"],
    category: ScaleCategory::Diatonic,
    description: "Natural major scale with whole and half step pattern",
    modes: &["ionian", "dorian", "phrygian", "lydian", "mixolydian", "aeolian", "locrian"],
    relative_to_major: false,
};

const NATURAL_MINOR: ScalePatternDefinition = ScalePatternDefinition {
    name: "Natural Minor Scale",
    intervals: &[0, 2, 3, 5, 7, 8, 10],
    degrees: &["1", "2", "b3", "4", "5", "b6", "b7"],
    category: ScaleCategory::Diatonic,
    description: "Natural minor scale (Aeolian mode)",
    modes: &[],
    relative_to_major: true,
};

const MINOR: ScalePatternDefinition = NATURAL_MINOR;

const HARMONIC_MINOR: ScalePatternDefinition = ScalePatternDefinition {
    name: "Harmonic Minor Scale",
    intervals: &[0, 2, 3, 5, 7, 8, 11],
    degrees: &["1", "2", "b3", "4", "5", "b6", "7"],
    category: ScaleCategory::Minor,
    description: "Minor scale with raised 7th degree",
    modes: &[],
    relative_to_major: false,
};

const MELODIC_MINOR: ScalePatternDefinition = ScalePatternDefinition {
    name: "Melodic Minor Scale",
    intervals: &[0, 2, 3, 5, 7, 9, 11],
    degrees: &["1", "2", "b3", "4", "5", "6", "7"],
    category: ScaleCategory::Minor,
    description: "Minor scale with raised 6th and 7th degrees",
    modes: &[],
    relative_to_major: false,
};

const MAJOR_PENTATONIC: ScalePatternDefinition = ScalePatternDefinition {
    name: "Major Pentatonic Scale",
    intervals: &[0, 2, 4, 7, 9],
    degrees: &["1", "2", "3", "5", "6"],
    category: ScaleCategory::Pentatonic,
    description: "Five-note scale derived from major scale",
    modes: &[],
    relative_to_major: false,
};

const MINOR_PENTATONIC: ScalePatternDefinition = ScalePatternDefinition {
    name: "Minor Pentatonic Scale",
    intervals: &[0, 3, 5, 7, 10],
    degrees: &["1", "b3", "4", "5", "b7"],
    category: ScaleCategory::Pentatonic,
    description: "Five-note scale derived from minor scale",
    modes: &[],
    relative_to_major: false,
};

const BLUES: ScalePatternDefinition = ScalePatternDefinition {
    name: "Blues Scale",
    intervals: &[0, 3, 5, 6, 7, 10],
    degrees: &["1", "b3", "4", "b5", "5", "b7"],
    category: ScaleCategory::Blues,
    description: "Traditional blues scale with blue notes",
    modes: &[],
    relative_to_major: false,
};

const PHRYGIAN_DOMINANT: ScalePatternDefinition = ScalePatternDefinition {
    name: "Phrygian Dominant",
    intervals: &[0, 1, 4, 5, 7, 8, 10],
    degrees: &["1", "b2", "3", "4", "5", "b6", "b7"],
    category: ScaleCategory::Exotic,
    description: "Spanish/Middle Eastern scale",
    modes: &[],
    relative_to_major: false,
};

const DORIAN: ScalePatternDefinition = ScalePatternDefinition {
    name: "Dorian Mode",
    intervals: &[0, 2, 3, 5, 7, 9, 10],
    degrees: &["1", "2", "b3", "4", "5", "6", "b7"],
    category: ScaleCategory::Modal,
    description: "Second mode of major scale",
    modes: &[],
    relative_to_major: false,
};

const PHRYGIAN: ScalePatternDefinition = ScalePatternDefinition {
    name: "Phrygian Mode",
    intervals: &[0, 1, 3, 5, 7, 8, 10],
    degrees: &["1", "b2", "b3", "4", "5", "b6", "b7"],
    category: ScaleCategory::Modal,
    description: "Third mode of major scale",
    modes: &[],
    relative_to_major: false,
};

const LYDIAN: ScalePatternDefinition = ScalePatternDefinition {
    name: "Lydian Mode",
    intervals: &[0, 2, 4, 6, 7, 9, 11],
    degrees: &["1", "2", "3", "#4", "5", "6", "7"],
    category: ScaleCategory::Modal,
    description: "Fourth mode of major scale",
    modes: &[],
    relative_to_major: false,
};

const MIXOLYDIAN: ScalePatternDefinition = ScalePatternDefinition {
    name: "Mixolydian Mode",
    intervals: &[0, 2, 4, 5, 7, 9, 10],
    degrees: &["1", "2", "3", "4", "5", "6", "b7"],
    category: ScaleCategory::Modal,
    description: "Fifth mode of major scale",
    modes: &[],
    relative_to_major: false,
};

const LOCRIAN: ScalePatternDefinition = ScalePatternDefinition {
    name: "Locrian Mode",
    intervals: &[0, 1, 3, 5, 6, 8, 10],
    degrees: &["1", "b2", "b3", "4", "b5", "b6", "b7"],
    category: ScaleCategory::Modal,
    description: "Seventh mode of major scale",
    modes: &[],
    relative_to_major: false,
};

/// Sharp/flat spelling pairs; lookups work in both directions
pub const ENHARMONIC_EQUIVALENTS: [(&str, &str); 5] = [
    ("C#", "Db"),
    ("D#", "Eb"),
    ("F#", "Gb"),
    ("G#", "Ab"),
    ("A#", "Bb"),
];

/// Tuning reference: A4 = 440 Hz
pub struct FrequencyReference {
    pub note: &'static str,
    pub octave: i32,
    pub frequency: f64,
}

pub const FREQUENCY_REFERENCE: FrequencyReference = FrequencyReference {
    note: "A",
    octave: 4,
    frequency: 440.0,
};
