// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Diatonic triad suggestions.
//!
//! Triads are built by stacking scale degrees `i`, `i + 2` and `i + 4`,
//! wrapping modulo the number of notes in the scale. For scales that are
//! not seven notes long the wrap still applies, so pentatonic and blues
//! scales yield stacks that are not conventional thirds.

use std::fmt;

use serde::Serialize;

use super::note::{Note, PitchClass};

/// Roman numeral labels for the seven diatonic triads
const ROMAN_NUMERALS: [&str; 7] = ["I", "ii", "iii", "IV", "V", "vi", "vii°"];

/// At most one triad per degree of a heptatonic scale
const MAX_CHORDS: usize = 7;

/// Triad quality, derived from third and fifth above the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Unknown,
}

impl ChordQuality {
    /// Classify from semitone distances of the third and fifth
    pub fn from_intervals(third: u8, fifth: u8) -> Self {
        match (third, fifth) {
            (4, 7) => ChordQuality::Major,
            (3, 7) => ChordQuality::Minor,
            (3, 6) => ChordQuality::Diminished,
            (4, 8) => ChordQuality::Augmented,
            _ => ChordQuality::Unknown,
        }
    }

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Diminished => "diminished",
            ChordQuality::Augmented => "augmented",
            ChordQuality::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A suggested triad
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chord {
    /// Chord root
    pub root: PitchClass,
    /// Root, third and fifth
    pub notes: Vec<PitchClass>,
    /// Roman numeral function label
    pub function: String,
    /// Triad quality
    pub quality: ChordQuality,
}

/// Build up to seven triads from generated scale notes
pub fn suggest_chords(notes: &[Note]) -> Vec<Chord> {
    let len = notes.len();
    let mut chords = Vec::with_capacity(len.min(MAX_CHORDS));

    for i in 0..len.min(MAX_CHORDS) {
        let root = &notes[i];
        let third = &notes[(i + 2) % len];
        let fifth = &notes[(i + 4) % len];

        let function = ROMAN_NUMERALS
            .get(i)
            .map(|s| s.to_string())
            .unwrap_or_else(|| (i + 1).to_string());

        chords.push(Chord {
            root: root.note,
            notes: vec![root.note, third.note, fifth.note],
            function,
            quality: triad_quality(root, third, fifth),
        });
    }

    chords
}

fn triad_quality(root: &Note, third: &Note, fifth: &Note) -> ChordQuality {
    let third_interval = (third.interval as i32 - root.interval as i32).rem_euclid(12) as u8;
    let fifth_interval = (fifth.interval as i32 - root.interval as i32).rem_euclid(12) as u8;
    ChordQuality::from_intervals(third_interval, fifth_interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::catalog::ScaleType;
    use crate::music::scale::ScalePattern;

    fn notes(root: PitchClass, scale_type: ScaleType) -> Vec<Note> {
        ScalePattern::from_definition(scale_type.definition()).generate_notes(root, 4)
    }

    #[test]
    fn test_quality_classification() {
        assert_eq!(ChordQuality::from_intervals(4, 7), ChordQuality::Major);
        assert_eq!(ChordQuality::from_intervals(3, 7), ChordQuality::Minor);
        assert_eq!(ChordQuality::from_intervals(3, 6), ChordQuality::Diminished);
        assert_eq!(ChordQuality::from_intervals(4, 8), ChordQuality::Augmented);
        assert_eq!(ChordQuality::from_intervals(5, 7), ChordQuality::Unknown);
    }

    #[test]
    fn test_c_major_triads() {
        let chords = suggest_chords(&notes(PitchClass::C, ScaleType::Major));
        assert_eq!(chords.len(), 7);

        let qualities: Vec<ChordQuality> = chords.iter().map(|c| c.quality).collect();
        use ChordQuality::*;
        assert_eq!(qualities, vec![Major, Minor, Minor, Major, Major, Minor, Diminished]);

        let functions: Vec<&str> = chords.iter().map(|c| c.function.as_str()).collect();
        assert_eq!(functions, ROMAN_NUMERALS.to_vec());

        assert_eq!(chords[4].notes, vec![PitchClass::G, PitchClass::B, PitchClass::D]);
    }

    #[test]
    fn test_harmonic_minor_has_augmented_third() {
        let chords = suggest_chords(&notes(PitchClass::A, ScaleType::HarmonicMinor));
        // C E G#
        assert_eq!(chords[2].quality, ChordQuality::Augmented);
    }

    #[test]
    fn test_pentatonic_wraps_modulo_note_count() {
        // Preserved behavior: degrees wrap over five notes, not seven
        let chords = suggest_chords(&notes(PitchClass::C, ScaleType::MajorPentatonic));
        assert_eq!(chords.len(), 5);
        assert_eq!(chords[0].notes, vec![PitchClass::C, PitchClass::E, PitchClass::A]);
        assert_eq!(chords[0].quality, ChordQuality::Unknown);
        assert_eq!(chords[3].notes, vec![PitchClass::G, PitchClass::C, PitchClass::E]);
        assert_eq!(chords[4].function, "V");
    }

    #[test]
    fn test_empty_notes_yield_no_chords() {
        assert!(suggest_chords(&[]).is_empty());
    }
}
