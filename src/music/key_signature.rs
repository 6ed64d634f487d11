// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key signatures and key relationships.
//!
//! Major and natural minor keys use the standard signature tables (minor
//! keys via their relative major). Any other scale type derives its
//! accidentals from the notes the pattern actually produces.

use serde::Serialize;

use super::catalog::ScaleType;
use super::note::{enharmonic_equivalent, PitchClass};

/// Order in which sharps are added to a key signature
const SHARP_ORDER: [&str; 7] = ["F#", "C#", "G#", "D#", "A#", "E#", "B#"];

/// Order in which flats are added to a key signature
const FLAT_ORDER: [&str; 7] = ["Bb", "Eb", "Ab", "Db", "Gb", "Cb", "Fb"];

fn major_key_sharps(key: &str) -> &'static [&'static str] {
    let count = match key {
        "C" => 0,
        "G" => 1,
        "D" => 2,
        "A" => 3,
        "E" => 4,
        "B" => 5,
        "F#" => 6,
        "C#" => 7,
        _ => 0,
    };
    &SHARP_ORDER[..count]
}

fn major_key_flats(key: &str) -> &'static [&'static str] {
    let count = match key {
        "F" => 1,
        "Bb" => 2,
        "Eb" => 3,
        "Ab" => 4,
        "Db" => 5,
        "Gb" => 6,
        "Cb" => 7,
        _ => 0,
    };
    &FLAT_ORDER[..count]
}

fn minor_to_major(key: &str) -> Option<&'static str> {
    let major = match key {
        "A" => "C",
        "E" => "G",
        "B" => "D",
        "F#" => "A",
        "C#" => "E",
        "G#" => "B",
        "D#" => "F#",
        "D" => "F",
        "G" => "Bb",
        "C" => "Eb",
        "F" => "Ab",
        "Bb" => "Db",
        "Eb" => "Gb",
        "Ab" => "Cb",
        _ => return None,
    };
    Some(major)
}

fn major_to_minor(key: &str) -> Option<&'static str> {
    let minor = match key {
        "C" => "A",
        "G" => "E",
        "D" => "B",
        "A" => "F#",
        "E" => "C#",
        "B" => "G#",
        "F#" => "D#",
        "F" => "D",
        "Bb" => "G",
        "Eb" => "C",
        "Ab" => "F",
        "Db" => "Bb",
        "Gb" => "Eb",
        "Cb" => "Ab",
        _ => return None,
    };
    Some(minor)
}

fn circle_position(major_key: &str) -> i8 {
    match major_key {
        "Cb" => -7,
        "Gb" => -6,
        "Db" => -5,
        "Ab" => -4,
        "Eb" => -3,
        "Bb" => -2,
        "F" => -1,
        "C" => 0,
        "G" => 1,
        "D" => 2,
        "A" => 3,
        "E" => 4,
        "B" => 5,
        "F#" => 6,
        "C#" => 7,
        _ => 0,
    }
}

/// Sharps and flats implied by a key and scale type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeySignature {
    key: PitchClass,
    scale_type: ScaleType,
    sharps: Vec<&'static str>,
    flats: Vec<&'static str>,
}

impl KeySignature {
    /// Compute the key signature for a key and scale type
    pub fn new(key: PitchClass, scale_type: ScaleType) -> Self {
        let mut signature = Self {
            key,
            scale_type,
            sharps: Vec::new(),
            flats: Vec::new(),
        };

        if scale_type == ScaleType::Major {
            signature.sharps = major_key_sharps(key.name()).to_vec();
            signature.flats = major_key_flats(key.name()).to_vec();
        } else if scale_type.is_natural_minor() {
            let relative = signature.relative_major();
            signature.sharps = major_key_sharps(relative).to_vec();
            signature.flats = major_key_flats(relative).to_vec();
        } else {
            let notes = signature.scale_note_names();
            signature.sharps = notes.iter().copied().filter(|n| n.contains('#')).collect();
            signature.flats = notes.iter().copied().filter(|n| n.contains('b')).collect();
        }

        signature
    }

    /// Key center
    pub fn key(&self) -> PitchClass {
        self.key
    }

    /// Scale type this signature was computed for
    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    /// Sharps in signature order
    pub fn sharps(&self) -> &[&'static str] {
        &self.sharps
    }

    /// Flats in signature order
    pub fn flats(&self) -> &[&'static str] {
        &self.flats
    }

    /// Sharps followed by flats
    pub fn accidentals(&self) -> Vec<&'static str> {
        self.sharps.iter().chain(self.flats.iter()).copied().collect()
    }

    /// Relative major of a natural minor key; the key itself otherwise
    ///
    /// May return a flat spelling ("Bb") that is not a chromatic name.
    pub fn relative_major(&self) -> &'static str {
        if !self.scale_type.is_natural_minor() {
            return self.key.name();
        }
        minor_to_major(self.key.name()).unwrap_or(self.key.name())
    }

    /// Relative minor of a major key; the key itself otherwise
    pub fn relative_minor(&self) -> &'static str {
        if self.scale_type != ScaleType::Major {
            return self.key.name();
        }
        major_to_minor(self.key.name()).unwrap_or(self.key.name())
    }

    /// Position on the circle of fifths (-7 to +7)
    ///
    /// Minor keys use their relative major; scale types other than major
    /// and natural minor sit at 0.
    pub fn circle_of_fifths_position(&self) -> i8 {
        if self.scale_type == ScaleType::Major {
            circle_position(self.key.name())
        } else if self.scale_type.is_natural_minor() {
            circle_position(self.relative_major())
        } else {
            0
        }
    }

    /// Scale notes spelled with flats when the signature carries flats
    pub fn notes_with_accidentals(&self) -> Vec<&'static str> {
        let use_flats = !self.flats.is_empty();
        self.scale_note_names()
            .into_iter()
            .map(|name| {
                if use_flats && name.contains('#') {
                    enharmonic_equivalent(name)
                } else {
                    name
                }
            })
            .collect()
    }

    /// Whether both signatures produce the same set of sounding pitches
    pub fn is_enharmonic_equivalent(&self, other: &KeySignature) -> bool {
        let this = self.normalized_pitches();
        let that = other.normalized_pitches();
        this == that
    }

    /// Display name such as "C Major" or "A Natural Minor"
    pub fn display_name(&self) -> String {
        let scale_name = match self.scale_type {
            ScaleType::Major => "Major",
            ScaleType::Minor => "Minor",
            ScaleType::NaturalMinor => "Natural Minor",
            ScaleType::HarmonicMinor => "Harmonic Minor",
            ScaleType::MelodicMinor => "Melodic Minor",
            other => other.key(),
        };
        format!("{} {}", self.key, scale_name)
    }

    fn scale_note_names(&self) -> Vec<&'static str> {
        self.scale_type
            .definition()
            .intervals
            .iter()
            .map(|&interval| self.key.transpose(interval as i32).name())
            .collect()
    }

    fn normalized_pitches(&self) -> Vec<PitchClass> {
        let mut pitches: Vec<PitchClass> = self
            .notes_with_accidentals()
            .into_iter()
            .filter_map(PitchClass::from_spelling)
            .collect();
        pitches.sort();
        pitches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(key: PitchClass, scale_type: ScaleType) -> KeySignature {
        KeySignature::new(key, scale_type)
    }

    #[test]
    fn test_major_signatures() {
        assert!(sig(PitchClass::C, ScaleType::Major).accidentals().is_empty());
        assert_eq!(sig(PitchClass::G, ScaleType::Major).sharps(), &["F#"]);
        assert_eq!(
            sig(PitchClass::Fs, ScaleType::Major).sharps(),
            &["F#", "C#", "G#", "D#", "A#", "E#"]
        );
        assert_eq!(sig(PitchClass::F, ScaleType::Major).flats(), &["Bb"]);
    }

    #[test]
    fn test_major_keys_missing_from_table_are_empty() {
        // Keys spelled as sharps but conventionally written as flats
        let a_sharp = sig(PitchClass::As, ScaleType::Major);
        assert!(a_sharp.sharps().is_empty());
        assert!(a_sharp.flats().is_empty());
    }

    #[test]
    fn test_minor_signatures_follow_relative_major() {
        assert!(sig(PitchClass::A, ScaleType::NaturalMinor).accidentals().is_empty());
        assert_eq!(sig(PitchClass::E, ScaleType::Minor).sharps(), &["F#"]);
        assert_eq!(sig(PitchClass::D, ScaleType::Minor).flats(), &["Bb"]);
        assert_eq!(sig(PitchClass::G, ScaleType::NaturalMinor).flats(), &["Bb", "Eb"]);
    }

    #[test]
    fn test_other_scales_scan_pattern() {
        let e_dorian = sig(PitchClass::E, ScaleType::Dorian);
        assert_eq!(e_dorian.sharps(), &["F#", "C#"]);
        assert!(e_dorian.flats().is_empty());

        let a_harmonic = sig(PitchClass::A, ScaleType::HarmonicMinor);
        assert_eq!(a_harmonic.sharps(), &["G#"]);
    }

    #[test]
    fn test_relative_keys() {
        assert_eq!(sig(PitchClass::C, ScaleType::Major).relative_minor(), "A");
        assert_eq!(sig(PitchClass::A, ScaleType::NaturalMinor).relative_major(), "C");
        assert_eq!(sig(PitchClass::G, ScaleType::Minor).relative_major(), "Bb");

        // Direction mismatch is identity
        assert_eq!(sig(PitchClass::C, ScaleType::Major).relative_major(), "C");
        assert_eq!(sig(PitchClass::A, ScaleType::Minor).relative_minor(), "A");
        assert_eq!(sig(PitchClass::D, ScaleType::Dorian).relative_minor(), "D");

        // No table entry is identity
        assert_eq!(sig(PitchClass::Cs, ScaleType::Major).relative_minor(), "C#");
    }

    #[test]
    fn test_circle_of_fifths() {
        assert_eq!(sig(PitchClass::C, ScaleType::Major).circle_of_fifths_position(), 0);
        assert_eq!(sig(PitchClass::G, ScaleType::Major).circle_of_fifths_position(), 1);
        assert_eq!(sig(PitchClass::Cs, ScaleType::Major).circle_of_fifths_position(), 7);
        assert_eq!(sig(PitchClass::D, ScaleType::Minor).circle_of_fifths_position(), -1);
        assert_eq!(sig(PitchClass::G, ScaleType::NaturalMinor).circle_of_fifths_position(), -2);
        assert_eq!(sig(PitchClass::D, ScaleType::Dorian).circle_of_fifths_position(), 0);
    }

    #[test]
    fn test_notes_with_accidentals_prefers_flats() {
        let d_minor = sig(PitchClass::D, ScaleType::Minor);
        assert_eq!(
            d_minor.notes_with_accidentals(),
            vec!["D", "E", "F", "G", "A", "Bb", "C"]
        );

        let e_major = sig(PitchClass::E, ScaleType::Major);
        assert_eq!(
            e_major.notes_with_accidentals(),
            vec!["E", "F#", "G#", "A", "B", "C#", "D#"]
        );
    }

    #[test]
    fn test_enharmonic_equivalence() {
        let c_major = sig(PitchClass::C, ScaleType::Major);
        let a_minor = sig(PitchClass::A, ScaleType::NaturalMinor);
        let g_major = sig(PitchClass::G, ScaleType::Major);
        let d_minor = sig(PitchClass::D, ScaleType::Minor);
        let f_major = sig(PitchClass::F, ScaleType::Major);

        assert!(c_major.is_enharmonic_equivalent(&a_minor));
        assert!(d_minor.is_enharmonic_equivalent(&f_major));
        assert!(!c_major.is_enharmonic_equivalent(&g_major));

        let c_pentatonic = sig(PitchClass::C, ScaleType::MajorPentatonic);
        assert!(!c_major.is_enharmonic_equivalent(&c_pentatonic));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(sig(PitchClass::C, ScaleType::Major).display_name(), "C Major");
        assert_eq!(
            sig(PitchClass::A, ScaleType::NaturalMinor).display_name(),
            "A Natural Minor"
        );
        assert_eq!(sig(PitchClass::D, ScaleType::Dorian).display_name(), "D dorian");
    }
}
